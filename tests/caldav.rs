//! Encoding tasks to iCal and reading them back, the way the CalDAV endpoint does

use chrono::{DateTime, TimeZone, Utc};

use todo_caldav::ical::{build_from, parse, ParseError};
use todo_caldav::{Label, Priority, Project, Settings, Task, TaskWithComments};

fn ts(secs: i64) -> Option<DateTime<Utc>> {
    Some(Utc.timestamp_opt(secs, 0).unwrap())
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn example_task() -> Task {
    Task {
        title: "Task 1".to_string(),
        uid: "randomuid".to_string(),
        description: "Description".to_string(),
        priority: Priority::High,
        created: ts(1543626721),
        due_date: ts(1543626722),
        start_date: ts(1543626723),
        end_date: ts(1543626724),
        updated: ts(1543626725),
        done_at: ts(1543626726),
        repeat_after: 86400,
        labels: vec![Label::with_id(1, "label1"), Label::with_id(2, "label2")],
        ..Default::default()
    }
}

/// Encode a single task, and decode it back
fn through_caldav(task: Task, settings: &Settings) -> Task {
    let project = Project::new(1, "List title");
    let ical = build_from(&project, &[TaskWithComments::from(task)], settings);
    parse(&ical, settings).unwrap()
}

fn todo_lines(ical: &str) -> Vec<&str> {
    ical.lines()
        .skip_while(|l| *l != "BEGIN:VTODO")
        .skip(1)
        .take_while(|l| *l != "END:VTODO")
        .collect()
}

#[test]
fn test_full_task_field_order() {
    init_logs();
    let project = Project::new(1, "List title");
    let ical = build_from(&project, &[TaskWithComments::from(example_task())], &Settings::default());

    assert!(ical.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ical.contains("\r\nMETHOD:PUBLISH\r\n"));
    assert!(ical.contains("\r\nX-PUBLISHED-TTL:PT4H\r\n"));
    assert!(ical.contains("\r\nX-WR-CALNAME:List title\r\n"));
    assert!(ical.ends_with("END:VCALENDAR\r\n"));

    assert_eq!(todo_lines(&ical), vec![
        "UID:randomuid",
        "DTSTAMP:20181201T011205Z",
        "SUMMARY:Task 1",
        "DTSTART:20181201T011203Z",
        "DTEND:20181201T011204Z",
        "DESCRIPTION:Description",
        "COMPLETED:20181201T011206Z",
        "STATUS:COMPLETED",
        "DUE:20181201T011202Z",
        "CREATED:20181201T011201Z",
        "PRIORITY:3",
        "RRULE:FREQ=SECONDLY;INTERVAL=86400",
        "CATEGORIES:label1,label2",
        "LAST-MODIFIED:20181201T011205Z",
    ]);
}

#[test]
fn test_full_task_round_trip() {
    init_logs();
    let original = example_task();
    let task = through_caldav(original.clone(), &Settings::default());

    assert_eq!(task.title, original.title);
    assert_eq!(task.uid, original.uid);
    assert_eq!(task.description, original.description);
    assert_eq!(task.updated, original.updated);
    assert_eq!(task.priority, original.priority);
    assert_eq!(task.label_titles(), vec!["label1", "label2"]);
    assert!(task.labels.iter().all(|l| l.id.is_none()));

    assert_eq!(task.created, original.created);
    assert_eq!(task.due_date, original.due_date);
    assert_eq!(task.start_date, original.start_date);
    assert_eq!(task.end_date, original.end_date);
    assert_eq!(task.done_at, original.done_at);
    assert_eq!(task.done, true);
    assert_eq!(task.repeat_after, 86400);
}

#[test]
fn test_round_trip_in_another_time_zone() {
    init_logs();
    let settings = Settings::default().with_time_zone(chrono_tz::Asia::Tokyo);
    let original = example_task();
    let task = through_caldav(original.clone(), &settings);
    assert_eq!(task.updated, original.updated);
    assert_eq!(task.due_date, original.due_date);
}

#[test]
fn test_minimal_task_round_trip() {
    init_logs();
    let task = through_caldav(Task::new("Just a title", "uid-1"), &Settings::default());

    assert_eq!(task.title, "Just a title");
    assert_eq!(task.uid, "uid-1");
    assert_eq!(task.description, "");
    assert_eq!(task.priority, Priority::Unset);
    assert!(task.labels.is_empty());
    assert_eq!(task.repeat_after, 0);
    assert_eq!(task.done, false);
    assert_eq!(task.done_at, None);
}

#[test]
fn test_every_priority_round_trips() {
    init_logs();
    for priority in [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent, Priority::DoNow].iter() {
        let mut task = Task::new("t", "u");
        task.priority = *priority;
        assert_eq!(through_caldav(task, &Settings::default()).priority, *priority);
    }
}

#[test]
fn test_labels_round_trip() {
    init_logs();
    let mut task = Task::new("t", "u");
    task.labels = vec![Label::new("cat1"), Label::new("cat2")];

    let project = Project::new(1, "p");
    let ical = build_from(&project, &[TaskWithComments::from(task.clone())], &Settings::default());
    assert!(todo_lines(&ical).contains(&"CATEGORIES:cat1,cat2"));

    let parsed = parse(&ical, &Settings::default()).unwrap();
    assert_eq!(parsed.labels, vec![Label::new("cat1"), Label::new("cat2")]);
}

#[test]
fn test_padded_and_empty_labels_round_trip() {
    init_logs();
    let mut task = Task::new("t", "u");
    task.labels = vec![Label::new("a "), Label::new(" b"), Label::new("")];

    let parsed = through_caldav(task, &Settings::default());
    assert_eq!(parsed.label_titles(), vec!["a ", " b", ""]);
}

#[test]
fn test_multiline_description_round_trips() {
    init_logs();
    let mut task = Task::new("Groceries, for the weekend", "u");
    task.description = "- milk\n- eggs; maybe\n- bread".to_string();
    let parsed = through_caldav(task.clone(), &Settings::default());
    assert_eq!(parsed.title, task.title);
    assert_eq!(parsed.description, task.description);
}

#[test]
fn test_long_lines_are_folded_and_unfolded() {
    init_logs();
    let mut task = Task::new("t", "u");
    task.description = "a-rather-long-description-without-any-whitespace/".repeat(4);
    let project = Project::new(1, "p");
    let ical = build_from(&project, &[TaskWithComments::from(task.clone())], &Settings::default());
    assert!(ical.lines().any(|l| l.starts_with(' ')));

    let parsed = parse(&ical, &Settings::default()).unwrap();
    assert_eq!(parsed.description, task.description);
}

#[test]
fn test_completion_markers() {
    init_logs();
    let project = Project::new(1, "p");
    let mut task = Task::new("t", "u");
    let ical = build_from(&project, &[TaskWithComments::from(task.clone())], &Settings::default());
    assert_eq!(ical.contains("COMPLETED"), false);

    task.done_at = ts(1543626726);
    let ical = build_from(&project, &[TaskWithComments::from(task)], &Settings::default());
    let lines = todo_lines(&ical);
    assert!(lines.contains(&"COMPLETED:20181201T011206Z"));
    assert!(lines.contains(&"STATUS:COMPLETED"));
}

#[test]
fn test_several_tasks_in_one_calendar() {
    init_logs();
    let project = Project::new(1, "p");
    let tasks: Vec<TaskWithComments> = vec![
        Task::new("first", "uid-1").into(),
        Task::new("second", "uid-2").into(),
    ];
    let ical = build_from(&project, &tasks, &Settings::default());
    assert_eq!(ical.matches("BEGIN:VTODO").count(), 2);
    assert!(ical.find("UID:uid-1").unwrap() < ical.find("UID:uid-2").unwrap());

    // A calendar with several tasks cannot be imported as a single task
    assert!(matches!(parse(&ical, &Settings::default()), Err(ParseError::MultipleItems)));
}

#[test]
fn test_empty_project() {
    init_logs();
    let ical = build_from(&Project::new(1, "Empty"), &[], &Settings::default());
    assert_eq!(ical.contains("BEGIN:VTODO"), false);
    assert!(ical.contains("X-WR-CALNAME:Empty"));
}

#[test]
fn test_missing_delimiters_is_an_error() {
    init_logs();
    let content = "UID:randomuid\nSUMMARY:Todo #1\nDESCRIPTION:Lorem Ipsum\n";
    let err = parse(content, &Settings::default()).unwrap_err();
    assert!(matches!(err, ParseError::Malformed(_)));
    assert!(err.to_string().starts_with("Unable to parse iCal data"));
}

#[test]
fn test_custom_product_id() {
    init_logs();
    let settings = Settings::default().with_product_id("-//Example Corp//Tasks//EN");
    let ical = build_from(&Project::new(1, "p"), &[], &settings);
    assert!(ical.contains("\r\nPRODID:-//Example Corp//Tasks//EN\r\n"));
}
