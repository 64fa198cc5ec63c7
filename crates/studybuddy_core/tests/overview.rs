use chrono::{Datelike, NaiveDate, Weekday};
use studybuddy_core::service::overview_service::{
    dashboard, filter_tasks, progress_report, schedules_on, week_of, TaskFilter, UNKNOWN_SUBJECT,
    UPCOMING_TASK_LIMIT,
};
use studybuddy_core::{
    DocumentStore, MemoryKvStorage, NewSchedule, NewSubject, NewTask, Priority,
    SequentialIdGenerator, TaskKind,
};

type TestStore = DocumentStore<MemoryKvStorage, SequentialIdGenerator>;

fn store() -> TestStore {
    DocumentStore::open_with_ids(MemoryKvStorage::new(), SequentialIdGenerator::new()).unwrap()
}

// Wednesday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    today() + chrono::Duration::days(offset)
}

fn class(store: &mut TestStore, subject_id: i64, date: NaiveDate, start: &str, end: &str) {
    store
        .add_schedule(NewSchedule {
            subject_id,
            date,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
        })
        .unwrap();
}

#[test]
fn dashboard_counts_sorts_and_limits() {
    let mut store = store();
    let math = store
        .add_subject(NewSubject::new("Math", "#4CAF50", Priority::High))
        .unwrap();
    class(&mut store, math, today(), "13:00", "14:00");
    class(&mut store, 999, today(), "08:00", "09:00");
    class(&mut store, math, day(1), "08:00", "09:00");

    for offset in [6, 2, 0, 4, 3, 5] {
        store
            .add_task(NewTask::new("t", math, TaskKind::Homework, day(offset)))
            .unwrap();
    }
    let past = store
        .add_task(NewTask::new("old", math, TaskKind::Homework, day(-1)))
        .unwrap();
    let done = store
        .add_task(NewTask::new("done", math, TaskKind::Homework, day(1)))
        .unwrap();
    store.toggle_task_completion(done).unwrap();

    let summary = dashboard(&store.snapshot().unwrap(), today());

    assert_eq!(summary.total_subjects, 1);
    assert_eq!(summary.upcoming_deadlines, 6);
    assert_eq!(summary.tasks_completed, 1);
    // 1 of 8 tasks done.
    assert_eq!(summary.progress_percent, 13);

    let starts: Vec<String> = summary
        .today_schedule
        .iter()
        .map(|view| view.schedule.start_time.to_string())
        .collect();
    assert_eq!(starts, vec!["08:00", "13:00"]);
    assert_eq!(summary.today_schedule[0].subject_name, UNKNOWN_SUBJECT);
    assert_eq!(summary.today_schedule[1].subject_name, "Math");

    assert_eq!(summary.upcoming_tasks.len(), UPCOMING_TASK_LIMIT);
    let deadlines: Vec<NaiveDate> = summary
        .upcoming_tasks
        .iter()
        .map(|view| view.task.deadline)
        .collect();
    assert_eq!(deadlines, vec![day(0), day(2), day(3), day(4), day(5)]);
    assert!(summary.upcoming_tasks.iter().all(|view| view.task.id != past));
}

#[test]
fn empty_document_has_zero_progress() {
    let store = store();
    let summary = dashboard(&store.snapshot().unwrap(), today());
    assert_eq!(summary.progress_percent, 0);
    assert!(summary.today_schedule.is_empty());
    assert!(progress_report(&store.snapshot().unwrap()).is_none());
}

#[test]
fn schedules_on_filters_by_date_and_sorts_by_start() {
    let mut store = store();
    class(&mut store, 1, today(), "15:00", "16:00");
    class(&mut store, 1, day(1), "07:00", "08:00");
    class(&mut store, 1, today(), "10:00", "11:00");

    let views = schedules_on(&store.snapshot().unwrap(), today());
    let starts: Vec<String> = views
        .iter()
        .map(|view| view.schedule.start_time.to_string())
        .collect();
    assert_eq!(starts, vec!["10:00", "15:00"]);
}

#[test]
fn week_runs_sunday_to_saturday_around_today() {
    let mut store = store();
    class(&mut store, 1, day(-3), "09:00", "10:00");
    class(&mut store, 1, day(3), "09:00", "10:00");
    class(&mut store, 1, day(4), "09:00", "10:00");

    let week = week_of(&store.snapshot().unwrap(), today());

    assert_eq!(week.len(), 7);
    assert_eq!(week[0].date.weekday(), Weekday::Sun);
    assert_eq!(week[0].date, day(-3));
    assert_eq!(week[6].date, day(3));
    assert_eq!(week[0].schedules.len(), 1);
    assert_eq!(week[6].schedules.len(), 1);
    assert_eq!(week.iter().map(|d| d.schedules.len()).sum::<usize>(), 2);
}

#[test]
fn task_filters_split_pending_and_completed() {
    let mut store = store();
    let a = store
        .add_task(NewTask::new("a", 1, TaskKind::Reading, today()))
        .unwrap();
    store
        .add_task(NewTask::new("b", 1, TaskKind::Reading, today()))
        .unwrap();
    store.toggle_task_completion(a).unwrap();
    let document = store.snapshot().unwrap();

    assert_eq!(filter_tasks(&document, TaskFilter::All).len(), 2);
    let pending = filter_tasks(&document, TaskFilter::Pending);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].task.title, "b");
    let completed = filter_tasks(&document, TaskFilter::Completed);
    assert_eq!(completed[0].task.id, a);
}

#[test]
fn progress_report_breaks_down_by_subject() {
    let mut store = store();
    let math = store
        .add_subject(NewSubject::new("Math", "#4CAF50", Priority::High))
        .unwrap();
    let art = store
        .add_subject(NewSubject::new("Art", "#f0a", Priority::Low))
        .unwrap();
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(
            store
                .add_task(NewTask::new("m", math, TaskKind::Exam, today()))
                .unwrap(),
        );
    }
    store.toggle_task_completion(ids[0]).unwrap();

    let report = progress_report(&store.snapshot().unwrap()).unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.completed, 1);
    assert_eq!(report.percent, 33.3);

    assert_eq!(report.by_subject.len(), 2);
    assert_eq!(report.by_subject[0].subject_id, math);
    assert_eq!(report.by_subject[0].completed, 1);
    assert_eq!(report.by_subject[0].total, 3);
    assert_eq!(report.by_subject[1].subject_id, art);
    assert_eq!(report.by_subject[1].total, 0);
    assert_eq!(report.by_subject[1].percent, 0.0);
}
