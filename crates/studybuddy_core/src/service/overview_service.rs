//! Read-only projections over a document snapshot.
//!
//! # Responsibility
//! - Build dashboard, daily/weekly schedule, task list and analytics views.
//! - Resolve subject names, degrading to [`UNKNOWN_SUBJECT`] for stale ids.
//!
//! # Invariants
//! - Projections never mutate the document.
//! - Sorts are stable, so equal keys keep insertion order.

use crate::model::document::Document;
use crate::model::entity::EntityId;
use crate::model::schedule::Schedule;
use crate::model::subject::Subject;
use crate::model::task::Task;
use chrono::{NaiveDate, Weekday};
use std::str::FromStr;

/// Display name used when a subject id has no matching subject.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Suggested file name for exported snapshots.
pub const EXPORT_FILE_NAME: &str = "studybuddy_export.json";

/// Maximum number of tasks listed in the dashboard's upcoming section.
pub const UPCOMING_TASK_LIMIT: usize = 5;

/// Schedule paired with its resolved subject name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    pub schedule: Schedule,
    pub subject_name: String,
}

/// Task paired with its resolved subject name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub task: Task,
    pub subject_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_subjects: usize,
    /// Incomplete tasks with deadline today or later.
    pub upcoming_deadlines: usize,
    pub tasks_completed: usize,
    /// Completed share of all tasks, rounded to a whole percent.
    pub progress_percent: u32,
    /// Today's schedules ordered by start time.
    pub today_schedule: Vec<ScheduleView>,
    /// Up to [`UPCOMING_TASK_LIMIT`] upcoming tasks ordered by deadline.
    pub upcoming_tasks: Vec<TaskView>,
}

/// One day column of the weekly view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub schedules: Vec<ScheduleView>,
}

/// Task list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unsupported task filter `{other}`; expected all|pending|completed"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectProgress {
    pub subject_id: EntityId,
    pub name: String,
    pub total: usize,
    pub completed: usize,
    /// One decimal place; `0.0` when the subject has no tasks.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub total: usize,
    pub completed: usize,
    /// One decimal place.
    pub percent: f64,
    /// One entry per subject, in subject order.
    pub by_subject: Vec<SubjectProgress>,
}

/// Resolves a subject name, or [`UNKNOWN_SUBJECT`] when the id is stale.
pub fn subject_name(subjects: &[Subject], id: EntityId) -> &str {
    subjects
        .iter()
        .find(|subject| subject.id == id)
        .map_or(UNKNOWN_SUBJECT, |subject| subject.name.as_str())
}

pub fn dashboard(document: &Document, today: NaiveDate) -> DashboardSummary {
    let tasks = &document.tasks;
    let tasks_completed = tasks.iter().filter(|task| task.completed).count();
    let progress_percent = if tasks.is_empty() {
        0
    } else {
        ((tasks_completed as f64 / tasks.len() as f64) * 100.0).round() as u32
    };

    let mut upcoming: Vec<&Task> = tasks.iter().filter(|task| task.is_upcoming(today)).collect();
    let upcoming_deadlines = upcoming.len();
    upcoming.sort_by_key(|task| task.deadline);

    DashboardSummary {
        total_subjects: document.subjects.len(),
        upcoming_deadlines,
        tasks_completed,
        progress_percent,
        today_schedule: schedules_on(document, today),
        upcoming_tasks: upcoming
            .into_iter()
            .take(UPCOMING_TASK_LIMIT)
            .map(|task| task_view(&document.subjects, task))
            .collect(),
    }
}

/// Schedules on `date`, ordered by start time.
pub fn schedules_on(document: &Document, date: NaiveDate) -> Vec<ScheduleView> {
    let mut day: Vec<&Schedule> = document
        .schedules
        .iter()
        .filter(|schedule| schedule.date == date)
        .collect();
    day.sort_by_key(|schedule| schedule.start_time);
    day.into_iter()
        .map(|schedule| schedule_view(&document.subjects, schedule))
        .collect()
}

/// The Sunday-to-Saturday week containing `today`.
///
/// Schedules inside one day keep insertion order.
pub fn week_of(document: &Document, today: NaiveDate) -> Vec<DayPlan> {
    let start = today.week(Weekday::Sun).first_day();
    start
        .iter_days()
        .take(7)
        .map(|date| DayPlan {
            date,
            schedules: document
                .schedules
                .iter()
                .filter(|schedule| schedule.date == date)
                .map(|schedule| schedule_view(&document.subjects, schedule))
                .collect(),
        })
        .collect()
}

pub fn filter_tasks(document: &Document, filter: TaskFilter) -> Vec<TaskView> {
    document
        .tasks
        .iter()
        .filter(|task| match filter {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        })
        .map(|task| task_view(&document.subjects, task))
        .collect()
}

/// Completion analytics; `None` when there are no tasks at all.
pub fn progress_report(document: &Document) -> Option<ProgressReport> {
    let tasks = &document.tasks;
    if tasks.is_empty() {
        return None;
    }

    let completed = tasks.iter().filter(|task| task.completed).count();
    let by_subject = document
        .subjects
        .iter()
        .map(|subject| {
            let (total, done) = tasks
                .iter()
                .filter(|task| task.subject_id == subject.id)
                .fold((0, 0), |(total, done), task| {
                    (total + 1, done + usize::from(task.completed))
                });
            SubjectProgress {
                subject_id: subject.id,
                name: subject.name.clone(),
                total,
                completed: done,
                percent: percent_one_decimal(done, total),
            }
        })
        .collect();

    Some(ProgressReport {
        total: tasks.len(),
        completed,
        percent: percent_one_decimal(completed, tasks.len()),
        by_subject,
    })
}

fn percent_one_decimal(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

fn schedule_view(subjects: &[Subject], schedule: &Schedule) -> ScheduleView {
    ScheduleView {
        schedule: schedule.clone(),
        subject_name: subject_name(subjects, schedule.subject_id).to_string(),
    }
}

fn task_view(subjects: &[Subject], task: &Task) -> TaskView {
    TaskView {
        task: task.clone(),
        subject_name: subject_name(subjects, task.subject_id).to_string(),
    }
}
