//! StudyBuddy host CLI.
//!
//! # Responsibility
//! - Open the SQLite-backed study document and run one-shot maintenance
//!   commands (export, import, reset, summary).
//! - Host the reminder polling loop, printing reminders as console alerts.

use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use studybuddy_core::db::open_db;
use studybuddy_core::service::overview_service::{dashboard, EXPORT_FILE_NAME};
use studybuddy_core::{
    init_logging, prepare_notifications, DocumentStore, LogConfig, LogLevel, Notifier,
    Permission, Reminder, ReminderPoller, SqliteKvStorage, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "studybuddy", version, about = "Study organizer data tools")]
struct Cli {
    /// SQLite database file holding the study document.
    #[arg(long, default_value = "studybuddy.db")]
    db: PathBuf,

    /// Absolute directory for log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = LogLevel::build_default().as_str().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks that the core library links and answers.
    Ping,
    /// Writes the document as pretty JSON.
    Export {
        /// Output file; defaults to the standard export file name.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print to stdout instead of writing a file.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Replaces the whole document with a previously exported file.
    Import { file: PathBuf },
    /// Deletes all data and restores defaults.
    Reset,
    /// Prints today's dashboard counts.
    Summary,
    /// Runs the reminder check every minute until interrupted.
    Remind,
}

/// Console host: no notification support, so every reminder is an alert.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> Option<Permission> {
        None
    }

    fn request_permission(&self) -> Permission {
        Permission::Denied
    }

    fn show(&self, reminder: &Reminder) {
        self.alert(reminder);
    }

    fn alert(&self, reminder: &Reminder) {
        println!("{}\n{}", reminder.title, reminder.body);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("studybuddy: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = &cli.log_dir {
        let level: LogLevel = cli.log_level.parse()?;
        init_logging(&LogConfig::new(level, dir)?)?;
    }

    if let Command::Ping = cli.command {
        println!("studybuddy_core ping={}", studybuddy_core::ping());
        println!("studybuddy_core version={}", studybuddy_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    let storage = SqliteKvStorage::new(&conn);
    // Import and reset must work on a stored document that no longer parses.
    let mut store = if matches!(cli.command, Command::Import { .. } | Command::Reset) {
        DocumentStore::attach(storage)
    } else {
        DocumentStore::open(storage)?
    };
    info!("event=cli_command module=cli status=start command={:?}", cli.command);

    match cli.command {
        Command::Ping => {}
        Command::Export { out, stdout } => {
            let text = store.export_snapshot()?;
            if stdout {
                println!("{text}");
            } else {
                let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                std::fs::write(&path, text)?;
                println!("exported to {}", path.display());
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            if store.import_snapshot(&text)? {
                println!("Data imported!");
            } else {
                return Err("Invalid file".into());
            }
        }
        Command::Reset => {
            store.reset()?;
            println!("all data deleted");
        }
        Command::Summary => {
            let summary = dashboard(&store.snapshot()?, Local::now().date_naive());
            println!("subjects: {}", summary.total_subjects);
            println!("upcoming deadlines: {}", summary.upcoming_deadlines);
            println!("tasks completed: {}", summary.tasks_completed);
            println!("progress: {}%", summary.progress_percent);
            for view in &summary.today_schedule {
                println!(
                    "  {} - {}  {}",
                    view.schedule.start_time, view.schedule.end_time, view.subject_name
                );
            }
        }
        Command::Remind => {
            let notifier = ConsoleNotifier;
            prepare_notifications(store.settings()?.reminders_enabled, &notifier);
            ReminderPoller::new(SystemClock).run(&store, &notifier, || true)?;
        }
    }

    Ok(())
}
