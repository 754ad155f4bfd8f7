//! Todo CLI - personal task tracking from the command line.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use todo::dates::{self, parse_day_month};
use todo::entities::{NewTask, Recurrence, TaskPriority, TaskStatus, TaskUpdate};
use todo::ui;
use todo::validation::{parse_tag_list, validate_task_fields, TaskFieldsInput};
use todo::{SortKey, StoreConfig, TaskStore};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A command-line todo application", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  todo add \"Buy groceries\" \"Milk, bread, eggs\" --priority high --tags shopping,urgent
  todo list --status pending --sort due-date
  todo update 1 --title \"New title\" --priority low
  todo toggle 1
  todo search groceries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Task store file
    #[arg(long, global = true, env = "TODO_FILE")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(default_value = "")]
        description: String,

        /// Priority level
        #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,

        /// Comma-separated tags (alphanumeric with hyphens/underscores)
        #[arg(short, long)]
        tags: Option<String>,

        /// Due date in DD-MMM format (e.g., 05-Jan)
        #[arg(short, long)]
        due_date: Option<String>,

        /// Recurring pattern
        #[arg(short, long, value_enum)]
        recurring: Option<RecurrenceArg>,
    },

    /// List tasks
    List {
        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,

        /// Sort by criteria
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Show details of a specific task
    Show {
        /// Task ID
        id: u32,
    },

    /// Update an existing task
    Update {
        /// Task ID to update
        id: u32,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// New priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,

        /// New comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// New due date in DD-MMM format (e.g., 05-Jan)
        #[arg(short, long)]
        due_date: Option<String>,

        /// New recurring pattern
        #[arg(short, long, value_enum)]
        recurring: Option<RecurrenceUpdateArg>,
    },

    /// Delete a task
    Delete {
        /// Task ID to delete
        id: u32,
    },

    /// Toggle task status between pending and complete
    Toggle {
        /// Task ID to toggle
        id: u32,
    },

    /// Search tasks by keyword
    Search {
        /// Search query
        query: String,
    },

    /// List pending tasks due soon
    Due {
        /// Days ahead to include
        #[arg(short, long, default_value_t = 1)]
        days: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Complete,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Complete => Self::Complete,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RecurrenceArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<RecurrenceArg> for Recurrence {
    fn from(arg: RecurrenceArg) -> Self {
        match arg {
            RecurrenceArg::Daily => Self::Daily,
            RecurrenceArg::Weekly => Self::Weekly,
            RecurrenceArg::Monthly => Self::Monthly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RecurrenceUpdateArg {
    Daily,
    Weekly,
    Monthly,
    None,
}

impl From<RecurrenceUpdateArg> for Recurrence {
    fn from(arg: RecurrenceUpdateArg) -> Self {
        match arg {
            RecurrenceUpdateArg::Daily => Self::Daily,
            RecurrenceUpdateArg::Weekly => Self::Weekly,
            RecurrenceUpdateArg::Monthly => Self::Monthly,
            RecurrenceUpdateArg::None => Self::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    DueDate,
    Priority,
    Id,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::DueDate => Self::DueDate,
            SortArg::Priority => Self::Priority,
            SortArg::Id => Self::Id,
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::resolve(cli.file);
    let mut store = TaskStore::open(&config);

    if let Some(e) = store.load_error() {
        ui::print_warning(&format!(
            "Could not load {}: {}. Starting with an empty task list.",
            config.path.display(),
            e
        ));
    }

    let outcome = execute(&mut store, cli.command);

    if let Some(e) = store.take_save_error() {
        ui::print_warning(&format!("Changes were not saved: {e}"));
    }

    outcome
}

fn execute(store: &mut TaskStore, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            description,
            priority,
            tags,
            due_date,
            recurring,
        } => {
            let tags = tags.as_deref().map(parse_tag_list).unwrap_or_default();
            let recurrence = recurring.map_or(Recurrence::None, Recurrence::from);
            let priority = TaskPriority::from(priority);

            let input = TaskFieldsInput {
                title: title.clone(),
                description: description.clone(),
                priority: priority.to_string(),
                tags: tags.clone(),
                due_date: due_date.clone(),
                recurrence: recurrence.to_string(),
                ..TaskFieldsInput::default()
            };
            report_validation(&input)?;

            let due_date = resolve_due_date(due_date.as_deref())?;
            let task = store.add(NewTask {
                title,
                description,
                priority,
                tags,
                due_date,
                recurrence,
                ..NewTask::default()
            })?;

            ui::print_success(&format!("Task added successfully with ID: {}", task.id()));
        }

        Commands::List {
            status,
            priority,
            sort,
        } => {
            let tasks = store.list(
                status.map(TaskStatus::from),
                priority.map(TaskPriority::from),
                sort.map(SortKey::from),
            );

            if tasks.is_empty() {
                ui::print_info("No tasks found.");
            } else {
                let count = tasks.len();
                println!("{}", ui::task_table(tasks));
                println!();
                ui::print_info(&format!("{count} task(s) total"));
            }
        }

        Commands::Show { id } => {
            let Some(task) = store.get(id) else {
                bail!("Task with ID {id} not found");
            };
            ui::display_task_details(task);
        }

        Commands::Update {
            id,
            title,
            description,
            status,
            priority,
            tags,
            due_date,
            recurring,
        } => {
            let Some(current) = store.get(id) else {
                bail!("Task with ID {id} not found");
            };

            let update = TaskUpdate {
                title,
                description,
                status: status.map(TaskStatus::from),
                priority: priority.map(TaskPriority::from),
                tags: tags.as_deref().map(parse_tag_list),
                due_date: None,
                recurrence: recurring.map(Recurrence::from),
            };

            if update.is_empty() && due_date.is_none() {
                ui::print_info(&format!("Nothing to update for task {id}"));
                return Ok(());
            }

            let mut input = TaskFieldsInput::from_task(current);
            if let Some(title) = &update.title {
                input.title.clone_from(title);
            }
            if let Some(description) = &update.description {
                input.description.clone_from(description);
            }
            if let Some(status) = update.status {
                input.status = status.to_string();
            }
            if let Some(priority) = update.priority {
                input.priority = priority.to_string();
            }
            if let Some(tags) = &update.tags {
                input.tags.clone_from(tags);
            }
            if let Some(recurrence) = update.recurrence {
                input.recurrence = recurrence.to_string();
            }
            input.due_date.clone_from(&due_date);
            report_validation(&input)?;

            let update = TaskUpdate {
                due_date: resolve_due_date(due_date.as_deref())?,
                ..update
            };

            match store.update(id, &update)? {
                Some(_) => ui::print_success(&format!("Task {id} updated successfully")),
                None => bail!("Task with ID {id} not found"),
            }
        }

        Commands::Delete { id } => {
            if !store.delete(id) {
                bail!("Task with ID {id} not found");
            }
            ui::print_success(&format!("Task {id} deleted successfully"));
        }

        Commands::Toggle { id } => {
            let before = store.len();
            let successor_id = store.next_id();
            let Some(task) = store.toggle(id)? else {
                bail!("Task with ID {id} not found");
            };

            ui::print_success(&format!("Task {id} status toggled to {}", task.status()));
            if store.len() > before {
                if let Some(next) = successor_id.and_then(|next_id| store.get(next_id)) {
                    ui::print_info(&format!(
                        "Next occurrence created as task {} (due {})",
                        next.id(),
                        ui::due_label(next)
                    ));
                }
            }
        }

        Commands::Search { query } => {
            let tasks = store.search(&query);
            if tasks.is_empty() {
                ui::print_info("No matching tasks found.");
            } else {
                println!("{}", ui::task_table(tasks));
            }
        }

        Commands::Due { days } => {
            let tasks = store.due_soon(days);
            if tasks.is_empty() {
                ui::print_info(&format!("No pending tasks due in the next {days} day(s)."));
            } else {
                println!("{}", ui::task_table(tasks));
            }
        }
    }

    Ok(())
}

/// Print every validation problem and fail if there were any
fn report_validation(input: &TaskFieldsInput) -> Result<()> {
    let errors = validate_task_fields(input);
    if errors.is_empty() {
        return Ok(());
    }

    for error in &errors {
        ui::print_error(&error.to_string());
    }
    bail!("{} validation error(s)", errors.len())
}

fn resolve_due_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| parse_day_month(s, dates::today()).context("Use DD-MMM format (e.g., 05-Jan)"))
        .transpose()
}
