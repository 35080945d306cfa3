mod list;
mod logging;
mod lookup;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use lookup::Lookup;
use taskpad_core::{
    validate_new_task, validate_patch, Config, FileStore, StatusFilter, TaskId, TaskPatch,
    TaskService, TaskStatus, ValidationErrors,
};

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "A small personal task manager", long_about = None)]
struct Cli {
    /// Directory holding the task file (default: ~/.taskpad)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key the collection is saved under
    #[arg(long, global = true)]
    key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,
        description: String,
    },
    /// List tasks, pending first then newest first
    List {
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Show one task in full
    Show { id: String },
    /// Change the title, description or status of a task
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Flip a task between pending and completed
    Toggle { id: String },
    /// Delete a task permanently
    Delete { id: String },
    /// Forget all saved tasks and start over from the sample set
    Reset,
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Pending,
    Completed,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => StatusFilter::All,
            FilterArg::Pending => StatusFilter::Pending,
            FilterArg::Completed => StatusFilter::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::resolve(cli.data_dir, cli.key)?;
    tracing::info!(dir = %config.data_dir.display(), key = %config.storage_key, "opening task storage");
    let mut service = TaskService::new(config.open_storage()?);

    let ok = match cli.command {
        Some(Commands::Add { title, description }) => match validate_new_task(&title, &description) {
            Ok(input) => {
                let task = service.add_task(input);
                println!("Task added: {} (ID: {})", task.title, task.id);
                true
            }
            Err(errors) => report_invalid(&errors),
        },
        Some(Commands::List { filter }) => {
            list::show_list(service.list_all(), filter.into());
            true
        }
        Some(Commands::Show { id }) => match resolve(&service, &id) {
            Some(id) => {
                if let Some(task) = service.get_by_id(&id) {
                    list::show_detail(task);
                }
                true
            }
            None => false,
        },
        Some(Commands::Edit {
            id,
            title,
            description,
            status,
        }) => match resolve(&service, &id) {
            Some(id) => {
                let patch = TaskPatch {
                    id,
                    title,
                    description,
                    status: status.map(Into::into),
                };
                edit(&mut service, patch)
            }
            None => false,
        },
        Some(Commands::Toggle { id }) => {
            match resolve(&service, &id).and_then(|id| service.toggle_status(&id)) {
                Some(task) => {
                    println!("Task {} is now {}", task.id, task.status);
                    true
                }
                None => false,
            }
        }
        Some(Commands::Delete { id }) => {
            match resolve(&service, &id).and_then(|id| service.delete_task(&id)) {
                Some(task) => {
                    println!("Task deleted: {} (ID: {})", task.title, task.id);
                    true
                }
                None => false,
            }
        }
        Some(Commands::Reset) => {
            service.reset();
            println!("Tasks reset to the sample set.");
            true
        }
        Some(Commands::Tui) | None => {
            tui::run(service)?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Accepts a full id or the short form `list` prints.
fn resolve(service: &TaskService<FileStore>, input: &str) -> Option<TaskId> {
    match lookup::resolve_id(service.list_all(), input) {
        Lookup::Found(id) => Some(id),
        Lookup::NotFound => {
            not_found(input);
            None
        }
        Lookup::Ambiguous(ids) => {
            println!("Error: id prefix {input} matches {} tasks:", ids.len());
            for id in ids {
                println!("  {id}");
            }
            None
        }
    }
}

fn edit(service: &mut TaskService<FileStore>, patch: TaskPatch) -> bool {
    if patch.is_empty() {
        println!("Nothing to change: pass --title, --description or --status.");
        return false;
    }
    let id = patch.id.clone();
    let patch = match validate_patch(patch) {
        Ok(patch) => patch,
        Err(errors) => return report_invalid(&errors),
    };
    match service.update_task(patch) {
        Some(task) => {
            println!("Task updated: {} (ID: {})", task.title, task.id);
            true
        }
        None => not_found(id.as_str()),
    }
}

fn report_invalid(errors: &ValidationErrors) -> bool {
    for message in errors.messages() {
        println!("Error: {message}");
    }
    false
}

fn not_found(id: &str) -> bool {
    println!("Task not found: {id}");
    false
}
