use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use todoview_core::scope::Scope;
use todoview_core::todo::{Importance, Urgency};

#[derive(Parser)]
#[command(name = "todoview")]
#[command(about = "Browse and edit todo lists from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Overrides TODOVIEW_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Overrides TODOVIEW_PAGE_SIZE.
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Which list to operate on. Without a flag the unclassified list is used.
#[derive(Args, Clone, Copy)]
pub struct ScopeArgs {
    #[arg(long, conflicts_with = "organization")]
    pub project: Option<i64>,

    #[arg(long)]
    pub organization: Option<i64>,
}

impl ScopeArgs {
    pub fn scope(&self) -> Scope {
        match (self.project, self.organization) {
            (Some(id), _) => Scope::Project(id),
            (None, Some(id)) => Scope::Organization(id),
            (None, None) => Scope::Unclassified,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a todo list.
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Keep loading pages until the whole list is fetched.
        #[arg(long)]
        all: bool,
    },

    /// Create a todo in the selected list.
    Add {
        #[command(flatten)]
        scope: ScopeArgs,

        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Delete a todo. Requires --yes.
    Delete {
        #[command(flatten)]
        scope: ScopeArgs,

        id: i64,

        #[arg(long)]
        yes: bool,
    },

    /// Assign urgency and importance to a todo in the selected list.
    Plan {
        #[command(flatten)]
        scope: ScopeArgs,

        id: i64,

        #[arg(long)]
        urgency: UrgencyArg,

        #[arg(long)]
        importance: ImportanceArg,

        #[arg(long)]
        due: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UrgencyArg {
    Urgent,
    NotUrgent,
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Urgent => Urgency::Urgent,
            UrgencyArg::NotUrgent => Urgency::NotUrgent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImportanceArg {
    Important,
    NotImportant,
}

impl From<ImportanceArg> for Importance {
    fn from(arg: ImportanceArg) -> Self {
        match arg {
            ImportanceArg::Important => Importance::Important,
            ImportanceArg::NotImportant => Importance::NotImportant,
        }
    }
}
