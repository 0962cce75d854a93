use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cfgctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Manage monitoring configuration through its REST API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base URL of the configuration API (overrides config and CFGCTL_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token (overrides config and CFGCTL_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List entities of a kind
    List(ListArgs),

    /// Fetch one entity
    Get(GetArgs),

    /// Create an entity from a file
    Create(CreateArgs),

    /// Replace an existing entity from a file
    Update(UpdateArgs),

    /// Delete an entity
    Delete(DeleteArgs),

    /// Print the declarative schema of a kind
    Schema {
        #[arg(value_enum)]
        kind: Kind,
    },

    /// Render an entity as a declarative resource block
    Export {
        #[arg(value_enum)]
        kind: Kind,
        /// Entity ID
        id: String,
    },

    /// Compare a remote entity with a local file
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Manage the cfgctl configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Resource families
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Web applications
    #[value(alias = "webapp")]
    WebApplication,
    /// Dashboards
    Dashboard,
    /// Problem notifications
    Notification,
    /// Calculated service metrics
    #[value(alias = "metric")]
    CalculatedMetric,
    /// Auto-tags
    #[value(alias = "autotag")]
    AutoTag,
}

/// Output format of a single entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Wire JSON
    #[default]
    Json,
    /// Declarative resource block
    Hcl,
    /// Declarative tree as JSON
    Tree,
}

// ============================================================================
// Entity Commands
// ============================================================================

#[derive(Parser)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    /// Only dashboards owned by this user
    #[arg(long)]
    pub owner: Option<String>,

    /// Only dashboards carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Parser)]
pub struct GetArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    /// Entity ID
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: Format,
}

#[derive(Parser)]
pub struct InputArgs {
    /// Input file (wire JSON, or a declarative tree with --declarative)
    pub file: PathBuf,

    /// Read the file as a declarative tree instead of wire JSON
    #[arg(long)]
    pub declarative: bool,
}

#[derive(Parser)]
pub struct CreateArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser)]
pub struct UpdateArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    /// Entity ID
    pub id: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser)]
pub struct DeleteArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    /// Entity ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct DiffArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    /// Entity ID
    pub id: String,

    #[command(flatten)]
    pub input: InputArgs,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the config file location and effective settings
    Show,

    /// Write a config file with the given environment URL
    Init {
        /// Base URL of the configuration API
        url: String,

        /// Environment variable to read the API token from
        #[arg(long, default_value = "CFGCTL_TOKEN")]
        token_env: String,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
