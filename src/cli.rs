use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Drive the alert management console from the command line")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (TRIAGE_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Change the server-held filter, sort and paging state
    #[command(subcommand)]
    Filters(FilterCommands),

    /// Run a batch action over alerts
    #[command(subcommand)]
    Alerts(AlertCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum FilterCommands {
    /// Clear every filter
    Reset,

    /// Append values to a filter
    Add {
        /// Filter name (e.g. "Tag", "Observable")
        name: String,

        /// Values to add
        #[arg(required = true)]
        values: Vec<String>,

        /// Send all values as one compound entry (e.g. observable type and value)
        #[arg(long)]
        compound: bool,
    },

    /// Replace the whole filter set
    Set {
        /// One filter row as NAME=VALUE; separate compound values with '|'
        #[arg(long = "row", value_name = "NAME=VALUE")]
        rows: Vec<String>,

        /// Filter mapping as a JSON document instead of rows
        #[arg(long, conflicts_with = "rows")]
        json: Option<String>,
    },

    /// Remove one entry of a filter
    Remove {
        name: String,

        /// 0-based position within the filter's values
        index: usize,
    },

    /// Remove every entry of a filter
    RemoveCategory { name: String },

    /// Sort by a column (repeat to flip direction)
    Sort { name: String },

    /// Jump to a page offset
    Offset { offset: u64 },

    /// Alerts per page (1-1000); defaults to `default_page_size` from config
    PageSize { size: Option<String> },
}

#[derive(Args)]
pub struct Selection {
    /// Alert UUIDs to act on
    #[arg(required = true)]
    pub uuids: Vec<String>,
}

#[derive(Subcommand)]
pub enum AlertCommands {
    /// Set the disposition of alerts
    Disposition {
        disposition: String,

        #[arg(long)]
        comment: Option<String>,

        #[command(flatten)]
        selection: Selection,
    },

    /// Comment on alerts
    Comment {
        comment: String,

        #[command(flatten)]
        selection: Selection,
    },

    /// Add space-separated tags to alerts
    Tag {
        tags: String,

        #[command(flatten)]
        selection: Selection,
    },

    /// Take ownership of alerts
    TakeOwnership {
        #[command(flatten)]
        selection: Selection,
    },

    /// Assign alerts to a user
    Assign {
        /// Numeric id of the user
        user_id: String,

        #[command(flatten)]
        selection: Selection,
    },

    /// Add alerts to an event, optionally saving a comment alongside
    AddToEvent {
        /// Existing event id; omit to create a new event
        #[arg(long)]
        event: Option<String>,

        #[arg(long)]
        event_name: Option<String>,

        #[arg(long)]
        disposition: Option<String>,

        /// Saved to every alert in a separate request
        #[arg(long)]
        comment: Option<String>,

        #[command(flatten)]
        selection: Selection,
    },

    /// Print the observables fragment of an alert
    Observables { uuid: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set { key: String, value: String },

    /// Get a configuration value
    Get { key: String },
}
