use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStoplogger
/// CLI application to record stop/incident events per day with SQLite
#[derive(Parser)]
#[command(
    name = "rstoplogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple stop & incident log CLI: record events per day, with duration, photos and PDF export",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (integrity checks, statistics, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(
            long = "op",
            value_name = "OPERATION",
            help = "Only rows of this operation (add, del, export, backup, init, load_default)"
        )]
        operation: Option<String>,
    },

    /// Record a new stop/incident event
    Add {
        /// Event number (free-form identifier)
        #[arg(long = "number", short = 'n', help = "Event number")]
        number: Option<String>,

        /// Date of the event (YYYY-MM-DD); today when omitted
        #[arg(long = "date", short = 'd', help = "Event date (YYYY-MM-DD), default today")]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long = "end", help = "End time (HH:MM), must be after --start")]
        end: Option<String>,

        /// Reason of the stop
        #[arg(long = "reason", short = 'r', help = "Reason of the stop/incident")]
        reason: Option<String>,

        /// Image file to attach
        #[arg(long = "photo", value_name = "FILE", help = "Attach a photo (image file)")]
        photo: Option<String>,
    },

    /// Delete an event of a day by its ID
    Del {
        /// Event ID, as shown by `list`
        id: i64,

        #[arg(long = "date", short = 'd', help = "Day of the event (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "yes", short = 'y', help = "Confirm without prompting")]
        yes: bool,
    },

    /// Show the events of a day
    List {
        #[arg(long = "date", short = 'd', help = "Day to show (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the events of a day
    Export {
        #[arg(long, value_name = "NAME", help = "Output file name (extension added if missing)")]
        file: String,

        #[arg(long = "date", short = 'd', help = "Day to export (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, value_enum, help = "Export format (default from config: pdf)")]
        format: Option<ExportFormat>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
