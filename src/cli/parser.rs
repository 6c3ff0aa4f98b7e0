use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI dashboard to record and review daily employee activity with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee attendance dashboard: submit today's activity and review everyone's records by date",
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

/// Filters and paging shared by `list` and `watch`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only records of this date (YYYY-MM-DD); also selects the statistics date
    #[arg(long)]
    pub date: Option<String>,

    /// Case-insensitive email substring
    #[arg(long)]
    pub email: Option<String>,

    /// Case-insensitive search over email, note and status
    #[arg(long, short)]
    pub search: Option<String>,

    /// Rows per page: 5, 10, 50 or 100
    #[arg(long)]
    pub rows: Option<usize>,

    /// Page number (starting at 1)
    #[arg(long, short)]
    pub page: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Create a new employee account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Display name used in the dashboard greeting
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Save today's activity (overwrites an earlier submission of today)
    Submit {
        /// Clock-in time (HH:MM)
        #[arg(long = "in", value_name = "HH:MM")]
        clock_in: String,

        /// Clock-out time (HH:MM), later than clock-in
        #[arg(long = "out", value_name = "HH:MM")]
        clock_out: String,

        /// Work status: WFH, WFO, CUTI or On-Site (default from config)
        #[arg(long)]
        status: Option<String>,

        /// What you worked on today
        #[arg(long)]
        note: Option<String>,
    },

    /// Show the activity dashboard
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the matching page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Live dashboard: redraw whenever any record changes
    Watch {
        #[command(flatten)]
        filters: FilterArgs,

        /// Stop after this many refresh cycles
        #[arg(long, hide = true)]
        ticks: Option<u64>,
    },

    /// Show the full note of one record
    Note {
        #[arg(long)]
        email: String,

        /// Record date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
