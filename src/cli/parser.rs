use clap::{Parser, Subcommand};

/// Command-line interface definition for punchlog
/// CLI application to track hospital staff attendance with SQLite
#[derive(Parser)]
#[command(
    name = "punchlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time-and-attendance CLI: punch pairing, justification approval and consistency maintenance over SQLite",
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

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Register reference records (workers, hospitals, sectors)
    Register {
        #[command(subcommand)]
        target: RegisterTarget,
    },

    /// Record a clock event for a worker
    Punch {
        /// Worker id
        #[arg(long = "worker")]
        worker: String,

        /// Event kind: entry, exit, break-out, break-in
        #[arg(long = "kind")]
        kind: String,

        /// Event instant (YYYY-MM-DD HH:MM)
        #[arg(long = "at")]
        at: String,

        /// Hospital (location) id
        #[arg(long = "location")]
        location: Option<String>,

        /// Sector id
        #[arg(long = "sector")]
        sector: Option<String>,

        /// Record as a manual (provisional) punch instead of biometric
        #[arg(long = "manual")]
        manual: bool,
    },

    /// Delete a punch by id (administrative; repairs the pair left behind)
    Del {
        /// Punch id
        id: String,
    },

    /// List derived shifts (entry/exit pairs)
    Shifts {
        /// Filter by worker id
        #[arg(long = "worker")]
        worker: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range (A..B)")]
        period: Option<String>,

        /// Filter by hospital (location) id
        #[arg(long = "location")]
        location: Option<String>,

        #[arg(long = "asc", help = "Oldest shift first (audit view)")]
        asc: bool,

        #[arg(long = "events", help = "List raw punch events instead of paired shifts")]
        events: bool,

        #[arg(long = "json", help = "Print as JSON instead of a table")]
        json: bool,
    },

    /// Submit a justification request for a missing or partial shift
    Justify {
        /// Worker id
        #[arg(long = "worker")]
        worker: String,

        /// Shift date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: String,

        /// Missing entry time (HH:MM)
        #[arg(long = "in")]
        entry: Option<String>,

        /// Missing exit time (HH:MM)
        #[arg(long = "out")]
        exit: Option<String>,

        /// Reason: forgot, device, offsite, other
        #[arg(long = "reason")]
        reason: String,

        /// Free-text description (required when reason is 'other')
        #[arg(long = "description", default_value = "")]
        description: String,

        /// Hospital (location) id
        #[arg(long = "location")]
        location: Option<String>,

        /// Sector id
        #[arg(long = "sector")]
        sector: Option<String>,
    },

    /// List justification requests
    Requests {
        /// Filter by status: pending, approved, rejected
        #[arg(long = "status")]
        status: Option<String>,

        /// Filter by worker id
        #[arg(long = "worker")]
        worker: Option<String>,

        #[arg(long = "json", help = "Print as JSON instead of a table")]
        json: bool,
    },

    /// Approve or reject a justification request
    Decide {
        /// Justification id
        id: String,

        #[arg(long = "approve", conflicts_with = "reject")]
        approve: bool,

        #[arg(long = "reject", conflicts_with = "approve")]
        reject: bool,

        /// Deciding manager (stamped on every linked punch)
        #[arg(long = "actor")]
        actor: String,

        /// Rejection reason (required with --reject)
        #[arg(long = "reason")]
        reason: Option<String>,
    },

    /// Run the consistency sweep and print its report
    Sweep {
        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum RegisterTarget {
    /// Register a worker
    Worker {
        #[arg(long = "id")]
        id: String,

        /// Cooperative registration number
        #[arg(long = "badge")]
        badge: String,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "sector")]
        sector: Option<String>,
    },

    /// Register a hospital (location)
    Location {
        #[arg(long = "id")]
        id: String,

        /// Short unique name
        #[arg(long = "slug")]
        slug: String,

        #[arg(long = "name")]
        name: String,
    },

    /// Register a sector inside a hospital
    Sector {
        #[arg(long = "id")]
        id: String,

        #[arg(long = "location")]
        location: Option<String>,

        #[arg(long = "name")]
        name: String,
    },
}
