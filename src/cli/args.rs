use clap::{Args, Parser, Subcommand};

/// Demo account accepted by the hosted CRM API.
pub const DEMO_EMAIL: &str = "michael.scott@dundermifflin.com";

#[derive(Parser, Debug)]
#[command(name = "crmc", version = env!("CRMC_VERSION"), about = "Work with companies, tasks and users in a hosted CRM")]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (uses human-readable format without ANSI codes)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Display timestamps in UTC instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    /// GraphQL endpoint to use instead of the configured one
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output for debugging API calls and session handling
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Session Commands ===
    /// Sign in and store the access token
    Login {
        /// Account email
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,

        /// Account password (accepted for compatibility; login is by email only)
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove the stored access token
    Logout,

    /// Check whether the stored token is still accepted
    Check,

    /// Show the signed-in user
    #[command(visible_alias = "me")]
    Whoami,

    // === Resource Commands ===
    /// Browse and create companies
    Companies {
        #[command(subcommand)]
        action: CompaniesAction,
    },

    /// Browse tasks
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },

    /// Browse users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Run a raw GraphQL document and print its data
    Query {
        /// GraphQL document, or @path to read it from a file
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PagingArgs {
    /// Maximum number of records to fetch
    #[arg(long, default_value = "20")]
    pub limit: u32,

    /// Number of records to skip
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

#[derive(Subcommand, Debug)]
pub enum CompaniesAction {
    /// List companies, newest first
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Create a company
    Create {
        /// Company name
        #[arg(long)]
        name: String,

        /// ID of the user who owns the account (see `crmc users list`)
        #[arg(long)]
        sales_owner: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksAction {
    /// List tasks, newest first
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        paging: PagingArgs,

        /// Group tasks by stage
        #[arg(long)]
        by_stage: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// List users
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        paging: PagingArgs,
    },
}
