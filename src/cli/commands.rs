use clap::Subcommand;

use crate::config::DEFAULT_DATABASE_URL;

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Initialize the database schema
    Init {
        /// Database URL (sqlite://path or a file path)
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a new user account
    Add {
        /// Database URL (sqlite://path or a file path)
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,

        /// Login name for the new user
        #[arg(long)]
        name: Option<String>,

        /// Password for the new user (prompted for when omitted)
        #[arg(long, env = "JOTTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Skip interactive prompts (requires --name and --password)
        #[arg(long)]
        non_interactive: bool,
    },

    /// List user accounts
    List {
        /// Database URL (sqlite://path or a file path)
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
