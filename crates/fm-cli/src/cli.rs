//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Foreman - inspect and manage the builders and masters of a CI installation
#[derive(Parser, Debug)]
#[command(name = "fm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to foreman.yml (default: ./foreman.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path (also FOREMAN_DATABASE)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and apply migrations
    Init,

    /// Builder lookup, master links, and descriptive info
    Builders(BuildersArgs),

    /// Master lookup and active/inactive state
    Masters(MastersArgs),

    /// Project lookup
    Projects(ProjectsArgs),
}

/// Arguments for the builders command
#[derive(Args, Debug)]
pub struct BuildersArgs {
    #[command(subcommand)]
    pub command: BuildersCommands,
}

/// Builders subcommands
#[derive(Subcommand, Debug)]
pub enum BuildersCommands {
    /// List builders
    List {
        /// Only builders linked to this master
        #[arg(long)]
        master: Option<i64>,

        /// Only builders in this project
        #[arg(long)]
        project: Option<i64>,
    },

    /// Show a single builder
    Show {
        /// Builder id
        id: i64,
    },

    /// Print the id of a builder, creating it unless --no-create is given
    Find {
        /// Builder name (case-sensitive)
        name: String,

        /// Do not create a missing builder
        #[arg(long)]
        no_create: bool,
    },

    /// Link a builder to a master
    AddMaster {
        /// Builder id
        builderid: i64,

        /// Master id
        masterid: i64,
    },

    /// Unlink a builder from a master
    RemoveMaster {
        /// Builder id
        builderid: i64,

        /// Master id
        masterid: i64,
    },

    /// Overwrite description and project and replace the tag set
    UpdateInfo {
        /// Builder id
        id: i64,

        /// New description (cleared when omitted)
        #[arg(long)]
        description: Option<String>,

        /// New project id (cleared when omitted)
        #[arg(long)]
        project: Option<i64>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

/// Arguments for the masters command
#[derive(Args, Debug)]
pub struct MastersArgs {
    #[command(subcommand)]
    pub command: MastersCommands,
}

/// Masters subcommands
#[derive(Subcommand, Debug)]
pub enum MastersCommands {
    /// List masters
    List,

    /// Show a single master
    Show {
        /// Master id
        id: i64,
    },

    /// Print the id of a master, creating it if needed
    Find {
        /// Master name (default: master.name from foreman.yml)
        name: Option<String>,
    },

    /// Mark a master active
    Activate {
        /// Master id
        id: i64,
    },

    /// Mark a master inactive and release its schedulers
    Deactivate {
        /// Master id
        id: i64,
    },
}

/// Arguments for the projects command
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommands,
}

/// Projects subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectsCommands {
    /// List projects
    List,

    /// Print the id of a project, creating it unless --no-create is given
    Find {
        /// Project name (case-sensitive)
        name: String,

        /// Do not create a missing project
        #[arg(long)]
        no_create: bool,
    },
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
