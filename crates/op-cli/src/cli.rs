//! Command line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use op_core::traits::Id;

#[derive(Debug, Parser)]
#[command(name = "op")]
#[command(about = "Inspect and change work packages of a seeded project tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// YAML file the in-memory database is loaded from
    #[arg(short, long, env = "OPENPROJECT_SEED", default_value = "seed.yaml", global = true)]
    pub seed: PathBuf,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Statuses a user may move a work package to
    Statuses {
        work_package: Id,

        /// Login of the acting user
        #[arg(short, long, default_value = "admin")]
        user: String,

        /// Also offer the default status
        #[arg(long)]
        include_default: bool,
    },

    /// Move a work package to another project
    Move {
        work_package: Id,

        /// Identifier of the target project
        #[arg(long)]
        to: String,

        /// Name of the type to switch to
        #[arg(long = "type")]
        type_name: Option<String>,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Count work packages of a project by status and attribute
    GroupBy {
        /// Project identifier
        project: String,

        /// type, version, priority, category, assigned_to, author or subproject
        attribute: String,
    },

    /// Mail addresses told about changes to a work package
    Recipients { work_package: Id },

    /// Planned duration of a work package in days
    Duration { work_package: Id },
}
