use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liveedit")]
#[command(about = "Live HTML/CSS/JS snippet editor backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "LIVEEDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Projects file, overrides the config value
    #[arg(long, global = true, env = "LIVEEDIT_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Directory with the editor's static assets
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage saved projects
    #[command(subcommand)]
    Project(ProjectCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects, newest first
    List,

    /// Show project details
    Show {
        /// Project ID
        id: String,
    },

    /// Save a project from files, replacing any project with the same name
    Save {
        /// Name of the project
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// File with the body markup
        #[arg(long)]
        markup: Option<PathBuf>,

        /// File with the stylesheet
        #[arg(long)]
        style: Option<PathBuf>,

        /// File with the script
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: String,
    },

    /// Print the composed preview document of a project
    Render {
        /// Project ID
        id: String,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
