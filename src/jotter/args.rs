use clap::{Parser, Subcommand};

pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(version = VERSION)]
#[command(about = "Read a personal notebook served over a REST API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the content API base URL
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Don't touch the terminal window title
    #[arg(long, global = true)]
    pub no_title: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the home view (recent pages and the tag listing)
    #[command(alias = "h")]
    Home,

    /// Show a page
    #[command(alias = "p")]
    Page {
        /// Id of the page
        id: String,
    },

    /// Show a tag and its pages
    #[command(alias = "t")]
    Tag {
        /// Id of the tag
        id: String,
    },

    /// Navigate a raw path (e.g. "/", "/tag/rust", "/sorry")
    #[command(alias = "o")]
    Open {
        /// The path to navigate
        path: String,
    },
}

impl Commands {
    /// The URL path a command navigates to.
    pub fn path(&self) -> String {
        match self {
            Commands::Home => "/".to_string(),
            Commands::Page { id } => format!("/{}", id),
            Commands::Tag { id } => format!("/tag/{}", id),
            Commands::Open { path } => path.clone(),
        }
    }
}
