use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use jotter::app;
use jotter::config::JotterConfig;
use jotter::controllers::{NullTitle, TermTitle, TitleSink};
use jotter::error::Result;
use jotter::views::Viewport;
use tracing_subscriber::EnvFilter;

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config()?;
    if let Some(api) = &cli.api {
        config.api_url = api.clone();
    }

    let term = Term::stdout();
    let sink: Box<dyn TitleSink> = if cli.no_title || !term.is_term() {
        Box::new(NullTitle)
    } else {
        Box::new(TermTitle)
    };
    let viewport = viewport_of(&term);

    let mut app = app::connect(&config, sink, viewport)?;

    let path = match cli.command {
        Some(command) => command.path(),
        None => "/".to_string(),
    };
    app.goto(&path);

    // The error view is a view, not a process failure; the exit code stays 0.
    print!("{}", app.show());
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("jotter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Result<JotterConfig> {
    let Some(proj_dirs) = ProjectDirs::from("com", "jotter", "jotter") else {
        return Ok(JotterConfig::default());
    };
    JotterConfig::load(proj_dirs.config_dir())
}

fn viewport_of(term: &Term) -> Viewport {
    if term.is_term() {
        let (rows, cols) = term.size();
        Viewport {
            width: cols as usize,
            height: rows as usize,
        }
    } else {
        Viewport::default()
    }
}
