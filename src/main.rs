use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static site from Markdown pages")]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site: copy static assets and render every page
    Build {
        /// Site config file; paths inside it are relative to its directory
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,
    },
    /// Convert one Markdown file to an HTML fragment
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Build { config } => build(config),
        Command::Render { input, output } => render(input, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn build(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let root = config_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let config = Config::load(&config_path)?.rooted_at(&root);

    let report = mdsite::site::build_site(&config)?;
    println!(
        "Built {} pages and copied {} static files into {}",
        report.pages,
        report.static_files,
        config.paths.output.display()
    );
    Ok(())
}

fn render(input: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(&input)
        .map_err(|e| format!("reading {}: {}", input.display(), e))?;

    let html = mdsite::markdown_to_html(&markdown)?;

    match output {
        Some(path) => {
            fs::write(&path, html).map_err(|e| format!("writing {}: {}", path.display(), e))?;
            println!("Created {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
