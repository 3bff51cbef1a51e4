//! pf-data CLI
//!
//! Command-line client for the population API:
//! - List and search prefectures
//! - Chart population series for selected prefectures
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pf_data::chart::{render_svg, render_table};
use pf_data::config::generate_default_config;
use pf_data::{resolve_selectors, ChartView, Config, HttpClient, Session};

#[derive(Parser)]
#[command(name = "pf-data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Population trends of Japanese prefectures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List prefectures
    Prefectures {
        /// Only show prefectures whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Fetch and chart population series
    Chart {
        /// Prefecture codes or names
        #[arg(required = true)]
        prefectures: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the chart as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, report) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, report) = Config::load_default();
            (config, Some(report))
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    pf_data::logging::init_logging(&config.logging)?;
    if let Some(report) = report {
        report.log();
    }
    tracing::debug!("pf-data v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Prefectures { search } => {
            let client = HttpClient::from_config(&config.api)?;
            let mut session = Session::new(client, config.chart.clone());

            if !session.mount().await {
                eprintln!("Cannot load prefectures from {}", config.api.base_url);
                std::process::exit(1);
            }

            let options = match search.as_deref() {
                Some(query) => session.search(query),
                None => session.options(),
            };

            if options.is_empty() {
                println!("No matching prefectures.");
            } else {
                println!("{:<6} {}", "Code", "Name");
                println!("{}", "-".repeat(24));
                for option in options {
                    println!("{:<6} {}", option.value, option.label);
                }
            }
        }

        Commands::Chart {
            prefectures,
            format,
            svg,
        } => {
            let client = HttpClient::from_config(&config.api)?;
            let mut session = Session::new(client, config.chart.clone());

            // Codes still work without a directory; names will not resolve.
            session.mount().await;

            let codes = resolve_selectors(session.directory(), &prefectures)?;
            session.select(Some(codes)).await;

            let view = session.view();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                OutputFormat::Table => match &view {
                    ChartView::Placeholder { message } => println!("{}", message),
                    ChartView::Chart(model) => {
                        println!("{}", model.title);
                        println!();
                        print!("{}", render_table(model));
                    }
                },
            }

            if let (Some(path), Some(model)) = (svg, view.model()) {
                let document = render_svg(model, config.chart.width, config.chart.height)?;
                std::fs::write(&path, document)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                eprintln!("Chart written to {:?}", path);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}
