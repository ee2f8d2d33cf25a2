//! Brandmark CLI
//!
//! Walks through the brand workflow against a Brandmark server: describe the
//! brand, generate logo concepts, turn concepts into images and download them.

mod api;
mod commands;
mod config;
mod output;
mod progress;
mod repl;
mod session;
mod workflow;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Brandmark - AI logo workshop
#[derive(Parser)]
#[command(name = "brandmark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Describe a brand, generate logo concepts and images")]
#[command(long_about = r##"
Brandmark talks to a Brandmark server to turn a brand description into logo
concepts and logo images.

Examples:
  brandmark                                   # Interactive session
  brandmark health                            # Check the server
  brandmark concepts -n Acme -d "Rockets" -c "#3B82F6" -t bold
  brandmark logo "A rocket mark" --brand Acme --download
"##)]
struct Cli {
    /// Server URL (overrides server.url from the config file)
    #[arg(long, env = "BRANDMARK_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the server is up
    Health,

    /// Generate logo concepts for a brand
    Concepts {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Hex colour, repeatable
        #[arg(short, long = "color")]
        colors: Vec<String>,

        /// modern, classic, playful, professional or bold
        #[arg(short, long)]
        tone: Option<String>,

        #[arg(short, long)]
        industry: Option<String>,

        #[arg(short, long)]
        audience: Option<String>,
    },

    /// Generate one logo image from a concept
    Logo {
        prompt: String,

        #[arg(short, long)]
        brand: Option<String>,

        /// Save the image to the download directory
        #[arg(long)]
        download: bool,
    },

    /// Download a generated image through the server
    Download {
        url: String,

        #[arg(short, long)]
        filename: Option<String>,

        #[arg(short, long)]
        brand: Option<String>,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a configuration value (key=value)
        #[arg(long)]
        set: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("brandmark_cli={},warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = config::Config::load()?;
    let server_url = cli.server.clone().unwrap_or_else(|| config.server.url.clone());
    let api = api::ApiClient::new(&server_url);

    match cli.command {
        Some(Commands::Health) => commands::health(&api).await?,
        Some(Commands::Concepts {
            name,
            description,
            colors,
            tone,
            industry,
            audience,
        }) => {
            let args = commands::BrandArgs {
                name,
                description,
                colors,
                tone,
                industry,
                audience,
            };
            commands::concepts(&api, args).await?;
        }
        Some(Commands::Logo {
            prompt,
            brand,
            download,
        }) => commands::logo(&api, &config, prompt, brand, download).await?,
        Some(Commands::Download {
            url,
            filename,
            brand,
        }) => commands::download(&api, &config, url, filename, brand).await?,
        Some(Commands::Config { show, set }) => match set {
            Some(kv) if !show => commands::set_config(&mut config, &kv)?,
            _ => commands::show_config(&config)?,
        },
        None => {
            let mut repl = repl::BrandRepl::new(api, config)?;
            repl.run().await?;
        }
    }

    Ok(())
}
