use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use local_guide_lib::{
    config::Config,
    logging,
    preprocessing::Selections,
    render::render_page,
    serve, AppState, GuideService,
};

#[derive(Parser, Debug)]
#[command(name = "local-guide", version, about = "AI Local Guide: narrated guides for monuments and sites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the single-page guide UI
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8501
        #[arg(long, env = "BIND_ADDR")]
        bind: Option<String>,
    },
    /// Generate one guide and write the rendered page
    Generate {
        #[arg(long)]
        location: String,
        /// Synopsis, Story or Long Story
        #[arg(long)]
        duration: Option<String>,
        /// History, Fun Facts, Surprising Facts or Architecture
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Voice id or description (first prompt revision only)
        #[arg(long)]
        voice: Option<String>,
        /// v1, v2 or v3
        #[arg(long)]
        revision: Option<String>,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    if let Some(warning) = config.credential_warning() {
        warn!(missing = ?warning.missing, "{}", warning);
    }

    match cli.command {
        Command::Serve { bind } => {
            serve(&config, bind.as_deref())
                .await
                .context("Server stopped with an error")?;
        }
        Command::Generate {
            location,
            duration,
            topic,
            language,
            voice,
            revision,
            output,
        } => {
            let selections = Selections {
                location,
                duration,
                topic,
                language,
                voice,
                revision,
            };
            let state = AppState::new(
                GuideService::from_config(&config)?,
                config.credential_warning(),
            );
            let html = render_page(&state.generate_page(selections).await);

            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Guide page written");
                }
                None => println!("{}", html),
            }
        }
    }

    Ok(())
}
