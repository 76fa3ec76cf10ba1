mod config;
mod contact;
mod content;
mod errors;
mod models;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contact::LogNotifier;
use crate::content::ContentStore;
use crate::models::resume::ResumeDocument;
use crate::resume::builder::{extract_header, extract_summary};
use crate::resume::codegen::{
    experience_literal, hero_literal, patch_file, PatchOutcome, PatchTarget,
    EXPERIENCE_DECLARATION, HERO_DECLARATION,
};
use crate::resume::export::export_json;
use crate::resume::{build_resume, parse_report, ParserProfile};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site backend: résumé sync, content API and contact form", long_about = None)]
struct Cli {
    /// Résumé markdown file (overrides RESUME_PATH)
    #[arg(long, global = true)]
    resume: Option<PathBuf>,

    /// Parser profile: standard or extended (overrides RESUME_PROFILE)
    #[arg(long, global = true)]
    profile: Option<ParserProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the résumé and print a report
    Parse,
    /// Regenerate the experiences array in the Experience component
    SyncExperience {
        /// Component file to patch (overrides EXPERIENCE_TARGET)
        #[arg(short, long)]
        target: Option<PathBuf>,
    },
    /// Regenerate the hero content object in the Hero component
    SyncHero {
        /// Component file to patch (overrides HERO_TARGET)
        #[arg(short, long)]
        target: Option<PathBuf>,
    },
    /// Write the parsed résumé as a JSON data file
    Export {
        /// Output path (overrides DATA_OUT)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.resume {
        config.resume_path = path;
    }
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Parse => {
            let resume = load_resume(&config)?;
            print!("{}", parse_report(&resume));
        }
        Commands::SyncExperience { target } => {
            let target = target.unwrap_or_else(|| config.experience_target.clone());
            let resume = load_resume(&config)?;
            let literal = experience_literal(&resume.experiences, EXPERIENCE_DECLARATION);
            let outcome = patch_file(&target, &PatchTarget::experiences(), &literal)?;
            report_patch(&target, outcome);
            print!("{}", parse_report(&resume));
        }
        Commands::SyncHero { target } => {
            let target = target.unwrap_or_else(|| config.hero_target.clone());
            let text = read_resume(&config.resume_path)?;
            let header = extract_header(&text)?;
            let summary = extract_summary(&text);
            let literal = hero_literal(&header, &summary, HERO_DECLARATION);
            let outcome = patch_file(&target, &PatchTarget::hero(), &literal)?;
            report_patch(&target, outcome);
        }
        Commands::Export { out } => {
            let out = out.unwrap_or_else(|| config.data_out.clone());
            let resume = load_resume(&config)?;
            export_json(&resume, &out)?;
            print!("{}", parse_report(&resume));
        }
        Commands::Serve => serve(config).await?,
    }

    Ok(())
}

fn read_resume(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read résumé at {}", path.display()))
}

fn load_resume(config: &Config) -> Result<ResumeDocument> {
    let text = read_resume(&config.resume_path)?;
    build_resume(&text, &config.profile)
        .with_context(|| format!("Failed to parse {}", config.resume_path.display()))
}

fn report_patch(target: &Path, outcome: PatchOutcome) {
    match outcome {
        PatchOutcome::Updated => println!("Updated {}", target.display()),
        PatchOutcome::Unchanged => println!("{} is already up to date", target.display()),
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let content = ContentStore::load_dir(&config.content_dir)
        .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?;
    if content.is_empty() {
        warn!("No blog posts or case studies found under {}", config.content_dir.display());
    }
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let state = AppState::new(config, content, Arc::new(LogNotifier));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
