use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use proposal_forge::clients::{AiProvider, ProviderKind};
use proposal_forge::config::{Config, DEFAULT_LOG_LEVEL, RuntimeConfig};
use proposal_forge::export::{
    ExportSummary, JsonRenderer, MarkdownRenderer, ProposalRenderer, write_error, write_summary,
};
use proposal_forge::input::{RawInput, keys};
use proposal_forge::proposal::ProposalAssembler;

#[derive(Parser, Debug)]
#[command(name = "proposal-forge")]
#[command(about = "Generate a structured research proposal from a few facts", long_about = None)]
struct Cli {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    question: Option<String>,
    #[arg(long)]
    methodology: Option<String>,
    #[arg(long)]
    outcomes: Option<String>,
    /// Researcher name
    #[arg(long)]
    name: Option<String>,
    /// Field of study (Sciences, Social Sciences, Humanities, Engineering, Medical, Business)
    #[arg(long)]
    field: Option<String>,
    /// Duration in months, 1-60
    #[arg(long)]
    duration: Option<String>,
    /// Grant Application, Thesis Proposal, Research Project or Conference Abstract
    #[arg(long)]
    proposal_type: Option<String>,
    /// Total budget, e.g. "$50,000"
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    institution: Option<String>,
    #[arg(long)]
    references: Option<String>,
    /// openai, anthropic or none
    #[arg(long)]
    provider: Option<String>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Skip the AI provider and use templates only
    #[arg(long)]
    no_ai: bool,
}

impl Cli {
    /// Flag value for an input key, if the flag was given
    fn flag(&self, key: &str) -> Option<String> {
        let value = match key {
            keys::TITLE => &self.title,
            keys::QUESTION => &self.question,
            keys::METHODOLOGY => &self.methodology,
            keys::OUTCOMES => &self.outcomes,
            keys::RESEARCHER => &self.name,
            keys::FIELD => &self.field,
            keys::DURATION => &self.duration,
            keys::PROPOSAL_TYPE => &self.proposal_type,
            keys::BUDGET => &self.budget,
            keys::INSTITUTION => &self.institution,
            keys::REFERENCES => &self.references,
            _ => return None,
        };
        value.clone()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG may come from the env file
    Config::load_env_file();
    let runtime = RuntimeConfig::load_from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut error_dir = cli
        .output_dir
        .clone()
        .or_else(|| std::env::var_os("PROPOSAL_OUTPUT_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("output"));

    let result = match Config::load().context("Failed to load configuration") {
        Ok(mut config) => {
            config.apply_cli_overrides(cli.provider.as_deref(), cli.output_dir.as_deref());
            error_dir = config.output.dir.clone();
            run(&cli, config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        let message = format!("{:#}", e);
        error!("Proposal generation failed: {}", message);
        eprintln!("Error: {}", message);

        if let Err(write_err) = write_error(&error_dir, &message) {
            eprintln!("Could not write error report: {}", write_err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: Config) -> Result<()> {
    let provider = if cli.no_ai || config.provider.kind() == ProviderKind::None {
        AiProvider::disabled()
    } else {
        AiProvider::from_config(&config)
    };
    if !provider.available() {
        info!("Using template-based generation");
    }

    let raw = RawInput::from_lookup(|key| cli.flag(key).or_else(|| std::env::var(key).ok()))?;
    let payload = ProposalAssembler::new(&provider)
        .assemble(&raw, Local::now().date_naive())
        .await?;
    if payload.enhancements.any() {
        info!(
            "Input enhancement: improved {}",
            payload.enhancements.changed_fields().join(", ")
        );
    }

    let dir = &config.output.dir;
    let mut renderers: Vec<Box<dyn ProposalRenderer>> = Vec::new();
    if config.output.write_markdown {
        renderers.push(Box::new(MarkdownRenderer));
    }
    if config.output.write_json {
        renderers.push(Box::new(JsonRenderer));
    }

    let mut written = Vec::with_capacity(renderers.len());
    for renderer in &renderers {
        let path = renderer
            .render(&payload, dir)
            .with_context(|| format!("Failed to write {}", renderer.file_name()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    let summary = ExportSummary {
        written,
        sections: payload.sections.count(),
        ai_used: payload.metadata.ai_used,
        provider: payload.metadata.provider.clone(),
    };
    let summary_path = write_summary(dir, &summary).context("Failed to write summary")?;
    info!("Proposal ready: {}", summary_path.display());
    println!("Research proposal written to {}", dir.display());
    Ok(())
}
