// src/cli.rs
use crate::config::{AppConfig, ConfigManager};
use crate::generator::{CvGenerator, GenerationOptions};
use crate::preview::CvPreview;
use crate::types::CvRecord;
use crate::web::{start_web_server, ServerConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "cvgen")]
#[command(about = "Generate Word CVs from structured records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CvCommand,

    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum CvCommand {
    /// Generate a .docx CV from a JSON, YAML or TOML record
    Generate {
        #[arg(short, long)]
        input: PathBuf,
        /// Defaults to the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Rewrite sections through the text generation API
        #[arg(long)]
        enhance: bool,
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Show what a record contains
    Preview {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Start the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load_with(&cli.config)?;

    match cli.command {
        CvCommand::Generate {
            input,
            output_dir,
            enhance,
            api_key,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let options = GenerationOptions {
                enhance,
                api_key: api_key.or_else(|| config.api_key.clone()),
            };
            let generated = generate_to_dir(&config, &input, &output_dir, &options).await?;

            for warning in &generated.warnings {
                println!("⚠️  {}", warning);
            }
            if generated.enhanced {
                println!("🤖 Sections were enhanced with AI");
            }
            println!("✓ CV written to {}", generated.path.display());
        }

        CvCommand::Preview { input } => {
            let record = CvRecord::from_file(&input)?;
            let preview = CvPreview::from_record(&record);
            println!(
                "{}",
                serde_json::to_string_pretty(&preview).context("Failed to serialize preview")?
            );
        }

        CvCommand::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let server_config = ServerConfig {
                enhancer: config.enhancer.clone(),
                default_api_key: config.api_key.clone(),
                backend: None,
            };
            start_web_server(server_config, port).await?;
        }
    }

    Ok(())
}

pub struct GeneratedFile {
    pub path: PathBuf,
    pub enhanced: bool,
    pub warnings: Vec<String>,
}

/// Read a record, generate its CV and write it into `output_dir`.
pub async fn generate_to_dir(
    config: &AppConfig,
    input: &Path,
    output_dir: &Path,
    options: &GenerationOptions,
) -> Result<GeneratedFile> {
    let record = CvRecord::from_file(input)?;
    let generator = CvGenerator::new(config.enhancer.clone());
    let cv = generator.generate(&record, options).await?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let path = output_dir.join(&cv.filename);
    tokio::fs::write(&path, &cv.data)
        .await
        .with_context(|| format!("Failed to write CV: {}", path.display()))?;

    info!("Wrote {} ({} bytes)", path.display(), cv.data.len());
    Ok(GeneratedFile {
        path,
        enhanced: cv.enhanced,
        warnings: cv.warnings,
    })
}
