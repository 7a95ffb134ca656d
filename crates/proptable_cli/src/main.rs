//! CLI probe over `proptable_core`.
//!
//! # Responsibility
//! - Load a registration manifest and one profile JSON file.
//! - Run list/get/set through the core property provider.
//! - Rewrite the profile only when an edit changed it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proptable_core::{
    default_log_level, init_logging, PropertyProvider, ProfileDocument, RegistrationManifest,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "proptable")]
#[command(about = "Read and edit typed properties stored in a profile JSON file")]
#[command(version)]
struct Cli {
    /// Registration manifest declaring the logical properties
    #[arg(long)]
    manifest: PathBuf,

    /// Profile JSON file used as the property side-table
    #[arg(long)]
    profile: PathBuf,

    /// Absolute directory for rolling log files (logging is off when omitted)
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every property as `name (kind)=value`
    List,
    /// Print one property value
    Get { name: String },
    /// Set one property from its canonical text
    Set { name: String, text: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir).context("failed to initialize logging")?;
    }

    let registry = RegistrationManifest::from_path(&cli.manifest)
        .and_then(RegistrationManifest::into_registry)
        .with_context(|| format!("failed to load manifest `{}`", cli.manifest.display()))?;
    let provider = PropertyProvider::new(Arc::new(registry));
    let mut document = load_profile(&cli.profile)?;

    match cli.command {
        Command::List => {
            for descriptor in provider.registry().iter() {
                let name = descriptor.logical_name();
                println!(
                    "{name} ({})={}",
                    descriptor.kind(),
                    document.property_text(&provider, name)?
                );
            }
        }
        Command::Get { name } => {
            println!("{}", document.property_text(&provider, &name)?);
        }
        Command::Set { name, text } => {
            let changed = document.set_property_text(&provider, &name, &text)?;
            if document.is_dirty() {
                save_profile(&cli.profile, &document)?;
                document.mark_clean();
            }
            println!("changed={changed}");
        }
    }

    Ok(())
}

fn load_profile(path: &Path) -> Result<ProfileDocument> {
    if !path.exists() {
        return Ok(ProfileDocument::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile `{}`", path.display()))?;
    ProfileDocument::from_json_str(&text)
        .with_context(|| format!("failed to parse profile `{}`", path.display()))
}

fn save_profile(path: &Path, document: &ProfileDocument) -> Result<()> {
    let text = document.to_json_string_pretty()?;
    std::fs::write(path, text + "\n")
        .with_context(|| format!("failed to write profile `{}`", path.display()))
}
