use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use version_gate::config::AppConfig;
use version_gate::logging::init_logging;
use version_gate::manifest::Manifest;

#[derive(Parser)]
#[command(name = "version-gate")]
#[command(version, about = "Validate and query version-gated registry manifests")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a manifest for invalid or overlapping version ranges
    Check { manifest: PathBuf },
    /// List every signature and its version ranges
    List { manifest: PathBuf },
    /// Print the implementation selected for a target version
    Resolve {
        manifest: PathBuf,
        signature: String,
        version: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    let _guard = init_logging(&config.log)?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Check { manifest } => {
            let registry = load(&manifest)?.build_registry()?;
            for signature in registry.signatures() {
                println!("{}: {} version(s)", signature, registry.num_versions(&signature));
            }
            println!("OK");
        }
        Command::List { manifest } => {
            let registry = load(&manifest)?.build_registry()?;
            for signature in registry.signatures() {
                println!("{}", signature);
                for entry in registry.versions(&signature) {
                    println!("  [{}] {}", entry.interval(), entry.implementation());
                }
            }
        }
        Command::Resolve {
            manifest,
            signature,
            version,
        } => {
            let registry = load(&manifest)?.build_registry()?;
            let implementation = registry.resolve_value(&signature, &version)?;
            println!("{}", implementation);
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Manifest> {
    Manifest::from_path(path).with_context(|| format!("loading manifest {}", path.display()))
}
