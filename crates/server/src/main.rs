use std::{env, path::PathBuf, str::FromStr};

use clap::Parser;
use edgegate_core::start;

#[derive(Parser)]
#[command(name = "edgegate", about = "Basic auth gate for content delivery edges", version)]
struct Cli {
    /// Project directory containing edgegate.yaml (defaults to the current
    /// directory)
    #[arg(long)]
    path: Option<String>,
}

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    let path = match override_path {
        Some(path) => {
            PathBuf::from_str(path).map_err(|_| format!("Invalid path provided: '{}'", path))?
        }
        None => env::current_dir().map_err(|_| "Failed to get current directory.".to_string())?,
    };

    path.canonicalize().map_err(|e| format!("Failed to resolve path '{}': {}", path.display(), e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let project_path = resolve_path(&cli.path).map_err(anyhow::Error::msg)?;

    start(&project_path).await?;

    Ok(())
}
