//! avinfo-probe
//!
//! Runs the Qiniu video analyzer against one stored key and prints the
//! resulting metadata as JSON.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qiniu_video_analyzer::{AnalyzerConfig, Blob, QiniuVideoAnalyzer, Result};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "avinfo-probe";

#[derive(Parser, Debug, Clone)]
#[command(name = "avinfo-probe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bucket domain, overrides the configuration file
    #[arg(short, long)]
    domain: Option<String>,

    /// URL scheme (http or https), overrides the configuration file
    #[arg(short, long)]
    protocol: Option<String>,

    /// Declared content type of the stored file
    #[arg(short = 't', long, default_value = "video/mp4")]
    content_type: String,

    /// Storage key of the video
    key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(domain) = args.domain {
        config.service.domain = domain;
    }
    if let Some(protocol) = args.protocol {
        config.service.protocol = protocol;
    }

    init_logging(&config.logging.level);
    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    config.validate()?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let blob = Blob::new(args.key).with_content_type(args.content_type);
    if !QiniuVideoAnalyzer::accept(&blob) {
        tracing::warn!(
            "{} is not a video ({}), nothing to analyze",
            blob.key,
            blob.content_type.as_deref().unwrap_or("unknown")
        );
        println!("{{}}");
        return Ok(());
    }

    let analyzer = QiniuVideoAnalyzer::from_config(&config)?;
    let meta = analyzer.metadata(&blob).await;
    println!("{}", serde_json::to_string_pretty(&meta)?);

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qiniu_video_analyzer={level},avinfo_probe={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["avinfo-probe", "-d", "cdn.example.com", "videos/a.mp4"]);
        assert_eq!(args.domain.as_deref(), Some("cdn.example.com"));
        assert_eq!(args.content_type, "video/mp4");
        assert_eq!(args.key, "videos/a.mp4");
        assert!(args.config.is_none());
    }
}
