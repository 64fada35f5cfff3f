//! feedstream CLI — stream a feed export and process it at scale.
//!
//! ```bash
//! API_TOKEN=... feedstream --feed-type anonymous
//! API_TOKEN=... feedstream --feed-type anonymous-residential --serial
//! ```
//!
//! Failures print a single diagnostic line and the run ends early; a
//! successful run prints the elapsed time and the total records processed.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use feedstream_core::{
    FeedError, FeedKind, FeedPipeline, NoopProcessor, PipelineBuilder, ProcessingMode,
};
use feedstream_http::{token_from_env, FeedClient, FeedClientConfig};

#[derive(Parser)]
#[command(
    name = "feedstream",
    about = "Stream and process data for a specified feed type",
    version
)]
struct Cli {
    /// Type of feed to process
    #[arg(long, value_enum, default_value = "anonymous")]
    feed_type: FeedType,

    /// Process records one at a time instead of in parallel batches
    #[arg(long)]
    serial: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FeedType {
    Anonymous,
    AnonymousResidential,
}

impl From<FeedType> for FeedKind {
    fn from(value: FeedType) -> Self {
        match value {
            FeedType::Anonymous => FeedKind::Anonymous,
            FeedType::AnonymousResidential => FeedKind::AnonymousResidential,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let feed: FeedKind = cli.feed_type.into();
    let mode = if cli.serial {
        ProcessingMode::Serial
    } else {
        ProcessingMode::Parallel
    };

    // Credential check happens before any network call.
    let token = match token_from_env() {
        Ok(token) => token,
        Err(e) => return diagnose(e),
    };

    let client = FeedClient::new(FeedClientConfig::new(token))?;
    let reader = match client.open(feed).await {
        Ok(reader) => reader,
        Err(e) => return diagnose(e),
    };

    let config = PipelineBuilder::new().feed(feed).mode(mode).build_config();
    let pipeline = FeedPipeline::new(config, Arc::new(NoopProcessor));
    match pipeline.run(reader).await {
        Ok(report) => {
            println!("{report}");
            Ok(())
        }
        Err(e) => diagnose(e),
    }
}

/// Report a run failure: one diagnostic line, then early return. There is no
/// exit-code contract beyond normal termination.
fn diagnose(e: FeedError) -> Result<()> {
    eprintln!("{e}");
    Ok(())
}
