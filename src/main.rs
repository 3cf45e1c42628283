//! helpspot - smoke test for a HelpSpot installation
//!
//! Calls `version` and `private.version` and checks that both succeed and
//! agree, which proves the URL is right, the public and private APIs are
//! enabled, and the staff credentials work.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `HELPSPOT_URL`: Base URL of the HelpSpot installation
//! - `HELPSPOT_USER`: Staff username
//! - `HELPSPOT_PASSWORD`: Staff password
//!
//! # Usage
//!
//! ```bash
//! HELPSPOT_URL=https://helpdesk.example.com/help HELPSPOT_USER=you@example.com \
//!     HELPSPOT_PASSWORD=xxx ./helpspot
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use helpspot::{config, HelpSpotClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("helpspot=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("Starting helpspot v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = HelpSpotClient::new(&config).context("Failed to create HelpSpot client")?;

    let (public, private) = client
        .test_connection()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Connection test failed"))
        .context("HelpSpot smoke test failed")?;

    println!("version returned {}", public);
    println!("private.version returned {}", private);

    Ok(())
}
