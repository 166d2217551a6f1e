use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::scheduler::Timing;

/// Rotating slideshow of dog pictures, one breed at a time.
///
/// Type a breed (or `breed/sub-breed`) on stdin to switch, `stop` to stop,
/// `list` to show the catalog and `quit` to exit.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "SLIDESHOW_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Milliseconds between two appended slides
    #[arg(long, env = "SLIDESHOW_INTERVAL_MS", default_value_t = TICK_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Milliseconds between an append and the eviction of the oldest slide
    #[arg(long, env = "SLIDESHOW_EVICTION_DELAY_MS", default_value_t = EVICTION_DELAY_MS)]
    pub eviction_delay_ms: u64,

    /// Print the catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Category to start with
    #[arg(long, conflicts_with = "random")]
    pub category: Option<String>,

    /// Start with a random category
    #[arg(long)]
    pub random: bool,

    /// Exit after this many seconds
    #[arg(long)]
    pub duration_secs: Option<u64>,
}

impl Cli {
    pub fn api_base(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base).map_err(|e| Error::Config(format!("api base {}: {e}", self.api_base)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!("api base must be http(s), got {}", url.scheme())));
        }
        Ok(url)
    }

    pub fn timing(&self) -> Result<Timing> {
        if self.interval_ms == 0 {
            return Err(Error::Config("interval must be at least 1 ms".into()));
        }
        Ok(Timing {
            interval: Duration::from_millis(self.interval_ms),
            eviction_delay: Duration::from_millis(self.eviction_delay_ms),
        })
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }
}
