//! Interstitials for the terminal: a single house ad promoting premium.

use async_trait::async_trait;
use disco_coordinator::{AdError, AdNetwork};

const HOUSE_AD: &str = "Sponsored: skip the wait and the ads with `disco premium on`.";

/// Always fills, and "presents" by printing one line to stderr so results
/// on stdout stay clean.
#[derive(Debug, Default)]
pub(crate) struct HouseAdNetwork;

#[async_trait]
impl AdNetwork for HouseAdNetwork {
    async fn load_interstitial(&self) -> Result<(), AdError> {
        tracing::debug!("house ad loaded");
        Ok(())
    }

    fn present(&self) -> Result<(), AdError> {
        eprintln!("{HOUSE_AD}");
        Ok(())
    }
}
