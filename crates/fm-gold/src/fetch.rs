use tracing::{debug, info};

use crate::{config::GoldConfig, errors::GoldError, known::KnownFingerprints};

/// Build the known set for this run: the baseline, plus the remote list when enabled.
///
/// A failed fetch is fatal to the caller; verifying against a partial list would flag
/// everything as novel.
pub async fn load(cfg: &GoldConfig) -> Result<KnownFingerprints, GoldError> {
    let mut known = KnownFingerprints::baseline();
    if !cfg.enabled {
        debug!(target: "fm.gold", "gold disabled; using baseline fingerprints only");
        return Ok(known);
    }

    let body = fetch_hashes(&cfg.hashes_url).await?;
    known.extend_from_text(&body);
    info!(target: "fm.gold", unique = known.len(), "gold knew {} unique hashes", known.len());
    Ok(known)
}

/// GET the hash list as text.
pub async fn fetch_hashes(url: &str) -> Result<String, GoldError> {
    debug!(target: "fm.gold", %url, "fetching known hashes");
    let response = reqwest::Client::new().get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoldError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}
