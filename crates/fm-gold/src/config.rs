/// Published list of every hash Gold has triaged, one per line.
pub const DEFAULT_HASHES_URL: &str =
    "https://storage.googleapis.com/skia-infra-gm/hash_files/gold-prod-hashes.txt";

#[derive(Debug, Clone)]
pub struct GoldConfig {
    /// Fetch the remote list and verify fingerprints against it.
    pub enabled: bool,
    pub hashes_url: String,
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hashes_url: DEFAULT_HASHES_URL.to_string(),
        }
    }
}
