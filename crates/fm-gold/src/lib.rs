//! Known-good output fingerprints.
//!
//! A small built-in baseline, optionally extended with the list published by the Gold
//! image-diff service.

mod config;
pub use config::{DEFAULT_HASHES_URL, GoldConfig};

mod errors;
pub use errors::GoldError;

mod known;
pub use known::{BASELINE, KnownFingerprints};

mod fetch;
pub use fetch::{fetch_hashes, load};
