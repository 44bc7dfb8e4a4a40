use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldError {
    #[error("hash list request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("hash list request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}
