use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacemarkError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("{0} is not on the geocoder allowlist")]
    HostNotAllowed(String),
}

pub type Result<T> = std::result::Result<T, PlacemarkError>;
