use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("backend URL is not configured (set STUDYGENIE_BACKEND_URL or pass --backend-url)")]
    MissingBaseUrl,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
