use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed CSV from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: csv::Error,
    },

    #[error("feed at {url} has no header row")]
    MissingHeader { url: String },
}
