use thiserror::Error;

/// Failure raised by an [`HttpClient`](crate::HttpClient) before a usable
/// response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Request(#[source] reqwest::Error),

    #[error("http status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("connection error: {message}")]
    Connection { message: String },
}

// reqwest embeds the full request URL, query credentials included, in its
// error text.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: TransportError,
    },

    #[error("missing access token")]
    MissingAccessToken { body: String },

    #[error("response not in expected format, got: {body}")]
    MalformedResponse { body: String },

    #[error(
        "response missing required fields: {}; got: {}",
        .missing.join(", "),
        .present.join(", ")
    )]
    MissingFields {
        missing: Vec<String>,
        present: Vec<String>,
    },

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing authorization code in callback url")]
    MissingAuthorizationCode,
}

/// Pipeline stage an [`AdapterError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    TokenExtraction,
    MalformedResponse,
    MissingField,
    Configuration,
}

impl AdapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::MissingAccessToken { .. } => ErrorKind::TokenExtraction,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::MissingFields { .. } => ErrorKind::MissingField,
            Self::Url(_) | Self::Json(_) | Self::Http(_) | Self::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
            Self::MissingAuthorizationCode => ErrorKind::Configuration,
        }
    }
}

impl From<TransportError> for AdapterError {
    fn from(source: TransportError) -> Self {
        Self::Transport { source }
    }
}
