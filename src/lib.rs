//! OAuth authorization-code exchange and profile lookup for Graph-style
//! social-login providers (Facebook by default).
//!
//! The HTTP transport and the error sink are injected, so the adapter can be
//! driven by `reqwest` in production and by in-memory doubles in tests.

mod adapter;
mod config;
mod error;
mod http;
mod logger;
mod provider;
mod providers;
mod types;

pub use adapter::ProviderApiAdapter;
pub use config::{AdapterConfig, Credentials, FieldPolicy};
pub use error::{AdapterError, ErrorKind, TransportError};
pub use http::{ApiRequest, ApiResponse, HttpClient};
pub use logger::{ErrorLogger, LogContext, TracingLogger};
pub use providers::{CustomProvider, FacebookProvider, GraphProvider};
pub use types::{AccessToken, AuthorizationResponse, ProfileFields, ProfileRecord, TokenResponse};
