use std::fmt;
use std::time::Duration;

use crate::ProfileRecord;

/// Application credentials registered with the provider.
#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Which profile keys must be present for a fetch to succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Return whatever the provider sent.
    #[default]
    Lenient,
    Require(Vec<String>),
}

impl FieldPolicy {
    pub fn require<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Require(fields.into_iter().map(Into::into).collect())
    }

    /// Required fields absent from `record`, in policy order.
    pub fn missing(&self, record: &ProfileRecord) -> Vec<String> {
        match self {
            Self::Lenient => Vec::new(),
            Self::Require(fields) => fields
                .iter()
                .filter(|field| !record.has(field))
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub credentials: Credentials,
    pub timeout: Option<Duration>,
    pub field_policy: FieldPolicy,
    pub dialog_params: Vec<(String, String)>,
    pub appsecret_proof: bool,
}

impl AdapterConfig {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self::from_credentials(Credentials::new(app_id, app_secret, redirect_uri))
    }

    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout: None,
            field_policy: FieldPolicy::default(),
            dialog_params: Vec::new(),
            appsecret_proof: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_field_policy(mut self, field_policy: FieldPolicy) -> Self {
        self.field_policy = field_policy;
        self
    }

    pub fn with_required_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_field_policy(FieldPolicy::require(fields))
    }

    pub fn with_dialog_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dialog_params.push((key.into(), value.into()));
        self
    }

    /// Signs profile requests with `appsecret_proof`.
    pub fn with_appsecret_proof(mut self, enabled: bool) -> Self {
        self.appsecret_proof = enabled;
        self
    }
}
