use crate::GraphProvider;

// References:
// - https://developers.facebook.com/docs/facebook-login/guides/advanced/manual-flow
// - https://developers.facebook.com/docs/graph-api/securing-requests#appsecret_proof

const DIALOG_BASE: &str = "https://www.facebook.com";
const GRAPH_BASE: &str = "https://graph.facebook.com";

#[derive(Debug, Clone)]
pub struct FacebookProvider {
    version: Option<String>,
    dialog_url: String,
    token_url: String,
    profile_url: String,
}

impl Default for FacebookProvider {
    fn default() -> Self {
        Self::build(None)
    }
}

impl FacebookProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins every endpoint to a Graph API version such as `v19.0`.
    pub fn with_version(version: impl Into<String>) -> Self {
        let version = version.into();
        let version = version.trim_matches('/');
        if version.is_empty() {
            return Self::default();
        }
        Self::build(Some(version.to_string()))
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn build(version: Option<String>) -> Self {
        let prefix = version
            .as_deref()
            .map(|version| format!("/{version}"))
            .unwrap_or_default();
        Self {
            dialog_url: format!("{DIALOG_BASE}{prefix}/dialog/oauth"),
            token_url: format!("{GRAPH_BASE}{prefix}/oauth/access_token"),
            profile_url: format!("{GRAPH_BASE}{prefix}/me"),
            version,
        }
    }
}

impl GraphProvider for FacebookProvider {
    fn id(&self) -> &str {
        "facebook"
    }

    fn dialog_url(&self) -> &str {
        &self.dialog_url
    }

    fn token_url(&self) -> &str {
        &self.token_url
    }

    fn profile_url(&self) -> &str {
        &self.profile_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_endpoints() {
        let provider = FacebookProvider::new();
        assert_eq!(provider.dialog_url(), "https://www.facebook.com/dialog/oauth");
        assert_eq!(
            provider.token_url(),
            "https://graph.facebook.com/oauth/access_token"
        );
        assert_eq!(provider.profile_url(), "https://graph.facebook.com/me");
        assert_eq!(provider.version(), None);
    }

    #[test]
    fn versioned_endpoints() {
        let provider = FacebookProvider::with_version("/v19.0/");
        assert_eq!(provider.version(), Some("v19.0"));
        assert_eq!(
            provider.dialog_url(),
            "https://www.facebook.com/v19.0/dialog/oauth"
        );
        assert_eq!(
            provider.token_url(),
            "https://graph.facebook.com/v19.0/oauth/access_token"
        );
        assert_eq!(provider.profile_url(), "https://graph.facebook.com/v19.0/me");
    }

    #[test]
    fn blank_version_falls_back_to_unversioned() {
        assert_eq!(FacebookProvider::with_version("").version(), None);
    }
}
