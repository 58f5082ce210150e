use crate::GraphProvider;

/// Provider with explicit endpoints, for Graph-compatible services and local
/// mock servers.
#[derive(Debug, Clone)]
pub struct CustomProvider {
    id: String,
    dialog_url: String,
    token_url: String,
    profile_url: String,
    dialog_params: Vec<(String, String)>,
}

impl CustomProvider {
    pub fn new(
        id: impl Into<String>,
        dialog_url: impl Into<String>,
        token_url: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dialog_url: dialog_url.into(),
            token_url: token_url.into(),
            profile_url: profile_url.into(),
            dialog_params: Vec::new(),
        }
    }

    /// Derives all three endpoints from one base URL using the Graph layout.
    pub fn from_base_url(id: impl Into<String>, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            id,
            format!("{base}/dialog/oauth"),
            format!("{base}/oauth/access_token"),
            format!("{base}/me"),
        )
    }

    pub fn with_dialog_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dialog_params.push((key.into(), value.into()));
        self
    }
}

impl GraphProvider for CustomProvider {
    fn id(&self) -> &str {
        &self.id
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

    fn dialog_params(&self) -> Vec<(String, String)> {
        self.dialog_params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::CustomProvider;
    use crate::GraphProvider;

    #[test]
    fn from_base_url_uses_graph_layout() {
        let provider = CustomProvider::from_base_url("mock", "http://127.0.0.1:8080/");
        assert_eq!(provider.id(), "mock");
        assert_eq!(provider.dialog_url(), "http://127.0.0.1:8080/dialog/oauth");
        assert_eq!(
            provider.token_url(),
            "http://127.0.0.1:8080/oauth/access_token"
        );
        assert_eq!(provider.profile_url(), "http://127.0.0.1:8080/me");
    }
}
