/// Endpoints of a Graph-style social-login provider.
pub trait GraphProvider: Send + Sync {
    fn id(&self) -> &str;
    fn dialog_url(&self) -> &str;
    fn token_url(&self) -> &str;
    fn profile_url(&self) -> &str;

    /// Extra query parameters appended to the authorization dialog URL.
    fn dialog_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
