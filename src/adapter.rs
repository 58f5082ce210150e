use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use url::Url;

use crate::types::GraphErrorBody;
use crate::{
    AccessToken, AdapterConfig, AdapterError, ApiRequest, ApiResponse, ErrorLogger,
    GraphProvider, HttpClient, LogContext, ProfileFields, ProfileRecord, TokenResponse,
    TransportError,
};

type HmacSha256 = Hmac<Sha256>;

/// Exchanges authorization codes and fetches profiles against a
/// [`GraphProvider`].
///
/// Every failure is reported once to the configured [`ErrorLogger`] (if any)
/// and then returned. Nothing is retried.
pub struct ProviderApiAdapter<P: GraphProvider, C: HttpClient = Client> {
    provider: P,
    config: AdapterConfig,
    http: C,
    logger: Option<Arc<dyn ErrorLogger>>,
}

impl<P: GraphProvider> ProviderApiAdapter<P, Client> {
    pub fn new(provider: P, config: AdapterConfig) -> Result<Self, AdapterError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(provider, config, http))
    }
}

impl<P: GraphProvider, C: HttpClient> ProviderApiAdapter<P, C> {
    pub fn with_http_client(provider: P, config: AdapterConfig, http: C) -> Self {
        Self {
            provider,
            config,
            http,
            logger: None,
        }
    }

    pub fn with_logger(self, logger: impl ErrorLogger + 'static) -> Self {
        self.with_shared_logger(Arc::new(logger))
    }

    pub fn with_shared_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// URL of the provider's authorization dialog. The caller's web layer is
    /// responsible for redirecting the browser there.
    pub fn redirect_target(&self) -> Result<Url, AdapterError> {
        let credentials = &self.config.credentials;
        let mut url = Url::parse(self.provider.dialog_url())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("client_id", &credentials.app_id);
            pairs.append_pair("redirect_uri", &credentials.redirect_uri);
            for (key, value) in self.provider.dialog_params() {
                pairs.append_pair(&key, &value);
            }
            for (key, value) in &self.config.dialog_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub async fn access_token(&self, code: &str) -> Result<AccessToken, AdapterError> {
        Ok(self.token_response(code).await?.access_token)
    }

    /// Like [`access_token`](Self::access_token) but keeps the expiry and any
    /// other keys the provider returned.
    pub async fn token_response(&self, code: &str) -> Result<TokenResponse, AdapterError> {
        let request = self.token_request(code)?;
        let response = self.send(&request).await?;

        match serde_json::from_str::<TokenResponse>(&response.body) {
            Ok(token) if !token.access_token.as_str().is_empty() => Ok(token),
            _ => {
                // A body we could not read may still hold a live token.
                let response = response.redacted();
                Err(self.report(
                    AdapterError::MissingAccessToken {
                        body: response.body.clone(),
                    },
                    &request,
                    Some(&response),
                ))
            }
        }
    }

    pub async fn fetch_profile(
        &self,
        token: impl AsRef<str>,
        fields: &ProfileFields,
    ) -> Result<ProfileRecord, AdapterError> {
        let request = self.profile_request(token.as_ref(), fields)?;
        let response = self.send(&request).await?;

        let record = match serde_json::from_str::<ProfileRecord>(&response.body) {
            Ok(record) => record,
            Err(_) => {
                return Err(self.report(
                    AdapterError::MalformedResponse {
                        body: response.body.clone(),
                    },
                    &request,
                    Some(&response),
                ));
            }
        };

        let missing = self.config.field_policy.missing(&record);
        if !missing.is_empty() {
            let present = record.keys().map(str::to_string).collect();
            return Err(self.report(
                AdapterError::MissingFields { missing, present },
                &request,
                Some(&response),
            ));
        }

        Ok(record)
    }

    /// `hex(HMAC-SHA256(app_secret, access_token))`, as accepted by the Graph
    /// API for server-side calls.
    pub fn appsecret_proof(&self, token: &str) -> Result<String, AdapterError> {
        let mut mac = HmacSha256::new_from_slice(self.config.credentials.app_secret.as_bytes())
            .map_err(|err| AdapterError::InvalidConfig(err.to_string()))?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn token_request(&self, code: &str) -> Result<ApiRequest, AdapterError> {
        let credentials = &self.config.credentials;
        let mut url = Url::parse(self.provider.token_url())?;
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.app_id)
            .append_pair("redirect_uri", &credentials.redirect_uri)
            .append_pair("client_secret", &credentials.app_secret)
            .append_pair("code", code);
        Ok(ApiRequest::get(url))
    }

    fn profile_request(
        &self,
        token: &str,
        fields: &ProfileFields,
    ) -> Result<ApiRequest, AdapterError> {
        let proof = if self.config.appsecret_proof {
            Some(self.appsecret_proof(token)?)
        } else {
            None
        };

        let mut url = Url::parse(self.provider.profile_url())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", token);
            if !fields.is_empty() {
                pairs.append_pair("fields", &fields.joined());
            }
            if let Some(proof) = &proof {
                pairs.append_pair("appsecret_proof", proof);
            }
        }
        Ok(ApiRequest::get(url))
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, AdapterError> {
        tracing::debug!(provider = self.provider.id(), %request, "sending request");

        let response = match self.http.send(request.clone()).await {
            Ok(response) => response,
            Err(source) => return Err(self.report(source.into(), request, None)),
        };

        if !response.is_success() {
            let source = TransportError::Status {
                status: response.status,
                message: status_message(&response.body),
            };
            return Err(self.report(source.into(), request, Some(&response)));
        }

        Ok(response)
    }

    fn report(
        &self,
        error: AdapterError,
        request: &ApiRequest,
        response: Option<&ApiResponse>,
    ) -> AdapterError {
        if let Some(logger) = &self.logger {
            logger.log_error(&error.to_string(), &LogContext::new(request, response));
        }
        error
    }
}

impl<P, C> fmt::Debug for ProviderApiAdapter<P, C>
where
    P: GraphProvider + fmt::Debug,
    C: HttpClient,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderApiAdapter")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

fn status_message(body: &str) -> String {
    match serde_json::from_str::<GraphErrorBody>(body) {
        Ok(graph) => graph.error.to_string(),
        Err(_) => body.to_string(),
    }
}
