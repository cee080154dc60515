//! `reqwest`-backed gateway talking to the REST backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::dto::envelope::ResponseEnvelope;
use crate::dto::query::QueryParams;
use crate::repository::errors::{GatewayError, GatewayResult};
use crate::repository::{Endpoint, QueryGateway};

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

/// Gateway addressing `{base_url}/{resource}/{path}`.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> GatewayResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            endpoint.resource.trim_matches('/'),
            endpoint.path.trim_start_matches('/')
        )
    }

    fn read_url(&self, endpoint: &Endpoint, params: &QueryParams) -> GatewayResult<String> {
        let query = serde_html_form::to_string(params)
            .map_err(|e| GatewayError::Validation(format!("query encoding: {e}")))?;
        let url = self.url(endpoint);

        if query.is_empty() {
            Ok(url)
        } else {
            Ok(format!("{url}?{query}"))
        }
    }

    /// Attach the bearer token when the endpoint requires auth.
    fn authed(&self, builder: reqwest::RequestBuilder, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        match (&self.token, endpoint.auth_required) {
            (Some(token), true) => builder.bearer_auth(token),
            (None, true) => {
                log::warn!(
                    "No API token configured for {}/{}",
                    endpoint.resource,
                    endpoint.path
                );
                builder
            }
            _ => builder,
        }
    }

    /// Decode an envelope, mapping HTTP errors to `GatewayError`.
    async fn parse(resp: reqwest::Response) -> GatewayResult<ResponseEnvelope> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Server {
                status: code,
                message: body,
            });
        }
        resp.json::<ResponseEnvelope>()
            .await
            .map_err(|e| GatewayError::Decode(format!("response body: {e}")))
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        endpoint: &Endpoint,
    ) -> GatewayResult<ResponseEnvelope> {
        let resp = self.authed(builder, endpoint).send().await?;
        Self::parse(resp).await
    }
}

#[async_trait]
impl QueryGateway for HttpGateway {
    async fn read(&self, endpoint: &Endpoint, params: &QueryParams) -> GatewayResult<ResponseEnvelope> {
        let url = self.read_url(endpoint, params)?;
        self.send(self.http.get(url), endpoint).await
    }

    async fn create(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope> {
        self.send(self.http.post(self.url(endpoint)).json(body), endpoint)
            .await
    }

    async fn update(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope> {
        self.send(self.http.put(self.url(endpoint)).json(body), endpoint)
            .await
    }

    async fn patch(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope> {
        self.send(self.http.patch(self.url(endpoint)).json(body), endpoint)
            .await
    }

    async fn delete(&self, endpoint: &Endpoint, id: &str) -> GatewayResult<ResponseEnvelope> {
        log::debug!("Deleting {} {id}", endpoint.resource);
        self.send(self.http.delete(self.url(endpoint)), endpoint)
            .await
    }
}
