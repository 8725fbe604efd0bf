use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::{
    config::ApiConfig,
    remote::{
        envelope::Envelope,
        error::{RemoteError, invalid_request, transport_error},
        ports::{ApiRequest, HttpMethod, Transport},
    },
    session::SessionPort,
};

/// reqwest-backed [`Transport`] attaching the session's bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionPort>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionPort>) -> Result<Self, RemoteError> {
        if config.base_url.trim().is_empty() {
            return Err(invalid_request("api.base_url cannot be empty"));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| transport_error(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn method_to_wire(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope, RemoteError> {
        let url = self.url_for(&request.path);
        let mut builder = self.client.request(method_to_wire(request.method), &url);
        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                transport_error(format!("request to {url} timed out"))
            } else {
                transport_error(err.to_string())
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(err.to_string()).with_status(status))?;

        Ok(Envelope::from_body(status, &body))
    }
}
