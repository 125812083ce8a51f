//! HTTP access to the chat API.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::message::{ChatRequest, ChatResponse, StatusResponse};

/// The two calls a chat session makes against its backend.
pub trait ChatApi {
    fn status(&self) -> impl Future<Output = Result<StatusResponse, ClientError>> + Send;

    /// Send one message and return the reply text. Business failures come
    /// back as [`ClientError::Rejected`].
    fn chat(&self, message: &str) -> impl Future<Output = Result<String, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ClientError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ClientError::Status { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

impl ChatApi for ApiClient {
    async fn status(&self) -> Result<StatusResponse, ClientError> {
        self.get_json("/status").await
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let request = ChatRequest { message: message.to_string() };
        let response: ChatResponse = self.post_json("/chat", &request).await?;
        into_reply(response)
    }
}

/// Anything but `status: "success"` with a `response` string is a rejection.
pub(crate) fn into_reply(response: ChatResponse) -> Result<String, ClientError> {
    if response.is_success() {
        if let Some(reply) = response.response {
            return Ok(reply);
        }
    }
    Err(ClientError::Rejected {
        status: response.status,
        error: response.error,
    })
}
