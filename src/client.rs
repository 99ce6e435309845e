//! Connection setup and the gRPC-backed chat service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tonic::metadata::MetadataMap;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::info;

use crate::engine::ChatService;
use crate::headers::build_headers;
use crate::proto::{ChatResult, GetChatResultReq, SearchClient, SubmitChatTaskReq};

/// Production endpoint of the search service.
pub const DEFAULT_ENDPOINT: &str = "https://grpc.biliapi.net:443";

/// Open the long-lived channel to the service.
///
/// Opened once at startup and reused for every query until the process
/// exits. Keep-alive pings keep the connection warm between questions.
pub async fn connect(endpoint: &str) -> Result<Channel> {
    let channel = Endpoint::from_shared(endpoint.to_string())
        .with_context(|| format!("invalid endpoint: {endpoint}"))?
        .tls_config(ClientTlsConfig::new().with_native_roots())
        .context("failed to configure TLS")?
        .http2_keep_alive_interval(Duration::from_secs(10))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true)
        .connect()
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))?;
    info!("connected to {endpoint}");
    Ok(channel)
}

/// The real chat service: a `SearchClient` over the shared channel plus
/// the metadata attached to every call.
pub struct BiliChat {
    client: SearchClient,
    headers: MetadataMap,
}

impl BiliChat {
    pub fn new(channel: Channel, access_key: &str) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(channel),
            headers: build_headers(access_key)?,
        })
    }

    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        *request.metadata_mut() = self.headers.clone();
        request
    }
}

#[async_trait]
impl ChatService for BiliChat {
    async fn submit_chat_task(&mut self, query: &str) -> Result<String, tonic::Status> {
        let request = self.request(SubmitChatTaskReq {
            query: query.to_string(),
        });
        let reply = self.client.submit_chat_task(request).await?;
        Ok(reply.into_inner().session_id)
    }

    async fn get_chat_result(
        &mut self,
        query: &str,
        session_id: &str,
    ) -> Result<ChatResult, tonic::Status> {
        let request = self.request(GetChatResultReq {
            query: query.to_string(),
            session_id: session_id.to_string(),
        });
        let reply = self.client.get_chat_result(request).await?;
        Ok(reply.into_inner())
    }
}
