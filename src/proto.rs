//! Hand-maintained prost mirrors of the Bilibili proto definitions this
//! client consumes, plus the tonic client for the search service.
//!
//! Only the fields the client actually reads or writes are mirrored here;
//! prost skips unknown fields on decode, so the service is free to send
//! more than we model.

use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

// --- bilibili.app.search.v2 ---

#[derive(Clone, PartialEq, prost::Message)]
pub struct SubmitChatTaskReq {
    #[prost(string, tag = "1")]
    pub query: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SubmitChatTaskReply {
    /// Opaque token correlating the submitted query with its answer.
    #[prost(string, tag = "1")]
    pub session_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetChatResultReq {
    /// The service requires the original query to be echoed back.
    #[prost(string, tag = "1")]
    pub query: String,
    #[prost(string, tag = "2")]
    pub session_id: String,
}

// --- bilibili.broadcast.message.main ---

/// The finished answer: a sequence of bubbles, each a sequence of
/// paragraphs, each optionally carrying a run of text nodes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChatResult {
    #[prost(message, repeated, tag = "1")]
    pub bubble: Vec<Bubble>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Bubble {
    #[prost(message, repeated, tag = "1")]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Paragraph {
    /// Absent for non-text paragraphs (cards, images, ...).
    #[prost(message, optional, tag = "1")]
    pub text: Option<Text>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Text {
    #[prost(message, repeated, tag = "1")]
    pub nodes: Vec<TextNode>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TextNode {
    #[prost(string, tag = "1")]
    pub raw_text: String,
}

// --- bilibili.metadata.* ---

#[derive(Clone, PartialEq, prost::Message)]
pub struct Device {
    #[prost(string, tag = "1")]
    pub mobi_app: String,
    #[prost(string, tag = "2")]
    pub device: String,
    #[prost(int32, tag = "3")]
    pub build: i32,
    #[prost(string, tag = "4")]
    pub channel: String,
    #[prost(string, tag = "5")]
    pub buvid: String,
    #[prost(string, tag = "6")]
    pub platform: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Locale {
    #[prost(string, tag = "4")]
    pub timezone: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Metadata {
    #[prost(string, tag = "1")]
    pub access_key: String,
    #[prost(string, tag = "2")]
    pub mobi_app: String,
    #[prost(string, tag = "3")]
    pub device: String,
    #[prost(int32, tag = "4")]
    pub build: i32,
    #[prost(string, tag = "5")]
    pub channel: String,
    #[prost(string, tag = "6")]
    pub buvid: String,
    #[prost(string, tag = "7")]
    pub platform: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Network {
    #[prost(enumeration = "NetworkType", tag = "1")]
    pub r#type: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum NetworkType {
    Unknown = 0,
    Wifi = 1,
    Cellular = 2,
    Offline = 3,
}

// --- bilibili.rpc ---

/// The service's own error encoding, delivered inside the
/// `grpc-status-details-bin` payload of a failed call.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RpcStatus {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
}

/// Client for the `bilibili.app.search.v2.Search` service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    inner: Grpc<Channel>,
}

impl SearchClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: Grpc::new(channel),
        }
    }

    /// Submit a chat task for asynchronous processing.
    pub async fn submit_chat_task(
        &mut self,
        request: Request<SubmitChatTaskReq>,
    ) -> Result<Response<SubmitChatTaskReply>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/bilibili.app.search.v2.Search/SubmitChatTask");
        self.inner.unary(request, path, codec).await
    }

    /// Fetch the result of a previously submitted chat task. Fails with a
    /// plain error while the answer is still being generated.
    pub async fn get_chat_result(
        &mut self,
        request: Request<GetChatResultReq>,
    ) -> Result<Response<ChatResult>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/bilibili.app.search.v2.Search/GetChatResult");
        self.inner.unary(request, path, codec).await
    }
}
