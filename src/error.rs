//! Error taxonomy for the chat client.

use prost::Message;
use thiserror::Error;
use tonic::{Code, Status};

use crate::proto::RpcStatus;

/// Everything that can go wrong between submitting a query and printing
/// its answer. All variants surface to the CLI loop; none are fatal.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Generic network/RPC failure with no service-specific meaning.
    #[error("transport error: {0}")]
    Transport(Status),

    /// The service's own error encoding, e.g. rejected authentication.
    #[error("service error {code}: {message}")]
    Service { code: i32, message: String },

    /// The poll retry cap was exceeded before an answer arrived.
    #[error("answer timed out")]
    Timeout,

    /// The result carried fewer than two bubbles.
    #[error("no answer")]
    EmptyAnswer,
}

impl ChatError {
    /// Classify a failed RPC. The service reports business errors as an
    /// `Unknown` status carrying an `rpc.Status` detail payload; anything
    /// else is a plain transport failure.
    pub fn from_status(status: Status) -> Self {
        if status.code() == Code::Unknown && !status.details().is_empty() {
            if let Ok(detail) = RpcStatus::decode(status.details()) {
                return ChatError::Service {
                    code: detail.code,
                    message: detail.message,
                };
            }
        }
        ChatError::Transport(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn detail_bytes(code: i32, message: &str) -> Bytes {
        let detail = RpcStatus {
            code,
            message: message.to_string(),
        };
        Bytes::from(detail.encode_to_vec())
    }

    #[test]
    fn unknown_status_with_detail_is_a_service_error() {
        let status = Status::with_details(
            Code::Unknown,
            "rpc error",
            detail_bytes(403, "auth invalid"),
        );
        match ChatError::from_status(status) {
            ChatError::Service { code, message } => {
                assert_eq!(code, 403);
                assert_eq!(message, "auth invalid");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_without_detail_is_transport() {
        let status = Status::unknown("rpc error");
        assert!(matches!(
            ChatError::from_status(status),
            ChatError::Transport(_)
        ));
    }

    #[test]
    fn non_unknown_codes_are_transport_even_with_details() {
        let status = Status::with_details(
            Code::PermissionDenied,
            "denied",
            detail_bytes(403, "auth invalid"),
        );
        assert!(matches!(
            ChatError::from_status(status),
            ChatError::Transport(_)
        ));
    }
}
