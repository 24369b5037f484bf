//! Response envelope for the request/response contract
//!
//! Typed store failures map to short machine codes plus human-readable
//! messages at this boundary; transports relay them verbatim.

use serde::{Deserialize, Serialize};

use turtlesoup_domain::DomainError;

/// Error classification codes for failed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RoomNotFound,
    PlayerNotFound,
    RoomFull,
    GameAlreadyStarted,
    InvalidState,
    PlayerEliminated,
    /// Turn enforcement is transport policy; the code exists so adapters
    /// that enforce turns can report it uniformly.
    NotYourTurn,
    BadRequest,
    Internal,
}

impl From<&DomainError> for ErrorCode {
    fn from(error: &DomainError) -> Self {
        match error {
            DomainError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            DomainError::PlayerNotFound { .. } => ErrorCode::PlayerNotFound,
            DomainError::RoomFull { .. } => ErrorCode::RoomFull,
            DomainError::GameAlreadyStarted(_) => ErrorCode::GameAlreadyStarted,
            DomainError::InvalidState(_) => ErrorCode::InvalidState,
            DomainError::PlayerEliminated(_) => ErrorCode::PlayerEliminated,
            DomainError::Validation(_) => ErrorCode::BadRequest,
        }
    }
}

/// Result of a request operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseResult {
    /// Operation succeeded
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Operation failed
    Error {
        code: ErrorCode,
        message: String,
    },
    /// Unknown response type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ResponseResult {
    /// Create a success response with data.
    pub fn success<T: Serialize>(data: T) -> Self {
        ResponseResult::Success {
            data: serde_json::to_value(data).ok(),
        }
    }

    /// Create a success response without data.
    pub fn success_empty() -> Self {
        ResponseResult::Success { data: None }
    }

    /// Create an error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ResponseResult::Error {
            code,
            message: message.into(),
        }
    }

    /// Map a typed store failure onto the wire.
    pub fn from_domain_error(error: &DomainError) -> Self {
        ResponseResult::Error {
            code: ErrorCode::from(error),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_codes() {
        let error = DomainError::room_not_found("abcdef01");
        match ResponseResult::from_domain_error(&error) {
            ResponseResult::Error { code, message } => {
                assert_eq!(code, ErrorCode::RoomNotFound);
                assert!(message.contains("abcdef01"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn unknown_variants_deserialize_gracefully() {
        let json = r#"{"status": "something_new"}"#;
        let result: ResponseResult = serde_json::from_str(json).expect("deserializes");
        assert!(matches!(result, ResponseResult::Unknown));
    }
}
