//! Error types for Blogshelf operations

use thiserror::Error;

/// Transport failures reported by a collection client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_status() {
        let err = TransportError::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("503"));
        assert!(msg.contains("unavailable"));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = TransportError::Network {
            reason: "connection reset".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(format!("{}", err).contains("connection reset"));
    }
}
