use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// Refused before dispatch, the request never reached the network.
    InvalidRequest,
    /// `ok=false`, or an `error` field embedded in an `ok=true` body.
    Rejected,
    /// Network failure, timeout, unreadable response.
    Transport,
    /// Successful envelope whose body does not have the expected shape.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_transport(&self) -> bool {
        self.kind == RemoteErrorKind::Transport
    }

    /// Text shown in the transient notification for this failure.
    pub fn user_message(&self) -> String {
        match self.kind {
            RemoteErrorKind::Rejected | RemoteErrorKind::InvalidRequest => self.message.clone(),
            RemoteErrorKind::Transport => {
                format!("Error de conexión con el servidor: {}", self.message)
            }
            RemoteErrorKind::Decode => "Respuesta inesperada del servidor".to_string(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status={})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

pub fn invalid_request(message: impl Into<String>) -> RemoteError {
    RemoteError::new(RemoteErrorKind::InvalidRequest, message)
}

pub fn rejected(message: impl Into<String>) -> RemoteError {
    RemoteError::new(RemoteErrorKind::Rejected, message)
}

pub fn transport_error(message: impl Into<String>) -> RemoteError {
    RemoteError::new(RemoteErrorKind::Transport, message)
}

pub fn decode_error(message: impl Into<String>) -> RemoteError {
    RemoteError::new(RemoteErrorKind::Decode, message)
}
