use std::fmt;

use crate::remote::RemoteError;

/// Failed page request. The previously displayed page stays in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryError {
    pub requested_page: u32,
    pub cause: RemoteError,
}

impl DirectoryError {
    pub fn new(requested_page: u32, cause: RemoteError) -> Self {
        Self {
            requested_page,
            cause,
        }
    }

    pub fn user_message(&self) -> String {
        self.cause.user_message()
    }
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} failed: {}", self.requested_page, self.cause)
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
