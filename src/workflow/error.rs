use thiserror::Error;

use crate::{clinical::InputError, directory::DirectoryError, remote::RemoteError};

/// Recoverable failure of a workflow command. The state is already rolled
/// back to what it was before the call when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("clinical input rejected: {0}")]
    Validation(#[from] InputError),
    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl WorkflowError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Remote(err) => err.user_message(),
            Self::Directory(err) => err.user_message(),
        }
    }
}
