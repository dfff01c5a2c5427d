use std::fmt;

use crate::core::store::StoreError;
use crate::remote::RemoteError;

/// Anything that can stop the chat UI or one of its actions.
#[derive(Debug)]
pub enum ChatError {
    Remote(RemoteError),
    Store(StoreError),
    Io(std::io::Error),
    /// A conversation named on the command line is not in the cache.
    NotFound(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Remote(e) => write!(f, "{e}"),
            ChatError::Store(e) => write!(f, "{e}"),
            ChatError::Io(e) => write!(f, "terminal I/O error: {e}"),
            ChatError::NotFound(what) => write!(f, "{what} not found in cache (try `chatline cache`)"),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Remote(e) => Some(e),
            ChatError::Store(e) => Some(e),
            ChatError::Io(e) => Some(e),
            ChatError::NotFound(_) => None,
        }
    }
}

impl From<RemoteError> for ChatError {
    fn from(e: RemoteError) -> Self {
        ChatError::Remote(e)
    }
}

impl From<StoreError> for ChatError {
    fn from(e: StoreError) -> Self {
        ChatError::Store(e)
    }
}

impl From<std::io::Error> for ChatError {
    fn from(e: std::io::Error) -> Self {
        ChatError::Io(e)
    }
}
