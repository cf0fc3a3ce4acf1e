/// All error types that can occur when driving a Milight gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A group argument outside `None`/0 (all groups) and 1-4.
    #[error("group must be between 1 and 4, or 0 for all groups (was {0})")]
    InvalidGroup(i64),

    /// A group was configured with a device family other than "white" or "rgbw".
    #[error("invalid group type: {0}")]
    UnknownFamily(String),

    /// A pool index outside the configured set of gateways.
    #[error("gateway index {index} out of range; pool has {len} controllers")]
    IndexOutOfRange { index: usize, len: usize },

    /// A pool call named an operation the controller does not expose.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A pool call carried an argument that could not be parsed.
    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// A numeric color outside the hue byte range (0-255), or an empty one.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The pause between commands must be a finite, non-negative number of seconds.
    #[error("invalid pause between commands: {0}")]
    InvalidPause(f64),

    /// A network socket operation failed while sending to a gateway.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(operation: &str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
