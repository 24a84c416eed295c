//! Gateway error taxonomy

use thiserror::Error;

use crate::api::ClientError;

/// The remote operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Append,
    Update,
    Clear,
}

impl Operation {
    /// Message shown to clients when the remote call fails unexpectedly
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Error fetching data from spreadsheet.",
            Operation::Append => "Error saving data to spreadsheet.",
            Operation::Update => "Error updating data in spreadsheet.",
            Operation::Clear => "Error clearing data in spreadsheet.",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Operation::List => "read",
            Operation::Append => "append to",
            Operation::Update => "update",
            Operation::Clear => "clear",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::List => write!(f, "fetching rows"),
            Operation::Append => write!(f, "appending row"),
            Operation::Update => write!(f, "updating row"),
            Operation::Clear => write!(f, "clearing row"),
        }
    }
}

pub const AUTH_FAILURE_MESSAGE: &str = "Internal server error: Google authentication failed";

/// Failure of a gateway operation, already classified for the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Header row or a non-positive row was addressed
    #[error("Cannot {} header row (row 1). Please specify row_number >= 2.", .operation.verb())]
    InvalidRowNumber { operation: Operation, row_number: i64 },

    /// The spreadsheet service rejected the call with a status code.
    /// The reason text came from the service and is safe to show.
    #[error("Google API Error: {reason}")]
    RemoteApi { status: u16, reason: String },

    /// Anything else that went wrong talking to the service
    #[error("{}", unexpected_message(.operation, .source))]
    RemoteUnexpected {
        operation: Operation,
        #[source]
        source: ClientError,
    },
}

fn unexpected_message(operation: &Operation, source: &ClientError) -> &'static str {
    match source {
        ClientError::Auth(_) => AUTH_FAILURE_MESSAGE,
        _ => operation.failure_message(),
    }
}

impl SheetError {
    /// Classify a client failure for the given operation
    pub fn from_client(operation: Operation, err: ClientError) -> Self {
        match err {
            ClientError::Status { status, reason } => SheetError::RemoteApi { status, reason },
            other => SheetError::RemoteUnexpected {
                operation,
                source: other,
            },
        }
    }
}
