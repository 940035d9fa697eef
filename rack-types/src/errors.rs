use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RackError {
    #[error("Rack holds at most 8 letters, got {count}")]
    TooManyLetters { count: usize },
    #[error("Rack expects exactly 8 slots, got {count}")]
    WrongSlotCount { count: usize },
    #[error("Invalid rack letter: {letter:?}")]
    InvalidLetter { letter: char },
    #[error("Rack slot {index} is out of range")]
    SlotOutOfRange { index: usize },
}

/// Why a word source could not deliver candidates.
///
/// Always recovered by the search pipeline; never surfaced to callers as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{source_name} timed out after {timeout_ms}ms")]
    Timeout { source_name: String, timeout_ms: u64 },
    #[error("{source_name} responded with status {status}")]
    Status { source_name: String, status: u16 },
    #[error("{source_name} returned a malformed payload: {message}")]
    Malformed { source_name: String, message: String },
    #[error("{source_name} request failed: {message}")]
    Transport { source_name: String, message: String },
}

impl SourceError {
    pub fn source_name(&self) -> &str {
        match self {
            SourceError::Timeout { source_name, .. } => source_name,
            SourceError::Status { source_name, .. } => source_name,
            SourceError::Malformed { source_name, .. } => source_name,
            SourceError::Transport { source_name, .. } => source_name,
        }
    }
}
