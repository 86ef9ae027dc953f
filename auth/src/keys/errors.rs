use thiserror::Error;

use super::provider::KeySlot;

/// Error type for key material retrieval.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key material for {slot} slot is unavailable: {reason}")]
    Unavailable { slot: KeySlot, reason: String },
}
