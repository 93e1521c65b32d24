//! Error types for shader translation

use thiserror::Error;

use crate::microcode::TexOpcode;

/// Failure raised while translating a single shader
///
/// All variants abort the current shader's translation only; the dispatch
/// table and any other in-flight translation are unaffected.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A decoded value is outside the recognized domain for this hardware
    /// revision
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// An invariant the translator maintains itself was violated
    #[error("Internal inconsistency: {0}")]
    Internal(String),

    /// The opcode decoded to a known instruction with no registered handler
    #[error("No handler registered for {opcode:?}")]
    MissingHandler { opcode: TexOpcode },
}

/// Result type alias for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
