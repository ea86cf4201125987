use thiserror::Error;

/// Canonical error type for the registry/database boundary.
///
/// `InvariantViolation`s (a self-edge attempt inside the HNSW graph) are not
/// represented here: they are logic bugs and surface as a `panic!` rather
/// than a value, per the error taxonomy's split between recoverable and
/// unrecoverable failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A registry lookup found no database with the given name.
    #[error("{entity} `{id}` was not found")]
    NotFound {
        /// Entity type name (e.g. `"database"`).
        entity: &'static str,
        /// Identifier that was missing.
        id: String,
    },

    /// A registry creation targeted a name that is already taken.
    #[error("{entity} `{id}` already exists")]
    AlreadyExists {
        /// Entity type name (e.g. `"database"`).
        entity: &'static str,
        /// Identifier that conflicts.
        id: String,
    },

    /// `registry.create` was asked for an index kind it doesn't recognize.
    #[error("unknown algorithm `{name}`, expected `bruteforce` or `hnsw`")]
    UnknownAlgorithm {
        /// The unrecognized algorithm string as supplied by the caller.
        name: String,
    },

    /// Operation violates a caller contract the core enforces defensively.
    #[error("invalid state: {message}")]
    InvalidState {
        /// Human-readable explanation.
        message: String,
    },
}

impl CoreError {
    /// Creates a `NotFound` variant.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an `AlreadyExists` variant.
    #[must_use]
    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    /// Creates an `UnknownAlgorithm` variant.
    #[must_use]
    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { name: name.into() }
    }

    /// Creates an `InvalidState` variant.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

/// Convenient result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
