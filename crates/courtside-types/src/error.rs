//! Error types for the Courtside engines.
//!
//! All errors use the `CS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors
//! - 2xx: Lookup (not found) errors
//! - 3xx: Bracket pool errors
//! - 4xx: State conflicts
//! - 5xx: Access errors
//! - 6xx: Settlement integrity errors
//! - 9xx: General / internal errors

use std::fmt;

use thiserror::Error;

use crate::{BillId, DebtId, MenuItemId, PartyBillId, Permission, PlayerId, PoolId, ShuttleTypeId, UserId};

/// Central error enum for all Courtside operations.
#[derive(Debug, Error)]
pub enum CourtsideError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// Input failed validation (negative amounts, empty lists, bad names, ...).
    #[error("CS_ERR_100: Invalid input: {reason}")]
    Validation { reason: String },

    /// Bracket organizing was asked for an unusable number of groups.
    #[error("CS_ERR_101: Invalid group count {count}: must be between 1 and {max}")]
    InvalidGroupCount { count: u32, max: u32 },

    // =================================================================
    // Lookup Errors (2xx)
    // =================================================================
    #[error("CS_ERR_200: Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("CS_ERR_201: Menu item not found: {0}")]
    MenuItemNotFound(MenuItemId),

    #[error("CS_ERR_202: Shuttle type not found: {0}")]
    ShuttleTypeNotFound(ShuttleTypeId),

    #[error("CS_ERR_203: Bill not found: {0}")]
    BillNotFound(BillId),

    #[error("CS_ERR_204: Party bill not found: {0}")]
    PartyBillNotFound(PartyBillId),

    #[error("CS_ERR_205: Player pool not found: {0}")]
    PoolNotFound(PoolId),

    /// The bill creator does not resolve to a registered user.
    #[error("CS_ERR_206: User not found: {0}")]
    UserNotFound(UserId),

    #[error("CS_ERR_207: Debt not found: {0}")]
    DebtNotFound(DebtId),

    // =================================================================
    // Bracket Pool Errors (3xx)
    // =================================================================
    /// No eligible (unassigned, gender-matching) players remain.
    #[error("CS_ERR_300: No eligible players to organize")]
    EmptyPool,

    // =================================================================
    // State Conflicts (4xx)
    // =================================================================
    /// The operation does not apply to the current state of the record.
    #[error("CS_ERR_400: State conflict: {reason}")]
    StateConflict { reason: String },

    // =================================================================
    // Access Errors (5xx)
    // =================================================================
    #[error("CS_ERR_500: Permission denied: {user} lacks {permission}")]
    PermissionDenied { user: UserId, permission: Permission },

    // =================================================================
    // Settlement Integrity (6xx)
    // =================================================================
    /// Computed shares do not add back up to the bill totals.
    #[error("CS_ERR_600: Settlement invariant violation: {reason}")]
    SettlementInvariantViolation { reason: String },

    /// An amount left the representable `i64` range.
    #[error("CS_ERR_601: Amount overflow while computing {context}")]
    AmountOverflow { context: &'static str },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    #[error("CS_ERR_900: Internal error: {0}")]
    Internal(String),

    #[error("CS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, ...).
    #[error("CS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    #[error("CS_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Coarse classification used by callers to pick a user-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    EmptyPool,
    StateConflict,
    Forbidden,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::EmptyPool => write!(f, "EMPTY_POOL"),
            Self::StateConflict => write!(f, "STATE_CONFLICT"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl CourtsideError {
    /// Shorthand for a [`CourtsideError::Validation`] with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CourtsideError::StateConflict`].
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::StateConflict {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidGroupCount { .. } | Self::Configuration(_) => {
                ErrorKind::Validation
            }
            Self::PlayerNotFound(_)
            | Self::MenuItemNotFound(_)
            | Self::ShuttleTypeNotFound(_)
            | Self::BillNotFound(_)
            | Self::PartyBillNotFound(_)
            | Self::PoolNotFound(_)
            | Self::UserNotFound(_)
            | Self::DebtNotFound(_) => ErrorKind::NotFound,
            Self::EmptyPool => ErrorKind::EmptyPool,
            Self::StateConflict { .. } => ErrorKind::StateConflict,
            Self::PermissionDenied { .. } => ErrorKind::Forbidden,
            Self::SettlementInvariantViolation { .. }
            | Self::AmountOverflow { .. }
            | Self::Internal(_)
            | Self::Serialization(_)
            | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CourtsideError>;

impl From<std::io::Error> for CourtsideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CourtsideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
