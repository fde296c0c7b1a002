//! Common error infrastructure for game-core.
//!
//! Runtime operations on a well-formed world are total: they report failure
//! through `bool` or `Option` and never construct an error. Errors only exist
//! for building a world from blueprints, where a structural problem is an
//! authoring bug and the caller is expected to abort.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure source has its own error enum
//! - **Rich Context**: Errors carry the level name and position involved
//! - **Severity Classification**: Errors are categorized for handling strategies

use crate::state::Position;

/// Severity level of an error, used for categorization and handling strategies.
///
/// - **Validation**: Invalid input data, reject without retry
/// - **Internal**: Unexpected state inconsistency, indicates a bug
/// - **Fatal**: The world cannot be built or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: living-monster index desync, item referenced twice.
    Internal,

    /// Fatal error - the world cannot be constructed.
    ///
    /// Examples: unknown map glyph, missing player placement.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Structural problems found while generating levels from blueprints.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationError {
    #[error("level '{level}' has no rows")]
    EmptyMap { level: String },

    #[error("unknown glyph {glyph:?} at {position:?} in level '{level}'")]
    UnknownGlyph {
        level: String,
        glyph: char,
        position: Position,
    },

    #[error("placement {glyph:?} at {position:?} is outside level '{level}'")]
    PlacementOutOfBounds {
        level: String,
        glyph: char,
        position: Position,
    },

    #[error("placement {glyph:?} at {position:?} in level '{level}' is not on walkable ground")]
    UnwalkablePlacement {
        level: String,
        glyph: char,
        position: Position,
    },

    #[error("placement {glyph:?} at {position:?} in level '{level}' is already taken by another actor")]
    OccupiedPlacement {
        level: String,
        glyph: char,
        position: Position,
    },

    #[error("start level '{level}' has no player placement")]
    MissingPlayer { level: String },

    #[error("level '{0}' is not defined")]
    UnknownLevel(String),

    #[error("level '{0}' is defined more than once")]
    DuplicateLevel(String),

    #[error("portal endpoint {position:?} is outside level '{level}'")]
    PortalOutOfBounds { level: String, position: Position },

    #[error("portal destination {position:?} in level '{level}' is not walkable")]
    UnwalkablePortal { level: String, position: Position },
}

impl GameError for GenerationError {
    /// Every generation failure leaves no world to run, so all are fatal.
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use GenerationError::*;
        match self {
            EmptyMap { .. } => "GENERATION_EMPTY_MAP",
            UnknownGlyph { .. } => "GENERATION_UNKNOWN_GLYPH",
            PlacementOutOfBounds { .. } => "GENERATION_PLACEMENT_OUT_OF_BOUNDS",
            UnwalkablePlacement { .. } => "GENERATION_UNWALKABLE_PLACEMENT",
            OccupiedPlacement { .. } => "GENERATION_OCCUPIED_PLACEMENT",
            MissingPlayer { .. } => "GENERATION_MISSING_PLAYER",
            UnknownLevel(_) => "GENERATION_UNKNOWN_LEVEL",
            DuplicateLevel(_) => "GENERATION_DUPLICATE_LEVEL",
            PortalOutOfBounds { .. } => "GENERATION_PORTAL_OUT_OF_BOUNDS",
            UnwalkablePortal { .. } => "GENERATION_UNWALKABLE_PORTAL",
        }
    }
}
