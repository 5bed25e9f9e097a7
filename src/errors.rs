//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MirrorError`] covers all failure modes including:
//! - Domain errors raised while propagating a transform (degenerate scale)
//! - Pair configuration errors (missing references, duplicate membership)
//! - Preset lookup and persistence errors
//!
//! Configuration gaps on a pair (an unset source or target) are *not* errors
//! during a tick: such pairs are skipped silently.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, MirrorError>`.

use glam::Vec3;
use thiserror::Error;

use crate::mirror::Axis;

/// The main error type for the mirror rig.
#[derive(Error, Debug)]
pub enum MirrorError {
    // ========================================================================
    // Propagation Errors
    // ========================================================================
    /// The captured source scale cannot divide the current one (zero or non-finite ratio).
    #[error("degenerate initial scale: {axis:?} component of {scale} is zero or not finite")]
    DegenerateScale {
        /// First offending axis
        axis: Axis,
        /// The captured source scale
        scale: Vec3,
    },

    // ========================================================================
    // Pair Configuration Errors
    // ========================================================================
    /// The pair has an unset or destroyed source/target reference.
    #[error("pair is missing its source or target object")]
    MissingReference,

    /// Source and target refer to the same object.
    #[error("source and target must be different objects")]
    SameObject,

    /// The object already belongs to another pair.
    #[error("object '{name}' is already part of a pair")]
    DuplicateMembership {
        /// Display name of the object
        name: String,
    },

    /// Adding a pair from a selection requires exactly two objects.
    #[error("expected exactly two selected objects, got {count}")]
    InvalidSelection {
        /// Number of objects in the selection
        count: usize,
    },

    /// Pair index out of bounds.
    #[error("pair index out of bounds: {index} (len: {len})")]
    PairIndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of pairs in the session
        len: usize,
    },

    // ========================================================================
    // Lookup & Preset Errors
    // ========================================================================
    /// No object with this name exists in the scene.
    #[error("object not found in scene: '{0}'")]
    ObjectNotFound(String),

    /// Preset names must not be empty.
    #[error("invalid preset name")]
    InvalidPresetName,

    /// A preset with this name exists and overwriting was not requested.
    #[error("preset already exists: '{0}'")]
    PresetExists(String),

    /// The requested preset does not exist.
    #[error("preset not found: '{0}'")]
    PresetNotFound(String),

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MirrorError {
    /// Warning-level conditions leave the session untouched and are expected
    /// while a user is still editing pairs.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            MirrorError::MissingReference
                | MirrorError::DuplicateMembership { .. }
                | MirrorError::ObjectNotFound(_)
                | MirrorError::InvalidSelection { .. }
        )
    }
}

/// Alias for `Result<T, MirrorError>`.
pub type Result<T> = std::result::Result<T, MirrorError>;
