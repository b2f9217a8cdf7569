// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Session layer error types.

Every variant is recoverable: it is raised before any state is touched and
reported to whichever UI drives the session.
*/

use convscope_animation::AnimationError;
use convscope_engine::{ConvolutionError, DimensionFailure};
use convscope_structures::ConvscopeDataError;
use thiserror::Error;

/// Session layer errors (UI-agnostic)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Output size would be empty along an axis, or the stride is zero
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(DimensionFailure),

    /// 3D only
    #[error("Kernel depth ({kernel_depth}) must match input depth ({input_depth})")]
    KernelDepthMismatch {
        kernel_depth: usize,
        input_depth: usize,
    },

    /// Cell input that was not applied
    #[error("Rejected edit: {0}")]
    RejectedEdit(String),

    /// No grids or no trace for the requested action
    #[error("Not ready: cannot {action}, {hint}")]
    NotReady {
        action: &'static str,
        hint: &'static str,
    },

    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            SessionError::KernelDepthMismatch { .. } => "KERNEL_DEPTH_MISMATCH",
            SessionError::RejectedEdit(_) => "REJECTED_EDIT",
            SessionError::NotReady { .. } => "NOT_READY",
            SessionError::UnknownPreset(_) => "UNKNOWN_PRESET",
            SessionError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

// ============================================================================
// ERROR CONVERSIONS FROM LOWER LAYERS
// ============================================================================

impl From<ConvolutionError> for SessionError {
    fn from(err: ConvolutionError) -> Self {
        match err {
            ConvolutionError::InvalidConfiguration(failure) => {
                SessionError::InvalidConfiguration(failure)
            }
            ConvolutionError::KernelDepthMismatch {
                kernel_depth,
                input_depth,
            } => SessionError::KernelDepthMismatch {
                kernel_depth,
                input_depth,
            },
            ConvolutionError::Data(data) => SessionError::InvalidInput(data.to_string()),
        }
    }
}

impl From<DimensionFailure> for SessionError {
    fn from(failure: DimensionFailure) -> Self {
        SessionError::InvalidConfiguration(failure)
    }
}

impl From<AnimationError> for SessionError {
    fn from(err: AnimationError) -> Self {
        match err {
            AnimationError::NotReady { action } => SessionError::NotReady {
                action,
                hint: "compute a convolution first",
            },
        }
    }
}

impl From<ConvscopeDataError> for SessionError {
    fn from(err: ConvscopeDataError) -> Self {
        SessionError::InvalidInput(err.to_string())
    }
}
