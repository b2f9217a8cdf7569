// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    /// No trace is loaded
    #[error("Cannot {action}: compute a convolution first")]
    NotReady { action: &'static str },
}
