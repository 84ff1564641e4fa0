// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

/// Listener registration failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The typename named a kind other than `start`, `move`, `up`, or `end`.
    #[error("unknown event kind: {0}")]
    UnknownKind(String),
}

/// [`AffineResolver`](crate::types::AffineResolver) could not map a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The container transform has no inverse.
    #[error("container transform is not invertible")]
    SingularTransform,
}

/// Processing a pointer input failed.
#[derive(Debug, thiserror::Error)]
pub enum GestureError<E: core::error::Error + 'static> {
    /// The coordinate resolver rejected the input.
    #[error("failed to resolve local coordinates")]
    Resolve(#[source] E),
}
