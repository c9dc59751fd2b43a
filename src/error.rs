// SPDX-License-Identifier: MPL-2.0

//! Errors produced by the public, checked entry points of the algebra.
//!
//! Most of this crate is total: empty sets, zero-width intervals and empty
//! simple events are legitimate values, not errors. The few genuinely
//! fallible operations (building a [`SetElement`](crate::set::SetElement)
//! from an untrusted index, combining values drawn from different
//! universes) report through this enum instead of panicking.

use thiserror::Error;

/// Errors raised by the checked constructors and universe checks of the algebra.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AlgebraError {
    /// An `element_index` was outside `{-1} ∪ [0, len)` for the given universe.
    #[error("element index {index} is out of bounds for a universe of size {universe_len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: i64,
        /// The size of the universe it was checked against.
        universe_len: usize,
    },

    /// Two values that are only comparable when they share a universe did not.
    #[error("values reference different universes and cannot be combined")]
    MismatchedUniverse,

    /// A composite event contained two structurally-equal simple events, which
    /// violates the invariant that `simplify_once` relies on to terminate.
    #[error("composite event contained two equal simple events: {0}")]
    DuplicateSimpleEvent(String),
}
