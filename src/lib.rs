// SPDX-License-Identifier: MPL-2.0

//! A sigma-algebra over product spaces: a symbolic engine for representing
//! and exactly manipulating sets drawn from a Boolean algebra over one or
//! more typed variables.
//!
//! The crate is built around a single abstract contract,
//! [`SimpleSet`]/[`CompositeSet`], instantiated twice:
//!
//! - [`Interval`]/[`SimpleInterval`]: a disjoint union of `[lower, upper]`
//!   ranges over any [`Bounded`] element type.
//! - [`Set`]/[`SetElement`]: a subset of a shared, finite enumeration.
//!
//! Those two, together with [`Variable`], compose into the product algebra:
//! [`Event`]/[`SimpleEvent`] represent axis-aligned rectangles (and unions
//! of them) over several variables at once.
//!
//! ```
//! use random_events::{CompositeSet, Interval};
//!
//! let a = Interval::closed(0.0, 2.0);
//! let b = Interval::closed(1.0, 3.0);
//! let overlap = a.intersection_with(&b);
//! assert_eq!(overlap, Interval::closed(1.0, 2.0));
//! ```

mod bounded;
mod error;
mod interval;
mod product_algebra;
mod set;
mod sigma_algebra;
mod variable;

pub use bounded::Bounded;
pub use error::AlgebraError;
pub use interval::{BorderType, Interval, SimpleInterval};
pub use product_algebra::{ElementaryEvent, Event, SimpleEvent};
pub use set::{Set, SetElement};
pub use sigma_algebra::{unique_combinations, CompositeSet, SimpleSet};
pub use variable::{Assignment, AssignmentSet, Variable, VariableKind};
