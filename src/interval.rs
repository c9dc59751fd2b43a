// SPDX-License-Identifier: MPL-2.0

//! Intervals are constraints defining sets of values over a totally ordered
//! (modulo NaN) element type.
//!
//! Concretely, those constraints correspond to any set of values
//! representable as the union, intersection and complement of the building
//! blocks below:
//!  - [`Interval::empty`]: the empty set
//!  - [`Interval::reals`]: the set of all possible values
//!  - [`Interval::singleton`]: the set containing only one value
//!  - [`Interval::closed`], [`Interval::open`], [`Interval::closed_open`],
//!    [`Interval::open_closed`]: the four border combinations of a bounded
//!    range.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::bounded::Bounded;
use crate::sigma_algebra::{CompositeSet, SimpleSet};

/// Whether an interval endpoint includes the boundary value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderType {
    /// The boundary value is excluded from the interval.
    Open,
    /// The boundary value is included in the interval.
    Closed,
}

impl BorderType {
    fn flip(self) -> Self {
        match self {
            BorderType::Open => BorderType::Closed,
            BorderType::Closed => BorderType::Open,
        }
    }

    /// Rank used when this border sits at the left (lower) end of an
    /// interval: open is stricter than closed, so it sorts first.
    fn left_rank(self) -> u8 {
        match self {
            BorderType::Open => 0,
            BorderType::Closed => 1,
        }
    }

    /// Rank used when this border sits at the right (upper) end of an
    /// interval: closed sorts first, open (stricter) sorts last.
    fn right_rank(self) -> u8 {
        match self {
            BorderType::Closed => 0,
            BorderType::Open => 1,
        }
    }
}

/// Whichever of two borders excludes more of the boundary wins: `Open`
/// always beats `Closed` since it is the stricter constraint.
fn stricter(a: BorderType, b: BorderType) -> BorderType {
    if a == BorderType::Open || b == BorderType::Open {
        BorderType::Open
    } else {
        BorderType::Closed
    }
}

/// Whichever of two borders includes more of the boundary wins: `Closed`
/// beats `Open` when merging two touching intervals into one.
fn looser(a: BorderType, b: BorderType) -> BorderType {
    if a == BorderType::Closed || b == BorderType::Closed {
        BorderType::Closed
    } else {
        BorderType::Open
    }
}

fn cmp<T: Bounded>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b)
        .expect("interval endpoints must be totally ordered (NaN is out of contract)")
}

/// A single, connected interval `[lower, upper]` (borders per-side).
#[derive(Debug, Clone)]
pub struct SimpleInterval<T: Bounded> {
    pub lower: T,
    pub upper: T,
    pub left: BorderType,
    pub right: BorderType,
}

impl<T: Bounded> SimpleInterval<T> {
    /// Build an interval, normalizing to the canonical empty form whenever
    /// `lower > upper`, or `lower == upper` with an open border on either
    /// side.
    pub fn new(lower: T, upper: T, left: BorderType, right: BorderType) -> Self {
        let is_empty = match cmp(&lower, &upper) {
            Ordering::Greater => true,
            Ordering::Equal => left == BorderType::Open || right == BorderType::Open,
            Ordering::Less => false,
        };
        if is_empty {
            Self::canonical_empty()
        } else {
            Self {
                lower,
                upper,
                left,
                right,
            }
        }
    }

    fn canonical_empty() -> Self {
        Self {
            lower: T::min_value(),
            upper: T::min_value(),
            left: BorderType::Open,
            right: BorderType::Open,
        }
    }

    /// A closed interval `[lower, upper]`.
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(lower, upper, BorderType::Closed, BorderType::Closed)
    }

    /// An open interval `(lower, upper)`.
    pub fn open(lower: T, upper: T) -> Self {
        Self::new(lower, upper, BorderType::Open, BorderType::Open)
    }

    /// A half-open interval `[lower, upper)`.
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::new(lower, upper, BorderType::Closed, BorderType::Open)
    }

    /// A half-open interval `(lower, upper]`.
    pub fn open_closed(lower: T, upper: T) -> Self {
        Self::new(lower, upper, BorderType::Open, BorderType::Closed)
    }

    /// The single value `{value}`, as a closed, zero-width interval.
    pub fn singleton(value: T) -> Self {
        Self::closed(value.clone(), value)
    }

    /// The whole domain `(-∞, +∞)`.
    pub fn reals() -> Self {
        Self {
            lower: T::min_value(),
            upper: T::max_value(),
            left: BorderType::Open,
            right: BorderType::Open,
        }
    }
}

impl<T: Bounded> PartialEq for SimpleInterval<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower
            && self.upper == other.upper
            && self.left == other.left
            && self.right == other.right
    }
}

impl<T: Bounded> Eq for SimpleInterval<T> {}

impl<T: Bounded> PartialOrd for SimpleInterval<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bounded> Ord for SimpleInterval<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp(&self.lower, &other.lower)
            .then_with(|| cmp(&self.upper, &other.upper))
            .then_with(|| self.left.left_rank().cmp(&other.left.left_rank()))
            .then_with(|| self.right.right_rank().cmp(&other.right.right_rank()))
    }
}

impl<T: Bounded> fmt::Display for SimpleInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }
        let left = match self.left {
            BorderType::Closed => '[',
            BorderType::Open => '(',
        };
        let right = match self.right {
            BorderType::Closed => ']',
            BorderType::Open => ')',
        };
        write!(f, "{left}{}, {}{right}", self.lower, self.upper)
    }
}

impl<T: Bounded> SimpleSet for SimpleInterval<T> {
    type Composite = Interval<T>;
    type Element = T;

    fn intersection_with(&self, other: &Self) -> Self {
        let (lower, left) = match cmp(&self.lower, &other.lower) {
            Ordering::Greater => (self.lower.clone(), self.left),
            Ordering::Less => (other.lower.clone(), other.left),
            Ordering::Equal => (self.lower.clone(), stricter(self.left, other.left)),
        };
        let (upper, right) = match cmp(&self.upper, &other.upper) {
            Ordering::Less => (self.upper.clone(), self.right),
            Ordering::Greater => (other.upper.clone(), other.right),
            Ordering::Equal => (self.upper.clone(), stricter(self.right, other.right)),
        };
        Self::new(lower, upper, left, right)
    }

    fn complement(&self) -> Self::Composite {
        if self.is_empty() {
            return Interval::reals();
        }
        let below = Self::new(
            T::min_value(),
            self.lower.clone(),
            BorderType::Open,
            self.left.flip(),
        );
        let above = Self::new(
            self.upper.clone(),
            T::max_value(),
            self.right.flip(),
            BorderType::Open,
        );
        let mut members = BTreeSet::new();
        if !below.is_empty() {
            members.insert(below);
        }
        if !above.is_empty() {
            members.insert(above);
        }
        Interval::from_simple_sets(members)
    }

    fn contains(&self, element: &Self::Element) -> bool {
        let above_lower = match cmp(element, &self.lower) {
            Ordering::Greater => true,
            Ordering::Equal => self.left == BorderType::Closed,
            Ordering::Less => false,
        };
        let below_upper = match cmp(element, &self.upper) {
            Ordering::Less => true,
            Ordering::Equal => self.right == BorderType::Closed,
            Ordering::Greater => false,
        };
        above_lower && below_upper
    }

    fn is_empty(&self) -> bool {
        match cmp(&self.lower, &self.upper) {
            Ordering::Greater => true,
            Ordering::Equal => self.left == BorderType::Open || self.right == BorderType::Open,
            Ordering::Less => false,
        }
    }
}

/// A disjoint (after [`simplify`](CompositeSet::simplify)) union of
/// [`SimpleInterval`]s.
#[derive(Debug, Clone)]
pub struct Interval<T: Bounded> {
    simple_sets: BTreeSet<SimpleInterval<T>>,
}

impl<T: Bounded> PartialEq for Interval<T> {
    fn eq(&self, other: &Self) -> bool {
        self.simple_sets == other.simple_sets
    }
}

impl<T: Bounded> Eq for Interval<T> {}

impl<T: Bounded> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return write!(f, "∅");
        }
        let rendered: Vec<_> = self.simple_sets.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(" u "))
    }
}

impl<T: Bounded> Interval<T> {
    /// Build an interval from a set of simple intervals, dropping any that
    /// are already empty. The universe for `Interval<T>` is implied purely
    /// by `T`, so unlike [`Set`](crate::set::Set) or
    /// [`Event`](crate::product_algebra::Event) no extra context needs to be
    /// threaded through here.
    fn from_simple_sets(simple_sets: BTreeSet<SimpleInterval<T>>) -> Self {
        Self {
            simple_sets: simple_sets.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// The empty set of values.
    pub fn empty() -> Self {
        Self {
            simple_sets: BTreeSet::new(),
        }
    }

    /// The whole domain `(-∞, +∞)`.
    pub fn reals() -> Self {
        Self::from_simple_sets(std::iter::once(SimpleInterval::reals()).collect())
    }

    /// The single value `{value}`.
    pub fn singleton(value: T) -> Self {
        Self::from_simple_sets(std::iter::once(SimpleInterval::singleton(value)).collect())
    }

    /// A closed interval `[lower, upper]`.
    pub fn closed(lower: T, upper: T) -> Self {
        Self::from_simple_sets(std::iter::once(SimpleInterval::closed(lower, upper)).collect())
    }

    /// An open interval `(lower, upper)`.
    pub fn open(lower: T, upper: T) -> Self {
        Self::from_simple_sets(std::iter::once(SimpleInterval::open(lower, upper)).collect())
    }

    /// A half-open interval `[lower, upper)`.
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::from_simple_sets(
            std::iter::once(SimpleInterval::closed_open(lower, upper)).collect(),
        )
    }

    /// A half-open interval `(lower, upper]`.
    pub fn open_closed(lower: T, upper: T) -> Self {
        Self::from_simple_sets(
            std::iter::once(SimpleInterval::open_closed(lower, upper)).collect(),
        )
    }
}

impl<T: Bounded> CompositeSet for Interval<T> {
    type Simple = SimpleInterval<T>;
    type Element = T;

    fn simple_sets(&self) -> &BTreeSet<Self::Simple> {
        &self.simple_sets
    }

    fn with_members(&self, simple_sets: BTreeSet<Self::Simple>) -> Self {
        Self::from_simple_sets(simple_sets)
    }

    fn universe(&self) -> Self {
        Self::reals()
    }

    fn simplify(&self) -> Self {
        let mut merged: Vec<SimpleInterval<T>> = Vec::with_capacity(self.simple_sets.len());
        for current in self.simple_sets.iter().cloned() {
            let merge_into_last = match merged.last() {
                None => false,
                Some(last) => match cmp(&last.upper, &current.lower) {
                    Ordering::Greater => true,
                    Ordering::Equal => {
                        last.right == BorderType::Closed || current.left == BorderType::Closed
                    }
                    Ordering::Less => false,
                },
            };

            if merge_into_last {
                let last = merged.last_mut().expect("checked above");
                let (new_upper, new_right) = match cmp(&last.upper, &current.upper) {
                    Ordering::Greater => (last.upper.clone(), last.right),
                    Ordering::Less => (current.upper.clone(), current.right),
                    Ordering::Equal => (last.upper.clone(), looser(last.right, current.right)),
                };
                last.upper = new_upper;
                last.right = new_right;
            } else {
                merged.push(current);
            }
        }
        Self {
            simple_sets: merged.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_open_union_simplifies_to_a_single_interval() {
        let merged = Interval::closed(0.0, 1.0)
            .union_with(&Interval::open(1.0, 2.0))
            .simplify();
        assert_eq!(merged.simple_sets().len(), 1);
        let only = merged.simple_sets().iter().next().unwrap();
        assert_eq!(only.lower, 0.0);
        assert_eq!(only.upper, 2.0);
        assert_eq!(only.left, BorderType::Closed);
        assert_eq!(only.right, BorderType::Open);
    }

    #[test]
    fn disjoint_intervals_do_not_merge() {
        let combined = Interval::closed(0.0, 1.0)
            .union_with(&Interval::closed(2.0, 3.0))
            .simplify();
        assert_eq!(combined.simple_sets().len(), 2);
    }

    #[test]
    fn complement_of_reals_is_empty() {
        assert_eq!(Interval::<f64>::reals().complement(), Interval::empty());
    }

    #[test]
    fn complement_of_empty_is_reals() {
        assert_eq!(Interval::<f64>::empty().complement(), Interval::reals());
    }

    #[test]
    fn double_complement_is_identity() {
        let interval = Interval::closed(1.0, 5.0);
        assert_eq!(interval.complement().complement(), interval);
    }

    #[test]
    fn contains_respects_borders() {
        let interval = SimpleInterval::closed_open(0.0, 1.0);
        assert!(interval.contains(&0.0));
        assert!(!interval.contains(&1.0));
    }

    #[test]
    fn intersection_picks_stricter_border_on_tie() {
        let a = SimpleInterval::closed(0.0, 1.0);
        let b = SimpleInterval::open(0.0, 2.0);
        let intersected = a.intersection_with(&b);
        assert_eq!(intersected.lower, 0.0);
        assert_eq!(intersected.left, BorderType::Open);
    }

    #[test]
    fn union_difference_identity_holds() {
        let a = Interval::closed(0.0, 3.0);
        let b = Interval::closed(2.0, 5.0);
        let lhs = a.union_with(&b).difference_with(&a);
        let rhs = b.difference_with(&a);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn integer_interval_extrema_use_min_max() {
        let interval: Interval<i64> = Interval::reals();
        let only = interval.simple_sets().iter().next().unwrap();
        assert_eq!(only.lower, i64::MIN);
        assert_eq!(only.upper, i64::MAX);
    }
}
