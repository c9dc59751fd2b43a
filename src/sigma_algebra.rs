// SPDX-License-Identifier: MPL-2.0

//! The abstract simple-set / composite-set contract every algebra in this
//! crate is built on.
//!
//! [`SimpleSet`] describes an atomic, connected member of an algebra (one
//! interval, one finite-set element, one axis-aligned rectangle).
//! [`CompositeSet`] closes the algebra into a finite union of simple sets and
//! derives union, difference, disjointification and complement generically
//! from a handful of domain-specific primitives.
//!
//! Both traits are capability traits tied together by associated types,
//! rather than a trait-object hierarchy with downcasts: `Simple::Composite`
//! and `Composite::Simple` must name each other, so the compiler checks the
//! pairing at every call site.

use std::collections::BTreeSet;
use std::fmt::Display;

/// An atomic, connected member of a set algebra.
pub trait SimpleSet: Clone + Eq + Ord + Display {
    /// The composite (finite-union) type this simple set belongs to.
    type Composite: CompositeSet<Simple = Self, Element = Self::Element>;
    /// The type of elementary points this set can contain.
    type Element;

    /// Intersect this simple set with another one of the same kind.
    fn intersection_with(&self, other: &Self) -> Self;

    /// The complement of this simple set within its containing universe.
    ///
    /// A single simple set's complement is generally not itself simple
    /// (e.g. the complement of an interval is up to two intervals), so this
    /// returns a composite.
    fn complement(&self) -> Self::Composite;

    /// Whether `element` is a member of this set.
    fn contains(&self, element: &Self::Element) -> bool;

    /// Whether this set has no members.
    fn is_empty(&self) -> bool;

    /// The difference `self \ other`, expressed generically in terms of
    /// [`intersection_with`](Self::intersection_with) and
    /// [`complement`](Self::complement): if the intersection is empty,
    /// `self` is already disjoint from `other` and is returned unchanged;
    /// otherwise the complement of the intersection is carved back out of
    /// `self` piece by piece.
    fn difference_with(&self, other: &Self) -> Self::Composite {
        let intersection = self.intersection_with(other);
        if intersection.is_empty() {
            return self
                .complement()
                .with_members(std::iter::once(self.clone()).collect());
        }

        let complement_of_intersection = intersection.complement();
        let mut remainder = BTreeSet::new();
        for piece in complement_of_intersection.simple_sets() {
            let carved = self.intersection_with(piece);
            if !carved.is_empty() {
                remainder.insert(carved);
            }
        }
        complement_of_intersection.with_members(remainder)
    }
}

/// A finite union of [`SimpleSet`]s, closing the algebra under complement,
/// union, intersection and difference.
pub trait CompositeSet: Clone + Eq + Display + Sized {
    /// The simple-set type this composite is built from.
    type Simple: SimpleSet<Composite = Self, Element = Self::Element>;
    /// The type of elementary points members of this composite can contain.
    type Element;

    /// Borrow the disjoint-or-not member simple sets.
    fn simple_sets(&self) -> &BTreeSet<Self::Simple>;

    /// Build a new composite carrying the same context as `self` (a shared
    /// element universe, a shared variable set, ...) but with a different
    /// member set. Any member that is already empty is dropped.
    ///
    /// Every generic algorithm below goes through this instead of a bare
    /// static constructor precisely so that context living outside
    /// `simple_sets` (e.g. [`Set`](crate::set::Set)'s shared universe or
    /// [`Event`](crate::product_algebra::Event)'s shared variable set)
    /// survives operations that happen to produce zero members.
    fn with_members(&self, simple_sets: BTreeSet<Self::Simple>) -> Self;

    /// The full composite set for the universe `self` lives in (e.g. all
    /// reals, the whole finite-set universe, the whole product space).
    fn universe(&self) -> Self;

    /// A canonical, reduced representation with no two members that could be
    /// merged into a single simple set. Domain-specific: the merge rule
    /// differs per algebra (adjacent intervals, finite-set member pruning,
    /// rectangles differing on exactly one axis).
    fn simplify(&self) -> Self;

    /// Whether this composite has no members.
    fn is_empty(&self) -> bool {
        self.simple_sets().is_empty()
    }

    /// Whether `element` is contained in any member.
    fn contains(&self, element: &Self::Element) -> bool {
        self.simple_sets().iter().any(|member| member.contains(element))
    }

    /// Whether every unique pair of members has an empty intersection.
    fn is_disjoint(&self) -> bool {
        let members: Vec<_> = self.simple_sets().iter().cloned().collect();
        unique_combinations(&members).all(|(a, b)| a.intersection_with(&b).is_empty())
    }

    /// Insert a simple set, returning a fresh composite. The insertion is
    /// non-destructive: `self` is untouched. An empty `simple_set` is
    /// dropped rather than inserted.
    fn add_new_simple_set(&self, simple_set: Self::Simple) -> Self {
        if simple_set.is_empty() {
            return self.clone();
        }
        let mut members = self.simple_sets().clone();
        members.insert(simple_set);
        self.with_members(members)
    }

    /// The pairwise intersection of every member of `self` with every member
    /// of `other`, keeping only the non-empty results.
    fn intersection_with(&self, other: &Self) -> Self {
        let mut members = BTreeSet::new();
        for a in self.simple_sets() {
            for b in other.simple_sets() {
                let piece = a.intersection_with(b);
                if !piece.is_empty() {
                    members.insert(piece);
                }
            }
        }
        self.with_members(members)
    }

    /// The union of `self` and `other`, made disjoint and simplified.
    fn union_with(&self, other: &Self) -> Self {
        let mut members = self.simple_sets().clone();
        for member in other.simple_sets() {
            if !member.is_empty() {
                members.insert(member.clone());
            }
        }
        self.with_members(members).make_disjoint()
    }

    /// The complement of `self` within [`universe`](Self::universe),
    /// computed as the intersection of the per-member complements.
    fn complement(&self) -> Self {
        self.simple_sets()
            .iter()
            .fold(self.universe(), |acc, member| {
                acc.intersection_with(&member.complement())
            })
    }

    /// `self \ other`, expressed as `self ∩ complement(other)`.
    fn difference_with(&self, other: &Self) -> Self {
        self.intersection_with(&other.complement())
    }

    /// Return an equivalent composite whose members are pairwise disjoint,
    /// then [`simplify`](Self::simplify) it.
    ///
    /// Fixpoint algorithm: repeatedly split the current member set into a
    /// part that is already disjoint from everything else and a part made
    /// up of pairwise intersections, accumulating the disjoint part and
    /// recursing on the rest until nothing intersects anymore.
    fn make_disjoint(&self) -> Self {
        let mut accumulated = BTreeSet::new();
        let mut remaining = self.clone();
        loop {
            let (disjoint, intersecting) = remaining.split_into_disjoint_and_intersecting();
            for member in disjoint.simple_sets() {
                accumulated.insert(member.clone());
            }
            if intersecting.is_empty() {
                break;
            }
            remaining = intersecting;
        }
        self.with_members(accumulated).simplify()
    }

    /// Split the member set into pieces already disjoint from every other
    /// member (`.0`) and the pairwise overlaps still left to resolve (`.1`).
    ///
    /// For each member, subtract the union of every *later* member (in the
    /// set's iteration order) from it; what remains is disjoint from those
    /// later members by construction. Every non-empty pairwise intersection
    /// with a later member is collected separately to be re-split on the
    /// next fixpoint iteration.
    fn split_into_disjoint_and_intersecting(&self) -> (Self, Self) {
        let members: Vec<_> = self.simple_sets().iter().cloned().collect();
        let mut disjoint = BTreeSet::new();
        let mut intersecting = BTreeSet::new();

        for i in 0..members.len() {
            let current = &members[i];
            let later: BTreeSet<_> = members[i + 1..].iter().cloned().collect();
            let later_union = self.with_members(later);

            let current_as_composite = self.with_members(std::iter::once(current.clone()).collect());
            let remainder = current_as_composite.difference_with(&later_union);
            for piece in remainder.simple_sets() {
                disjoint.insert(piece.clone());
            }

            for other in &members[i + 1..] {
                let overlap = current.intersection_with(other);
                if !overlap.is_empty() {
                    intersecting.insert(overlap);
                }
            }
        }

        (self.with_members(disjoint), self.with_members(intersecting))
    }
}

/// All unique unordered pairs `(elements[i], elements[j])` with `j < i`.
///
/// Excludes symmetric pairs `(A, A)` and, for any pair, visits only one of
/// `(A, B)` / `(B, A)`.
pub fn unique_combinations<T: Clone>(elements: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    (0..elements.len()).flat_map(move |i| (0..i).map(move |j| (elements[i].clone(), elements[j].clone())))
}
