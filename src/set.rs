// SPDX-License-Identifier: MPL-2.0

//! The finite-set algebra: a simple set is an index into a shared,
//! ordered universe of labels; a composite set is a subset of that
//! universe represented as a disjoint union of singleton indices.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::rc::Rc;

use crate::error::AlgebraError;
use crate::sigma_algebra::{CompositeSet, SimpleSet};

/// A single member of a finite enumerated universe, identified by its index
/// into a shared, ordered list of labels.
///
/// `element_index == -1` is the canonical empty element, used the same way
/// [`SimpleInterval`](crate::interval::SimpleInterval) uses a canonical
/// zero-width open interval: as the result of an operation (typically an
/// intersection of two distinct indices) that has no member in the
/// universe, without needing an `Option` layer at every call site.
#[derive(Debug, Clone)]
pub struct SetElement<L: Clone + Eq + Ord + Display> {
    element_index: i64,
    all_elements: Rc<Vec<L>>,
}

impl<L: Clone + Eq + Ord + Display> SetElement<L> {
    const EMPTY_INDEX: i64 = -1;

    /// Build a `SetElement` from a validated index, checking
    /// `element_index ∈ {-1} ∪ [0, all_elements.len())`.
    pub fn new(element_index: i64, all_elements: Rc<Vec<L>>) -> Result<Self, AlgebraError> {
        if element_index != Self::EMPTY_INDEX
            && (element_index < 0 || element_index as usize >= all_elements.len())
        {
            return Err(AlgebraError::IndexOutOfBounds {
                index: element_index,
                universe_len: all_elements.len(),
            });
        }
        Ok(Self {
            element_index,
            all_elements,
        })
    }

    /// The canonical empty element over `all_elements`.
    pub fn empty(all_elements: Rc<Vec<L>>) -> Self {
        Self {
            element_index: Self::EMPTY_INDEX,
            all_elements,
        }
    }

    /// The index into `all_elements`, or `-1` for the empty element.
    pub fn element_index(&self) -> i64 {
        self.element_index
    }

    /// The shared universe this element is drawn from.
    pub fn all_elements(&self) -> &Rc<Vec<L>> {
        &self.all_elements
    }

    fn same_universe(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.all_elements, &other.all_elements)
    }

    fn require_same_universe(&self, other: &Self) {
        assert!(
            self.same_universe(other),
            "{}",
            AlgebraError::MismatchedUniverse
        );
    }

    fn label(&self) -> Option<&L> {
        if self.element_index == Self::EMPTY_INDEX {
            None
        } else {
            self.all_elements.get(self.element_index as usize)
        }
    }
}

impl<L: Clone + Eq + Ord + Display> PartialEq for SetElement<L> {
    fn eq(&self, other: &Self) -> bool {
        self.same_universe(other) && self.element_index == other.element_index
    }
}

impl<L: Clone + Eq + Ord + Display> Eq for SetElement<L> {}

impl<L: Clone + Eq + Ord + Display> PartialOrd for SetElement<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Clone + Eq + Ord + Display> Ord for SetElement<L> {
    /// Orders first by universe identity (so a `BTreeSet` of elements drawn
    /// from distinct universes is still well-ordered, even though combining
    /// them is rejected), then by index.
    fn cmp(&self, other: &Self) -> Ordering {
        let universe_order = (Rc::as_ptr(&self.all_elements) as usize)
            .cmp(&(Rc::as_ptr(&other.all_elements) as usize));
        universe_order.then_with(|| self.element_index.cmp(&other.element_index))
    }
}

impl<L: Clone + Eq + Ord + Display> Display for SetElement<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "∅"),
        }
    }
}

impl<L: Clone + Eq + Ord + Display> SimpleSet for SetElement<L> {
    type Composite = Set<L>;
    type Element = L;

    fn intersection_with(&self, other: &Self) -> Self {
        self.require_same_universe(other);
        if self.element_index == other.element_index {
            self.clone()
        } else {
            Self::empty(Rc::clone(&self.all_elements))
        }
    }

    fn complement(&self) -> Self::Composite {
        let members = (0..self.all_elements.len() as i64)
            .filter(|&index| index != self.element_index)
            .map(|index| Self {
                element_index: index,
                all_elements: Rc::clone(&self.all_elements),
            })
            .collect();
        Set::from_members(Rc::clone(&self.all_elements), members)
    }

    fn contains(&self, element: &Self::Element) -> bool {
        self.label() == Some(element)
    }

    fn is_empty(&self) -> bool {
        self.element_index == Self::EMPTY_INDEX
    }
}

/// A finite union of [`SetElement`]s drawn from a shared universe.
#[derive(Debug, Clone)]
pub struct Set<L: Clone + Eq + Ord + Display> {
    all_elements: Rc<Vec<L>>,
    simple_sets: std::collections::BTreeSet<SetElement<L>>,
}

impl<L: Clone + Eq + Ord + Display> Set<L> {
    /// The empty subset of `all_elements`.
    pub fn empty(all_elements: Rc<Vec<L>>) -> Self {
        Self {
            all_elements,
            simple_sets: std::collections::BTreeSet::new(),
        }
    }

    /// The whole universe, as a composite set.
    pub fn universe_of(all_elements: Rc<Vec<L>>) -> Self {
        let members = (0..all_elements.len() as i64)
            .map(|index| SetElement {
                element_index: index,
                all_elements: Rc::clone(&all_elements),
            })
            .collect();
        Self::from_members(all_elements, members)
    }

    /// Build a `Set` from validated indices, checking each one against
    /// `all_elements`.
    pub fn new(indices: &[i64], all_elements: Rc<Vec<L>>) -> Result<Self, AlgebraError> {
        let mut members = std::collections::BTreeSet::new();
        for &index in indices {
            let element = SetElement::new(index, Rc::clone(&all_elements))?;
            if !element.is_empty() {
                members.insert(element);
            }
        }
        Ok(Self {
            all_elements,
            simple_sets: members,
        })
    }

    fn from_members(
        all_elements: Rc<Vec<L>>,
        members: std::collections::BTreeSet<SetElement<L>>,
    ) -> Self {
        Self {
            all_elements,
            simple_sets: members.into_iter().filter(|m| !m.is_empty()).collect(),
        }
    }

    /// The shared universe this set is drawn from.
    pub fn all_elements(&self) -> &Rc<Vec<L>> {
        &self.all_elements
    }
}

impl<L: Clone + Eq + Ord + Display> PartialEq for Set<L> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.all_elements, &other.all_elements) && self.simple_sets == other.simple_sets
    }
}

impl<L: Clone + Eq + Ord + Display> Eq for Set<L> {}

impl<L: Clone + Eq + Ord + Display> Display for Set<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return write!(f, "∅");
        }
        let rendered: Vec<_> = self.simple_sets.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(" u "))
    }
}

impl<L: Clone + Eq + Ord + Display> CompositeSet for Set<L> {
    type Simple = SetElement<L>;
    type Element = L;

    fn simple_sets(&self) -> &std::collections::BTreeSet<Self::Simple> {
        &self.simple_sets
    }

    fn with_members(&self, simple_sets: std::collections::BTreeSet<Self::Simple>) -> Self {
        Self::from_members(Rc::clone(&self.all_elements), simple_sets)
    }

    fn universe(&self) -> Self {
        Self::universe_of(Rc::clone(&self.all_elements))
    }

    /// Members of a `Set` are already singleton-disjoint by construction; the
    /// only work left is to drop any empty elements that slipped through.
    fn simplify(&self) -> Self {
        Self::from_members(Rc::clone(&self.all_elements), self.simple_sets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Rc<Vec<&'static str>> {
        Rc::new(vec!["a", "b", "c"])
    }

    #[test]
    fn intersection_of_distinct_indices_is_empty() {
        let u = universe();
        let one = SetElement::new(1, Rc::clone(&u)).unwrap();
        let two = SetElement::new(2, Rc::clone(&u)).unwrap();
        assert!(one.intersection_with(&two).is_empty());
        assert_eq!(one.intersection_with(&one), one);
    }

    #[test]
    fn complement_of_singleton_has_the_other_two_indices() {
        let u = universe();
        let one = SetElement::new(1, Rc::clone(&u)).unwrap();
        let complement = one.complement();
        assert_eq!(complement.simple_sets().len(), 2);
        let indices: Vec<_> = complement
            .simple_sets()
            .iter()
            .map(SetElement::element_index)
            .collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn simple_set_difference_with_disjoint_other_is_self() {
        let u = universe();
        let one = SetElement::new(1, Rc::clone(&u)).unwrap();
        let two = SetElement::new(2, Rc::clone(&u)).unwrap();
        let difference = one.difference_with(&two);
        assert_eq!(difference.simple_sets().len(), 1);
        assert_eq!(
            difference.simple_sets().iter().next().unwrap().element_index(),
            1
        );
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let u = universe();
        let err = SetElement::new(3, u).unwrap_err();
        assert!(matches!(err, AlgebraError::IndexOutOfBounds { .. }));
    }

    #[test]
    fn set_complement_compacts_into_one_composite() {
        let u = universe();
        let one = Set::new(&[1], Rc::clone(&u)).unwrap();
        let complement = one.complement();
        assert_eq!(complement.simple_sets().len(), 2);
    }

    #[test]
    #[should_panic]
    fn mismatched_universe_intersection_panics() {
        let a = SetElement::new(0, Rc::new(vec!["x", "y"])).unwrap();
        let b = SetElement::new(0, Rc::new(vec!["x", "y"])).unwrap();
        a.intersection_with(&b);
    }
}
