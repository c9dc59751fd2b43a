// SPDX-License-Identifier: MPL-2.0

//! Variables are opaque, identity-compared axis labels. Each carries a
//! domain (the universe complements are computed against on that axis) and
//! is distinguished from any other variable, even one with the same name,
//! by a small identity assigned at construction time.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::rc::Rc;

use crate::interval::Interval;
use crate::set::Set;
use crate::sigma_algebra::CompositeSet;

thread_local! {
    static NEXT_ID: RefCell<usize> = const { RefCell::new(0) };
}

fn next_id() -> usize {
    NEXT_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    })
}

/// The kind of values a [`Variable`] ranges over, and the domain that
/// implies.
#[derive(Debug, Clone)]
pub enum VariableKind {
    /// Ranges over all real numbers.
    Continuous,
    /// Ranges over all integers.
    Integer,
    /// Ranges over a fixed, named finite enumeration.
    Symbolic(Set<String>),
}

/// An opaque axis identifier in product space.
///
/// Two variables are equal only if they are the *same* variable: identity is
/// a monotonically-increasing id assigned at construction, never the name,
/// so two variables created with the same name are still distinct axes.
#[derive(Debug, Clone)]
pub struct Variable {
    id: usize,
    name: Rc<str>,
    kind: Rc<VariableKind>,
}

impl Variable {
    /// A continuous, real-valued variable.
    pub fn continuous(name: impl Into<Rc<str>>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            kind: Rc::new(VariableKind::Continuous),
        }
    }

    /// An integer-valued variable.
    pub fn integer(name: impl Into<Rc<str>>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            kind: Rc::new(VariableKind::Integer),
        }
    }

    /// A symbolic variable ranging over `domain`.
    pub fn symbolic(name: impl Into<Rc<str>>, domain: Set<String>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            kind: Rc::new(VariableKind::Symbolic(domain)),
        }
    }

    /// The variable's display name. Not used for identity or ordering.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This variable's kind.
    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    /// The stable identity used for equality, ordering and hashing.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The per-axis assignment a [`SimpleEvent`](crate::product_algebra::SimpleEvent)
/// can hold, one variant per [`VariableKind`].
///
/// A sealed sum type rather than a trait object: every algebra this crate
/// supports is known ahead of time, so `match` dispatch needs no downcasts.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// A concrete real number, for a [`VariableKind::Continuous`] axis.
    Continuous(f64),
    /// A concrete integer, for a [`VariableKind::Integer`] axis.
    Integer(i64),
    /// A concrete label, for a [`VariableKind::Symbolic`] axis.
    Symbolic(String),
}

/// The per-axis composite-set value stored for a variable inside a
/// [`SimpleEvent`](crate::product_algebra::SimpleEvent), one variant per
/// [`VariableKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentSet {
    /// A composite set of reals.
    Continuous(Interval<f64>),
    /// A composite set of integers.
    Integer(Interval<i64>),
    /// A composite set of labels.
    Symbolic(Set<String>),
}

impl AssignmentSet {
    /// The unconstrained assignment for `kind`: the variable's full domain.
    pub fn full(kind: &VariableKind) -> Self {
        match kind {
            VariableKind::Continuous => AssignmentSet::Continuous(Interval::reals()),
            VariableKind::Integer => AssignmentSet::Integer(Interval::reals()),
            VariableKind::Symbolic(domain) => AssignmentSet::Symbolic(domain.universe()),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            AssignmentSet::Continuous(_) => 0,
            AssignmentSet::Integer(_) => 1,
            AssignmentSet::Symbolic(_) => 2,
        }
    }

    /// The composite-level complement within this axis's own domain.
    pub fn complement(&self) -> Self {
        match self {
            AssignmentSet::Continuous(set) => AssignmentSet::Continuous(set.complement()),
            AssignmentSet::Integer(set) => AssignmentSet::Integer(set.complement()),
            AssignmentSet::Symbolic(set) => AssignmentSet::Symbolic(set.complement()),
        }
    }

    /// Intersect two assignments of the same variant. Panics if the variants
    /// differ, which should never happen for two assignments of the same
    /// variable.
    pub fn intersection_with(&self, other: &Self) -> Self {
        match (self, other) {
            (AssignmentSet::Continuous(a), AssignmentSet::Continuous(b)) => {
                AssignmentSet::Continuous(a.intersection_with(b))
            }
            (AssignmentSet::Integer(a), AssignmentSet::Integer(b)) => {
                AssignmentSet::Integer(a.intersection_with(b))
            }
            (AssignmentSet::Symbolic(a), AssignmentSet::Symbolic(b)) => {
                AssignmentSet::Symbolic(a.intersection_with(b))
            }
            _ => panic!("cannot intersect assignments of different variable kinds"),
        }
    }

    /// Union two assignments of the same variant. Panics if the variants
    /// differ, which should never happen for two assignments of the same
    /// variable.
    pub fn union_with(&self, other: &Self) -> Self {
        match (self, other) {
            (AssignmentSet::Continuous(a), AssignmentSet::Continuous(b)) => {
                AssignmentSet::Continuous(a.union_with(b))
            }
            (AssignmentSet::Integer(a), AssignmentSet::Integer(b)) => {
                AssignmentSet::Integer(a.union_with(b))
            }
            (AssignmentSet::Symbolic(a), AssignmentSet::Symbolic(b)) => {
                AssignmentSet::Symbolic(a.union_with(b))
            }
            _ => panic!("cannot union assignments of different variable kinds"),
        }
    }

    /// Whether this assignment has no members.
    pub fn is_empty(&self) -> bool {
        match self {
            AssignmentSet::Continuous(set) => set.is_empty(),
            AssignmentSet::Integer(set) => set.is_empty(),
            AssignmentSet::Symbolic(set) => set.is_empty(),
        }
    }

    /// Whether `value` is a member of this assignment. `false` if `value`'s
    /// variant does not match this assignment's.
    pub fn contains(&self, value: &Assignment) -> bool {
        match (self, value) {
            (AssignmentSet::Continuous(set), Assignment::Continuous(x)) => set.contains(x),
            (AssignmentSet::Integer(set), Assignment::Integer(x)) => set.contains(x),
            (AssignmentSet::Symbolic(set), Assignment::Symbolic(x)) => set.contains(x),
            _ => false,
        }
    }
}

impl Display for AssignmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentSet::Continuous(set) => write!(f, "{set}"),
            AssignmentSet::Integer(set) => write!(f, "{set}"),
            AssignmentSet::Symbolic(set) => write!(f, "{set}"),
        }
    }
}

impl PartialOrd for AssignmentSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AssignmentSet {
    /// Same-variant assignments compare by their member simple sets
    /// (already totally ordered); assignments of different variants, which
    /// should never occur for the same variable, fall back to a stable
    /// variant rank so the impl is still a total order.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AssignmentSet::Continuous(a), AssignmentSet::Continuous(b)) => {
                a.simple_sets().cmp(b.simple_sets())
            }
            (AssignmentSet::Integer(a), AssignmentSet::Integer(b)) => {
                a.simple_sets().cmp(b.simple_sets())
            }
            (AssignmentSet::Symbolic(a), AssignmentSet::Symbolic(b)) => {
                a.simple_sets().cmp(b.simple_sets())
            }
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_variables_are_distinct() {
        let a = Variable::continuous("x");
        let b = Variable::continuous("x");
        assert_ne!(a, b);
    }

    #[test]
    fn variable_equals_itself() {
        let a = Variable::integer("n");
        let clone = a.clone();
        assert_eq!(a, clone);
    }
}
