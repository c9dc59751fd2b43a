// SPDX-License-Identifier: MPL-2.0

//! The product algebra: axis-aligned rectangles in the space formed by a
//! set of [`Variable`]s, and their finite unions.
//!
//! A [`SimpleEvent`] assigns each variable a composite set on its own axis;
//! a [`Event`] is a disjoint (after [`simplify`](crate::sigma_algebra::CompositeSet::simplify))
//! union of such rectangles, the distinctive piece being the pairwise
//! "differs in exactly one axis" merge in [`Event::simplify_once`], backed
//! by a plain overlap-carving fallback so a full `simplify` run always
//! ends with every member pairwise disjoint from every other.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::error::AlgebraError;
use crate::sigma_algebra::{unique_combinations, CompositeSet, SimpleSet};
use crate::variable::{Assignment, AssignmentSet, Variable};

/// A single point in product space: one concrete value per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementaryEvent(pub BTreeMap<Variable, Assignment>);

impl ElementaryEvent {
    /// Build an elementary event from its per-variable assignments.
    pub fn new(assignments: BTreeMap<Variable, Assignment>) -> Self {
        Self(assignments)
    }
}

/// One axis-aligned "rectangle" of the product space: a map from variable to
/// the composite set assigned to it on that axis.
///
/// Every variable this event constrains has an entry; a variable genuinely
/// unconstrained by an operation is filled in with its own full domain
/// rather than left out of the map, matching the reference implementation's
/// practice of always materializing the full variable set and keeping
/// `is_empty`/`complement` simple as a result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimpleEvent {
    variable_map: BTreeMap<Variable, AssignmentSet>,
}

impl SimpleEvent {
    /// Build a simple event from an explicit variable-to-assignment map.
    pub fn new(variable_map: BTreeMap<Variable, AssignmentSet>) -> Self {
        Self { variable_map }
    }

    /// The unconstrained rectangle covering every variable in `variables` at
    /// its full domain.
    pub fn full(variables: &BTreeSet<Variable>) -> Self {
        let variable_map = variables
            .iter()
            .map(|v| (v.clone(), AssignmentSet::full(v.kind())))
            .collect();
        Self { variable_map }
    }

    /// The variables this event assigns.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.variable_map.keys().cloned().collect()
    }

    /// The assignment for `variable`, if this event constrains it.
    pub fn assignment(&self, variable: &Variable) -> Option<&AssignmentSet> {
        self.variable_map.get(variable)
    }
}

impl fmt::Display for SimpleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (variable, assignment)) in self.variable_map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", variable.name(), assignment)?;
        }
        write!(f, "}}")
    }
}

impl SimpleSet for SimpleEvent {
    type Composite = Event;
    type Element = ElementaryEvent;

    /// Let `V = keys(self) ∪ keys(other)`. For each `v ∈ V`: intersect the
    /// assignments if both sides have one, otherwise copy whichever side
    /// does.
    fn intersection_with(&self, other: &Self) -> Self {
        let mut keys: BTreeSet<Variable> = self.variable_map.keys().cloned().collect();
        keys.extend(other.variable_map.keys().cloned());

        let variable_map = keys
            .into_iter()
            .map(|v| {
                let value = match (self.variable_map.get(&v), other.variable_map.get(&v)) {
                    (Some(a), Some(b)) => a.intersection_with(b),
                    (Some(a), None) => a.clone(),
                    (None, Some(b)) => b.clone(),
                    (None, None) => unreachable!("v came from the union of both keysets"),
                };
                (v, value)
            })
            .collect();

        Self { variable_map }
    }

    /// The staircase decomposition: for the i-th variable (in identity
    /// order), the i-th piece flips that variable's assignment, keeps every
    /// earlier variable's assignment as-is, and resets every later variable
    /// to its own full domain. Each non-empty piece is disjoint from every
    /// other, and together they partition the complement.
    fn complement(&self) -> Self::Composite {
        let variables: Vec<Variable> = self.variable_map.keys().cloned().collect();
        let mut pieces = BTreeSet::new();

        for i in 0..variables.len() {
            let mut variable_map = BTreeMap::new();
            for processed in &variables[..i] {
                let assignment = self
                    .variable_map
                    .get(processed)
                    .expect("processed is one of self's own keys")
                    .clone();
                variable_map.insert(processed.clone(), assignment);
            }

            let pivot = &variables[i];
            let pivot_assignment = self
                .variable_map
                .get(pivot)
                .expect("pivot is one of self's own keys");
            variable_map.insert(pivot.clone(), pivot_assignment.complement());

            for unprocessed in &variables[i + 1..] {
                variable_map.insert(unprocessed.clone(), AssignmentSet::full(unprocessed.kind()));
            }

            let piece = SimpleEvent { variable_map };
            if !piece.is_empty() {
                pieces.insert(piece);
            }
        }

        Event::from_simple_events(pieces)
    }

    fn contains(&self, element: &Self::Element) -> bool {
        self.variable_map.iter().all(|(variable, assignment)| {
            match element.0.get(variable) {
                Some(value) => assignment.contains(value),
                None => true,
            }
        })
    }

    /// True if the map is empty (no constraints at all, the degenerate
    /// zero-variable event) or if any one axis is already empty.
    fn is_empty(&self) -> bool {
        self.variable_map.is_empty() || self.variable_map.values().any(AssignmentSet::is_empty)
    }
}

/// A finite union of [`SimpleEvent`]s sharing a common variable universe.
#[derive(Debug, Clone)]
pub struct Event {
    all_variables: Rc<BTreeSet<Variable>>,
    simple_sets: BTreeSet<SimpleEvent>,
}

impl Event {
    /// The empty event over `all_variables`.
    pub fn empty(all_variables: Rc<BTreeSet<Variable>>) -> Self {
        Self {
            all_variables,
            simple_sets: BTreeSet::new(),
        }
    }

    /// An event over exactly the variable universe named in `all_variables`,
    /// with no members.
    pub fn from_variables(all_variables: Rc<BTreeSet<Variable>>) -> Self {
        Self::empty(all_variables)
    }

    /// An event containing exactly `simple_event`, with the variable
    /// universe taken to be that event's own keyset.
    pub fn from_simple_event(simple_event: SimpleEvent) -> Self {
        let all_variables = Rc::new(simple_event.variables());
        let mut simple_sets = BTreeSet::new();
        simple_sets.insert(simple_event);
        Self {
            all_variables,
            simple_sets,
        }
    }

    /// An event containing `simple_events`, with the variable universe taken
    /// to be the union of every member's keyset.
    pub fn from_simple_events(simple_events: BTreeSet<SimpleEvent>) -> Self {
        let mut all_variables = BTreeSet::new();
        for member in &simple_events {
            all_variables.extend(member.variables());
        }
        Self {
            all_variables: Rc::new(all_variables),
            simple_sets: simple_events,
        }
    }

    /// The variable universe shared by every member of this event.
    pub fn all_variables(&self) -> &Rc<BTreeSet<Variable>> {
        &self.all_variables
    }

    /// A fresh empty event carrying the same variable universe as `self`.
    pub fn make_new_empty(&self) -> Self {
        Self::empty(Rc::clone(&self.all_variables))
    }

    /// One pass of simplification, in two tiers.
    ///
    /// Tier 1 scans unordered pairs of members for one that differs on
    /// exactly one variable and replaces it with a single merged member
    /// (that variable's assignment becomes the union of the two) — the
    /// staircase-collapsing merge the product algebra is named for. Tier 2
    /// only runs once tier 1 finds nothing: it looks for any pair that
    /// still overlaps at all (including one being a subset of the other)
    /// and carves the overlap out of one of them, keeping the other whole.
    /// Running both tiers to a fixpoint leaves every pair of members
    /// disjoint — if it didn't, tier 2 would still have a pair to act on.
    ///
    /// Returns `(result, true)` if either tier made a change, or
    /// `(self.clone(), false)` once nothing more can be done. A pair that
    /// differs on zero variables (two structurally equal members) is a
    /// broken invariant and panics.
    pub fn simplify_once(&self) -> (Self, bool) {
        let members: Vec<SimpleEvent> = self.simple_sets.iter().cloned().collect();

        for (first, second) in unique_combinations(&members) {
            let mut differing: Option<&Variable> = None;
            let mut more_than_one = false;
            for variable in self.all_variables.iter() {
                let a = first
                    .assignment(variable)
                    .expect("every member covers all_variables");
                let b = second
                    .assignment(variable)
                    .expect("every member covers all_variables");
                if a != b {
                    if differing.is_some() {
                        more_than_one = true;
                        break;
                    }
                    differing = Some(variable);
                }
            }

            if more_than_one {
                continue;
            }

            let Some(pivot) = differing else {
                panic!(
                    "{}",
                    AlgebraError::DuplicateSimpleEvent(self.to_string())
                );
            };

            let merged_assignment = first
                .assignment(pivot)
                .expect("pivot came from all_variables")
                .union_with(second.assignment(pivot).expect("checked above"));

            let mut variable_map = first.variable_map.clone();
            variable_map.insert(pivot.clone(), merged_assignment);
            let merged = SimpleEvent { variable_map };

            let result_members = replace_pair(&members, &first, &second, std::iter::once(merged));
            return (self.with_members(result_members), true);
        }

        for (first, second) in unique_combinations(&members) {
            if first.intersection_with(&second).is_empty() {
                continue;
            }

            let first_alone = self.with_members(std::iter::once(first.clone()).collect());
            let second_alone = self.with_members(std::iter::once(second.clone()).collect());
            let first_only = first_alone.difference_with(&second_alone);

            let replacements = first_only
                .simple_sets()
                .iter()
                .cloned()
                .chain(std::iter::once(second.clone()));
            let result_members = replace_pair(&members, &first, &second, replacements);
            return (self.with_members(result_members), true);
        }

        (self.clone(), false)
    }
}

/// Build a member set like `members` but with `first` and `second` removed
/// and `replacements` inserted in their place.
fn replace_pair(
    members: &[SimpleEvent],
    first: &SimpleEvent,
    second: &SimpleEvent,
    replacements: impl IntoIterator<Item = SimpleEvent>,
) -> BTreeSet<SimpleEvent> {
    let mut result = BTreeSet::new();
    result.extend(replacements);
    for member in members {
        if member != first && member != second {
            result.insert(member.clone());
        }
    }
    result
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.all_variables, &other.all_variables) && self.simple_sets == other.simple_sets
    }
}

impl Eq for Event {}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simple_sets.is_empty() {
            return write!(f, "∅");
        }
        let rendered: Vec<_> = self.simple_sets.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(" u "))
    }
}

impl CompositeSet for Event {
    type Simple = SimpleEvent;
    type Element = ElementaryEvent;

    fn simple_sets(&self) -> &BTreeSet<Self::Simple> {
        &self.simple_sets
    }

    fn with_members(&self, simple_sets: BTreeSet<Self::Simple>) -> Self {
        Self {
            all_variables: Rc::clone(&self.all_variables),
            simple_sets: simple_sets.into_iter().filter(|m| !m.is_empty()).collect(),
        }
    }

    /// The single rectangle covering every variable at its full domain.
    fn universe(&self) -> Self {
        let mut simple_sets = BTreeSet::new();
        simple_sets.insert(SimpleEvent::full(&self.all_variables));
        Self {
            all_variables: Rc::clone(&self.all_variables),
            simple_sets,
        }
    }

    /// Iterate [`simplify_once`](Self::simplify_once) to a fixpoint.
    /// Terminating is guaranteed: each successful pass strictly decreases
    /// the member count by one.
    fn simplify(&self) -> Self {
        let (mut simplified, mut changed) = self.simplify_once();
        while changed {
            let (next, next_changed) = simplified.simplify_once();
            simplified = next;
            changed = next_changed;
        }
        simplified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::variable::Variable;

    fn xy() -> (Variable, Variable) {
        (Variable::continuous("x"), Variable::continuous("y"))
    }

    #[test]
    fn intersection_fills_in_missing_axis_from_either_side() {
        let (x, y) = xy();
        let mut only_x = BTreeMap::new();
        only_x.insert(x.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        let a = SimpleEvent::new(only_x);

        let mut only_y = BTreeMap::new();
        only_y.insert(y.clone(), AssignmentSet::Continuous(Interval::closed(2.0, 3.0)));
        let b = SimpleEvent::new(only_y);

        let intersected = a.intersection_with(&b);
        assert_eq!(intersected.variables().len(), 2);
    }

    #[test]
    fn simplify_once_merges_adjacent_rectangles_on_one_axis() {
        let (x, y) = xy();
        let mut e1 = BTreeMap::new();
        e1.insert(x.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        e1.insert(y.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));

        let mut e2 = BTreeMap::new();
        e2.insert(x.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        e2.insert(y.clone(), AssignmentSet::Continuous(Interval::closed_open(1.0, 2.0)));

        let mut members = BTreeSet::new();
        members.insert(SimpleEvent::new(e1));
        members.insert(SimpleEvent::new(e2));
        let event = Event::from_simple_events(members);

        let (simplified, changed) = event.simplify_once();
        assert!(changed);
        assert_eq!(simplified.simple_sets().len(), 1);
        let only = simplified.simple_sets().iter().next().unwrap();
        match only.assignment(&y).unwrap() {
            AssignmentSet::Continuous(interval) => {
                assert_eq!(interval.simple_sets().len(), 1);
            }
            _ => panic!("expected a continuous assignment"),
        }
    }

    #[test]
    fn simple_event_complement_yields_at_most_n_pieces_and_is_disjoint_from_it() {
        let (x, y) = xy();
        let mut map = BTreeMap::new();
        map.insert(x.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        map.insert(y.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        let rectangle = SimpleEvent::new(map);

        let complement = rectangle.complement();
        assert!(complement.simple_sets().len() <= 2);
        let overlaps_original = complement
            .simple_sets()
            .iter()
            .any(|piece| !piece.intersection_with(&rectangle).is_empty());
        assert!(!overlaps_original);
    }

    #[test]
    fn double_complement_is_identity_after_simplify() {
        let (x, y) = xy();
        let mut map = BTreeMap::new();
        map.insert(x.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        map.insert(y.clone(), AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
        let rectangle = SimpleEvent::new(map);
        let event = Event::from_simple_event(rectangle);

        let roundtrip = event.complement().complement().simplify();
        assert_eq!(roundtrip, event.simplify());
    }
}
