// SPDX-License-Identifier: MPL-2.0

//! The concrete worked scenarios used to pin down the algebra's behavior.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::rc::Rc;

use random_events::{
    AssignmentSet, CompositeSet, Event, Interval, Set, SetElement, SimpleEvent, SimpleSet,
    Variable,
};

#[test]
fn set_element_intersection_and_complement() {
    let universe = Rc::new(vec![0, 1, 2]);
    let one = SetElement::new(1, Rc::clone(&universe)).unwrap();
    let two = SetElement::new(2, Rc::clone(&universe)).unwrap();

    let mismatch = one.intersection_with(&two);
    assert_eq!(mismatch.element_index(), -1);

    let same = one.intersection_with(&SetElement::new(1, Rc::clone(&universe)).unwrap());
    assert_eq!(same.element_index(), 1);

    let complement = one.complement();
    assert_eq!(complement.simple_sets().len(), 2);
}

#[test]
fn set_complement_compacts_to_a_single_composite() {
    let universe = Rc::new(vec![0, 1, 2]);
    let set = Set::new(&[1], universe).unwrap();
    assert_eq!(set.complement().simple_sets().len(), 2);
}

#[test]
fn continuous_event_pair_simplifies_to_one_member() {
    let x = Variable::continuous("x");
    let y = Variable::continuous("y");

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
}

#[test]
fn mixed_kind_event_complement_has_two_members_once_constrained() {
    let x = Variable::continuous("x");
    let labels = Rc::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    let domain = Set::universe_of(Rc::clone(&labels));
    let a = Variable::symbolic("a", domain);

    // Both axes at their full domain: the event is already the whole
    // universe, so its complement has no members.
    let full = SimpleEvent::full(&[x.clone(), a.clone()].into_iter().collect());
    let event = Event::from_simple_event(full);
    assert!(event.complement().is_empty());

    // Constrain both axes: the complement partitions into two pieces.
    let label_universe = Set::new(&[0], Rc::clone(&labels)).unwrap();
    let mut map = BTreeMap::new();
    map.insert(a, AssignmentSet::Symbolic(label_universe));
    map.insert(x, AssignmentSet::Continuous(Interval::closed(0.0, 1.0)));
    let constrained = SimpleEvent::new(map);
    let event = Event::from_simple_event(constrained);
    assert_eq!(event.complement().simple_sets().len(), 2);
}

#[test]
fn interval_union_then_simplify_merges_touching_halves() {
    let merged = Interval::closed(0.0, 1.0)
        .union_with(&Interval::open(1.0, 2.0))
        .simplify();
    assert_eq!(merged, Interval::closed_open(0.0, 2.0));
}
