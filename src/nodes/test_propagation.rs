//! Propagation scenarios across nodes, wires and variables

use proptest::prelude::*;

use crate::config::GraphConfig;
use crate::error::Error;
use crate::nodes::{MemberRef, Node, NodeGraph, NodeId, ValueKind, WireId, WireState};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node_with(graph: &mut NodeGraph, title: &str, members: &[&str]) -> NodeId {
    let mut node = Node::new(title);
    for name in members {
        node.add_member(*name).unwrap();
    }
    graph.add_node(node)
}

/// Wires in the registry whose target is `member`
fn writers_of(graph: &NodeGraph, member: &MemberRef) -> Vec<WireId> {
    graph
        .wires()
        .iter()
        .filter(|w| w.target() == Some(member))
        .map(|w| w.id())
        .collect()
}

#[test]
fn test_number_flows_between_nodes() {
    init_logging();
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    graph.set_value(&MemberRef::new(a, "out"), 3.0).unwrap();

    let wire = graph.create_wire();
    graph.set_source(wire, MemberRef::new(a, "out")).unwrap();
    graph.set_target(wire, MemberRef::new(b, "in")).unwrap();
    assert_eq!(graph.wire(wire).unwrap().state(), WireState::Connected);

    graph.transmit(wire).unwrap();
    let input = graph.member(&MemberRef::new(b, "in")).unwrap();
    assert!(input.is_set());
    assert_eq!(input.value().as_number().unwrap(), 3.0);
    assert_eq!(input.value(), graph.member(&MemberRef::new(a, "out")).unwrap().value());
}

#[test]
fn test_variable_label_and_number() {
    init_logging();
    let mut graph = NodeGraph::new();
    let v = graph.add_node(Node::new_variable());
    {
        let mut var = graph.variable_mut(v).unwrap();
        var.set_name("x").unwrap();
        var.set_value(5.0).unwrap();
    }
    let var = graph.variable(v).unwrap();
    assert_eq!(var.label(), "x = 5");
    assert_eq!(var.value_as_string().unwrap(), "5");
    assert_eq!(var.value_as_number().unwrap(), 5.0);
}

#[test]
fn test_upstream_change_is_stale_until_next_transmit() {
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in", "out"]);
    let c = node_with(&mut graph, "C", &["in"]);
    graph.set_value(&MemberRef::new(a, "out"), 1.0).unwrap();
    graph.set_value(&MemberRef::new(b, "out"), 10.0).unwrap();

    let ab = graph.connect(MemberRef::new(a, "out"), MemberRef::new(b, "in")).unwrap();
    let bc = graph.connect(MemberRef::new(b, "out"), MemberRef::new(c, "in")).unwrap();
    graph.transmit(ab).unwrap();
    graph.transmit(bc).unwrap();

    graph.set_value(&MemberRef::new(a, "out"), 2.0).unwrap();
    let b_in = MemberRef::new(b, "in");
    assert_eq!(graph.member(&b_in).unwrap().value().as_number().unwrap(), 1.0);
    graph.transmit(ab).unwrap();
    assert_eq!(graph.member(&b_in).unwrap().value().as_number().unwrap(), 2.0);
    assert_eq!(graph.member(&MemberRef::new(c, "in")).unwrap().value().as_number().unwrap(), 10.0);
}

#[test]
fn test_fan_out_from_one_source() {
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    let c = node_with(&mut graph, "C", &["in"]);
    let out = MemberRef::new(a, "out");
    graph.set_value(&out, true).unwrap();

    let w1 = graph.connect(out.clone(), MemberRef::new(b, "in")).unwrap();
    let w2 = graph.connect(out.clone(), MemberRef::new(c, "in")).unwrap();
    assert_eq!(graph.member(&out).unwrap().outgoing(), &[w1, w2]);

    graph.transmit(w2).unwrap();
    graph.transmit(w1).unwrap();
    for node in [b, c] {
        let member = graph.member(&MemberRef::new(node, "in")).unwrap();
        assert!(member.value().as_bool().unwrap());
    }
}

#[test]
fn test_replace_policy_disconnects_previous_wire() {
    init_logging();
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["out"]);
    let c = node_with(&mut graph, "C", &["in"]);
    let target = MemberRef::new(c, "in");

    let w2 = graph.connect(MemberRef::new(a, "out"), target.clone()).unwrap();
    let w = graph.connect(MemberRef::new(b, "out"), target.clone()).unwrap();

    assert!(graph.wire(w).unwrap().is_connected());
    assert!(!graph.wire(w2).unwrap().is_connected());
    assert!(graph.wire(w2).unwrap().source().is_none());
    assert_eq!(graph.member(&target).unwrap().incoming(), Some(w));
    assert_eq!(writers_of(&graph, &target), vec![w]);
    // The displaced wire no longer reads from its old source either
    assert!(graph.member(&MemberRef::new(a, "out")).unwrap().outgoing().is_empty());
}

#[test]
fn test_reject_policy_reports_conflict() {
    let mut graph = NodeGraph::with_config(GraphConfig::strict());
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["out"]);
    let c = node_with(&mut graph, "C", &["in"]);
    let target = MemberRef::new(c, "in");

    let w2 = graph.connect(MemberRef::new(a, "out"), target.clone()).unwrap();
    let w = graph.create_wire();
    graph.set_source(w, MemberRef::new(b, "out")).unwrap();
    let err = graph.set_target(w, target.clone()).unwrap_err();
    assert_eq!(err, Error::Conflict { member: target.to_string(), existing: w2 });

    assert!(graph.wire(w2).unwrap().is_connected());
    assert!(!graph.wire(w).unwrap().is_connected());
    assert_eq!(graph.member(&target).unwrap().incoming(), Some(w2));

    // Explicit disconnection frees the target
    graph.disconnect(w2).unwrap();
    graph.set_target(w, target.clone()).unwrap();
    assert!(graph.wire(w).unwrap().is_connected());
    assert_eq!(writers_of(&graph, &target), vec![w]);
}

#[test]
fn test_strict_connect_leaves_no_wire_behind() {
    let mut graph = NodeGraph::with_config(GraphConfig::strict());
    let a = node_with(&mut graph, "A", &["out", "spare"]);
    let c = node_with(&mut graph, "C", &["in"]);
    graph.connect(MemberRef::new(a, "out"), MemberRef::new(c, "in")).unwrap();

    let result = graph.connect(MemberRef::new(a, "spare"), MemberRef::new(c, "in"));
    assert!(matches!(result, Err(Error::Conflict { .. })));
    assert_eq!(graph.wires().len(), 1);
    assert!(graph.member(&MemberRef::new(a, "spare")).unwrap().outgoing().is_empty());
}

#[test]
fn test_removing_a_node_cascades_to_wires() {
    init_logging();
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in", "out"]);
    let c = node_with(&mut graph, "C", &["in"]);
    let ab = graph.connect(MemberRef::new(a, "out"), MemberRef::new(b, "in")).unwrap();
    let bc = graph.connect(MemberRef::new(b, "out"), MemberRef::new(c, "in")).unwrap();

    let removed = graph.remove_node(b).unwrap();
    assert_eq!(removed.title(), "B");
    assert!(!graph.contains_node(b));

    // Wires survive as disconnected entries, with no reference to the removed node
    assert_eq!(graph.wires().len(), 2);
    assert!(graph.wires().touching_node(b).is_empty());
    for wire in [ab, bc] {
        assert_eq!(graph.wire(wire).unwrap().state(), WireState::Disconnected);
    }
    assert!(!graph.member(&MemberRef::new(a, "out")).unwrap().has_wires());
    assert!(!graph.member(&MemberRef::new(c, "in")).unwrap().has_wires());

    // Lookups through stale handles fail instead of dangling
    assert!(matches!(graph.member(&MemberRef::new(b, "in")), Err(Error::NotFound(_))));
    assert!(matches!(graph.remove_node(b), Err(Error::NotFound(_))));
}

#[test]
fn test_copied_member_does_not_inherit_wires() {
    init_logging();
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    let c = node_with(&mut graph, "C", &[]);
    let b_in = MemberRef::new(b, "in");
    let healthy = graph.connect(MemberRef::new(a, "out"), b_in.clone()).unwrap();

    let copy = graph.member(&b_in).unwrap().clone();
    graph.node_mut(c).unwrap().push_member(copy).unwrap();
    let c_in = MemberRef::new(c, "in");
    assert_eq!(graph.member(&c_in).unwrap().incoming(), None);

    let fresh = graph.connect(MemberRef::new(a, "out"), c_in.clone()).unwrap();
    assert!(graph.wire(healthy).unwrap().is_connected());
    assert!(graph.wire(fresh).unwrap().is_connected());
    assert_eq!(graph.member(&b_in).unwrap().incoming(), Some(healthy));
    assert_eq!(graph.member(&c_in).unwrap().incoming(), Some(fresh));
}

#[test]
fn test_copied_member_does_not_conflict_under_reject() {
    let mut graph = NodeGraph::with_config(GraphConfig::strict());
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    let c = node_with(&mut graph, "C", &[]);
    let b_in = MemberRef::new(b, "in");
    graph.connect(MemberRef::new(a, "out"), b_in.clone()).unwrap();

    let copy = graph.member(&b_in).unwrap().clone();
    graph.node_mut(c).unwrap().push_member(copy).unwrap();
    let wire = graph.connect(MemberRef::new(a, "out"), MemberRef::new(c, "in")).unwrap();
    assert!(graph.wire(wire).unwrap().is_connected());
}

#[test]
fn test_node_removal_survives_tampered_wire_id() {
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    let wire = graph.connect(MemberRef::new(a, "out"), MemberRef::new(b, "in")).unwrap();
    graph.wire_mut(wire).unwrap().id = 999;

    graph.remove_node(a).unwrap();
    assert!(!graph.contains_node(a));
    assert!(graph.wires().touching_node(a).is_empty());
    assert!(!graph.wire(wire).unwrap().is_connected());
}

#[test]
fn test_failed_transmit_is_repeatable_no_op() {
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["out"]);
    let b = node_with(&mut graph, "B", &["in"]);
    graph.set_value(&MemberRef::new(a, "out"), 1.0).unwrap();
    graph.set_value(&MemberRef::new(b, "in"), 7.0).unwrap();

    let wire = graph.create_wire();
    graph.set_source(wire, MemberRef::new(a, "out")).unwrap();
    for _ in 0..3 {
        assert_eq!(graph.transmit(wire), Err(Error::NotConnected(wire)));
    }
    assert_eq!(graph.member(&MemberRef::new(b, "in")).unwrap().value().as_number().unwrap(), 7.0);
    assert_eq!(graph.member(&MemberRef::new(a, "out")).unwrap().value().as_number().unwrap(), 1.0);
}

#[test]
fn test_reference_values_travel_as_handles() {
    let mut graph = NodeGraph::new();
    let a = node_with(&mut graph, "A", &["target"]);
    let x = graph.add_variable("x").unwrap();
    graph.set_value(&MemberRef::new(a, "target"), crate::nodes::Literal::Reference(a)).unwrap();

    let wire = graph.connect(MemberRef::new(a, "target"), MemberRef::new(x, "value")).unwrap();
    graph.transmit(wire).unwrap();

    let var = graph.variable(x).unwrap();
    assert!(var.is_type(ValueKind::Reference));
    assert_eq!(var.value_member().unwrap().value().as_reference().unwrap(), a);
    assert_eq!(var.label(), format!("x = node#{}", a));
}

proptest! {
    #[test]
    fn prop_number_text_round_trip(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let mut graph = NodeGraph::new();
        let v = graph.add_variable("n").unwrap();
        graph.variable_mut(v).unwrap().set_value(n).unwrap();

        let text = graph.variable(v).unwrap().value_as_string().unwrap();
        let parsed: f64 = text.parse().unwrap();
        prop_assert_eq!(parsed, n);
    }

    #[test]
    fn prop_single_incoming_wire(
        strict in any::<bool>(),
        steps in prop::collection::vec((0usize..4, 0usize..3), 1..40),
    ) {
        let config = if strict { GraphConfig::strict() } else { GraphConfig::default() };
        let mut graph = NodeGraph::with_config(config);
        let source = node_with(&mut graph, "Source", &["a", "b", "c", "d"]);
        let sink = node_with(&mut graph, "Sink", &["x", "y", "z"]);
        let sources = ["a", "b", "c", "d"];
        let targets = ["x", "y", "z"];

        let wires: Vec<WireId> = sources
            .iter()
            .map(|name| {
                let wire = graph.create_wire();
                graph.set_source(wire, MemberRef::new(source, *name)).unwrap();
                wire
            })
            .collect();

        for (wire, target) in steps {
            let result = graph.set_target(wires[wire], MemberRef::new(sink, targets[target]));
            match result {
                Ok(()) => {}
                Err(Error::Conflict { .. }) => {
                    prop_assert!(strict);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {}", e))),
            }

            for name in targets {
                let member = MemberRef::new(sink, name);
                let writers = writers_of(&graph, &member);
                prop_assert!(writers.len() <= 1);
                let incoming = graph.member(&member).unwrap().incoming();
                prop_assert_eq!(incoming, writers.first().copied());
            }
        }
    }
}
