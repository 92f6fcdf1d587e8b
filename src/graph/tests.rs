// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use proptest::prelude::*;
use rstest::rstest;

use super::{check_new_edge, cycles, is_acyclic, reachable, would_create_cycle};
use crate::error::ValidationError;
use crate::model::fixtures::{basic, chain_abc, eid, empty_diagram, nid, small_dag};
use crate::model::{Diagram, Edge};

fn with_nodes(ids: &[&str]) -> Diagram {
    let mut diagram = empty_diagram("test");
    for id in ids {
        diagram.nodes_mut().push(basic(id));
    }
    diagram
}

#[test]
fn reverse_edge_on_two_nodes_is_rejected() {
    let mut diagram = with_nodes(&["a", "b"]);

    check_new_edge(&diagram, &nid("a"), &nid("b")).expect("a -> b is fine");
    diagram
        .edges_mut()
        .push(Edge::new(eid("e1"), nid("a"), nid("b")));

    let err = check_new_edge(&diagram, &nid("b"), &nid("a")).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Cycle {
            from: nid("b"),
            to: nid("a"),
        }
    );
    assert_eq!(diagram.edges().len(), 1);
    assert_eq!(diagram.edges()[0].source(), &nid("a"));
}

#[rstest]
#[case::empty(with_nodes(&["a"]))]
#[case::chain(chain_abc())]
#[case::dag(small_dag())]
fn self_loops_are_always_rejected(#[case] diagram: Diagram) {
    assert!(would_create_cycle(diagram.edges(), &nid("a"), &nid("a")));
    assert!(matches!(
        check_new_edge(&diagram, &nid("a"), &nid("a")),
        Err(ValidationError::Cycle { .. })
    ));
}

#[rstest]
#[case("c", "a", true)]
#[case("a", "c", false)]
#[case("b", "a", true)]
#[case("c", "b", true)]
#[case("a", "b", false)]
fn chain_candidates(#[case] source: &str, #[case] target: &str, #[case] cyclic: bool) {
    let diagram = chain_abc();
    assert_eq!(
        would_create_cycle(diagram.edges(), &nid(source), &nid(target)),
        cyclic
    );
}

#[test]
fn diamond_back_edge_is_rejected_but_shortcut_is_not() {
    let diagram = small_dag();
    assert!(would_create_cycle(diagram.edges(), &nid("d"), &nid("a")));
    assert!(!would_create_cycle(diagram.edges(), &nid("a"), &nid("d")));
    assert!(!would_create_cycle(diagram.edges(), &nid("b"), &nid("c")));
}

#[test]
fn unknown_endpoints_are_validation_errors() {
    let diagram = chain_abc();
    assert_eq!(
        check_new_edge(&diagram, &nid("a"), &nid("zzz")),
        Err(ValidationError::UnknownNode {
            node_id: nid("zzz")
        })
    );
    assert_eq!(
        check_new_edge(&diagram, &nid("zzz"), &nid("a")),
        Err(ValidationError::UnknownNode {
            node_id: nid("zzz")
        })
    );
}

#[test]
fn walk_terminates_on_an_already_cyclic_edge_set() {
    let mut diagram = with_nodes(&["a", "b", "c", "d"]);
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:ab"), nid("a"), nid("b")));
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:ba"), nid("b"), nid("a")));

    // c is unreachable from a; the a <-> b loop must not spin forever.
    assert!(!would_create_cycle(diagram.edges(), &nid("c"), &nid("a")));
    assert!(would_create_cycle(diagram.edges(), &nid("b"), &nid("a")));
    assert_eq!(cycles(&diagram), vec![vec![nid("a"), nid("b")]]);
    assert!(!is_acyclic(&diagram));
}

#[test]
fn cycles_reports_self_loops_and_is_empty_for_dags() {
    assert!(cycles(&small_dag()).is_empty());
    assert!(is_acyclic(&chain_abc()));

    let mut diagram = with_nodes(&["a"]);
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:aa"), nid("a"), nid("a")));
    assert_eq!(cycles(&diagram), vec![vec![nid("a")]]);
}

#[test]
fn reachable_follows_edges_forward() {
    let diagram = small_dag();
    assert_eq!(
        reachable(&diagram, &nid("b")),
        vec![nid("b"), nid("d")]
    );
    assert_eq!(reachable(&diagram, &nid("a")).len(), 4);
    assert!(reachable(&diagram, &nid("missing")).is_empty());
}

proptest! {
    #[test]
    fn gated_insertions_keep_the_edge_set_acyclic(
        candidates in prop::collection::vec((0usize..8, 0usize..8), 0..64)
    ) {
        let names = ["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];
        let mut diagram = with_nodes(&names);

        for (index, (source, target)) in candidates.into_iter().enumerate() {
            let source = nid(names[source]);
            let target = nid(names[target]);
            if check_new_edge(&diagram, &source, &target).is_ok() {
                diagram
                    .edges_mut()
                    .push(Edge::new(eid(&format!("e{index}")), source, target));
            }
        }

        prop_assert!(is_acyclic(&diagram));
    }
}
