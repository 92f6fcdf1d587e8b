// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{TimeZone, Utc};

use super::diagram::{Diagram, Edge, Node, NodeKind, Position};
use super::ids::{DiagramId, EdgeId, NodeId, ProjectId};
use super::Timestamp;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp")
}

pub(crate) fn empty_diagram(name: &str) -> Diagram {
    Diagram::new(
        DiagramId::new("d:1").expect("diagram id"),
        ProjectId::new("p:1").expect("project id"),
        name,
        fixed_now(),
    )
}

pub(crate) fn basic(id: &str) -> Node {
    let mut node = Node::new(nid(id), NodeKind::Basic, id.to_uppercase(), Position::default());
    node.set_reliability(Some(0.9)).expect("reliability");
    node
}

/// `a -> b -> c`
pub(crate) fn chain_abc() -> Diagram {
    let mut diagram = empty_diagram("chain");
    for id in ["a", "b", "c"] {
        diagram.nodes_mut().push(basic(id));
    }
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:ab"), nid("a"), nid("b")));
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:bc"), nid("b"), nid("c")));
    diagram
}

/// `a -> b`, `a -> c`, `b -> d`, `c -> d` with one node of every kind.
pub(crate) fn small_dag() -> Diagram {
    let mut diagram = empty_diagram("dag");

    diagram.nodes_mut().push(basic("a"));

    let mut series = Node::new(nid("b"), NodeKind::Series, "Series 2", Position::new(100.0, 0.0));
    series.set_metadata(Some(serde_json::Map::from_iter([(
        "color".to_owned(),
        serde_json::json!("green"),
    )])));
    diagram.nodes_mut().push(series);

    diagram.nodes_mut().push(Node::new(
        nid("c"),
        NodeKind::Parallel,
        "Parallel 3",
        Position::new(100.0, 80.0),
    ));

    let mut voter = Node::new(nid("d"), NodeKind::KOutOfN, "K-out-of-n 4", Position::new(200.0, 40.0));
    voter.set_k(Some(2)).expect("k");
    diagram.nodes_mut().push(voter);

    diagram
        .edges_mut()
        .push(Edge::new(eid("e:ab"), nid("a"), nid("b")));
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:ac"), nid("a"), nid("c")));
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:bd"), nid("b"), nid("d")));
    diagram
        .edges_mut()
        .push(Edge::new(eid("e:cd"), nid("c"), nid("d")));

    diagram
}
