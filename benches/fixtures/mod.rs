// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::time::Duration;

use chrono::{TimeZone, Utc};
use criterion::Criterion;

use reliagraph::model::{
    Diagram, DiagramId, Edge, EdgeId, Node, NodeId, NodeKind, Position, ProjectId,
};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 5 layers of 4 nodes.
    Small,
    /// 20 layers of 10 nodes.
    Medium,
    /// 50 layers of 20 nodes.
    Large,
}

impl Case {
    fn shape(self) -> (usize, usize) {
        match self {
            Self::Small => (5, 4),
            Self::Medium => (20, 10),
            Self::Large => (50, 20),
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let sample_size = env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}

pub fn node_id(layer: usize, slot: usize) -> NodeId {
    NodeId::new(format!("n-{layer}-{slot}")).expect("node id")
}

/// A layered DAG where every node feeds the same slot and the next slot of the following layer.
pub fn layered_diagram(case: Case) -> Diagram {
    let (layers, width) = case.shape();
    let now = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp");
    let mut diagram = Diagram::new(
        DiagramId::new("bench").expect("diagram id"),
        ProjectId::new("bench-project").expect("project id"),
        format!("Layered {layers}x{width}"),
        now,
    );

    let mut nodes = Vec::with_capacity(layers * width);
    for layer in 0..layers {
        for slot in 0..width {
            let kind = NodeKind::ALL[(layer + slot) % NodeKind::ALL.len()];
            let mut node = Node::new(
                node_id(layer, slot),
                kind,
                format!("{} {layer}.{slot}", kind.title()),
                Position::new(layer as f64 * 200.0, slot as f64 * 120.0),
            );
            match kind {
                NodeKind::Basic => node.set_reliability(Some(0.95)).expect("reliability"),
                NodeKind::KOutOfN => node.set_k(Some(2)).expect("k"),
                NodeKind::Series | NodeKind::Parallel => {}
            }
            nodes.push(node);
        }
    }

    let mut edges = Vec::new();
    for layer in 1..layers {
        for slot in 0..width {
            for next in [slot, (slot + 1) % width] {
                let id = EdgeId::new(format!("e-{layer}-{slot}-{next}")).expect("edge id");
                edges.push(Edge::new(id, node_id(layer - 1, slot), node_id(layer, next)));
            }
        }
    }

    diagram.replace_contents(nodes, edges);
    diagram
}

/// First and last node of a layered diagram; an edge from `last` to `first` closes a cycle.
pub fn endpoints(case: Case) -> (NodeId, NodeId) {
    let (layers, width) = case.shape();
    (node_id(0, 0), node_id(layers - 1, width - 1))
}
