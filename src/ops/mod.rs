// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for diagrams.
//!
//! A batch of ops is applied to a working copy of the node/edge set; the diagram is only
//! changed when every op in the batch succeeds. The result carries a minimal delta that callers
//! can use to refresh derived state.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::error::{NotFoundError, ValidationError};
use crate::graph::check_new_edge;
use crate::model::{Diagram, Edge, EdgeId, Node, NodeId, NodeKind, Position};

/// Reliability given to a freshly dropped `basic` node.
pub const DEFAULT_RELIABILITY: f64 = 0.95;

/// `k` given to a freshly dropped `k-out-of-n` node.
pub const DEFAULT_K: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagramOp {
    /// Adds a node. `label: None` derives `"{Kind} {n}"`; `reliability`/`k` fall back to the
    /// [`NodeDefaults`] for the kinds they apply to.
    AddNode {
        node_id: NodeId,
        kind: NodeKind,
        label: Option<String>,
        position: Position,
        reliability: Option<f64>,
        k: Option<u32>,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },
    /// Removes a node and every edge touching it.
    RemoveNode {
        node_id: NodeId,
    },
    /// Adds an edge after the acyclicity check. Re-adding an existing `(source, target)` pair
    /// that passes the check is a no-op; on a cyclic graph the check still rejects it.
    AddEdge {
        edge_id: EdgeId,
        source: NodeId,
        target: NodeId,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
    /// Removes all nodes and edges.
    Clear,
}

/// Shallow patch for a node. `None` leaves a field unchanged; for the optional fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub position: Option<Position>,
    pub reliability: Option<Option<f64>>,
    pub k: Option<Option<u32>>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.position.is_none()
            && self.reliability.is_none()
            && self.k.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDefaults {
    pub reliability: f64,
    pub k: u32,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            reliability: DEFAULT_RELIABILITY,
            k: DEFAULT_K,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

/// Which nodes and edges changed as the result of applying ops. Each list is sorted, nodes
/// before edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ElementRef>,
    pub removed: Vec<ElementRef>,
    pub updated: Vec<ElementRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ElementRef>,
    removed: BTreeSet<ElementRef>,
    updated: BTreeSet<ElementRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, element: ElementRef) {
        self.removed.remove(&element);
        self.updated.remove(&element);
        self.added.insert(element);
    }

    fn record_removed(&mut self, element: ElementRef) {
        self.updated.remove(&element);
        // Added and removed within one batch: nothing observable happened.
        if !self.added.remove(&element) {
            self.removed.insert(element);
        }
    }

    fn record_updated(&mut self, element: ElementRef) {
        if self.added.contains(&element) || self.removed.contains(&element) {
            return;
        }
        self.updated.insert(element);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Applies `ops` with the stock [`NodeDefaults`].
pub fn apply_ops(diagram: &mut Diagram, ops: &[DiagramOp]) -> Result<ApplyResult, ApplyError> {
    apply_ops_with(diagram, ops, &NodeDefaults::default())
}

/// Applies `ops` all-or-nothing. Timestamps are left alone; persisting the result is what
/// refreshes `updatedAt`.
pub fn apply_ops_with(
    diagram: &mut Diagram,
    ops: &[DiagramOp],
    defaults: &NodeDefaults,
) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult {
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut working = diagram.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut working, op, defaults, &mut delta)?;
    }

    let nodes = std::mem::take(working.nodes_mut());
    let edges = std::mem::take(working.edges_mut());
    diagram.replace_contents(nodes, edges);

    Ok(ApplyResult {
        applied: ops.len(),
        delta: delta.finish(),
    })
}

// Per-op mutation helpers used by `apply_ops_with`.
include!("ops_impl.rs");
