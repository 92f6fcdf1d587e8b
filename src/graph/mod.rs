// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural checks over a diagram's edge set.
//!
//! The diagram invariant is that edges form a DAG. It is enforced at insertion time only:
//! [`check_new_edge`] must run before an edge is pushed, and nothing here re-validates a
//! diagram that was loaded or imported. [`cycles`] exists so callers can *report* a diagram
//! that arrived already cyclic; it never repairs one.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::debug;

use crate::error::ValidationError;
use crate::model::{Diagram, Edge, NodeId};

fn outgoing_adjacency(edges: &[Edge]) -> BTreeMap<&NodeId, Vec<&NodeId>> {
    let mut outgoing: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
    for edge in edges {
        outgoing.entry(edge.source()).or_default().push(edge.target());
    }
    outgoing
}

/// Returns `true` when inserting `source -> target` into `edges` would close a directed cycle.
///
/// Walks forward from `target`; reaching `source` means `source` is already downstream of
/// `target`. The self-loop case is caught on the first pop. Already-visited nodes are skipped,
/// so the walk terminates even if `edges` is itself cyclic.
pub fn would_create_cycle(edges: &[Edge], source: &NodeId, target: &NodeId) -> bool {
    let outgoing = outgoing_adjacency(edges);

    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut stack: Vec<&NodeId> = vec![target];

    while let Some(current) = stack.pop() {
        if current == source {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next_ids) = outgoing.get(current) {
            stack.extend(next_ids.iter().copied());
        }
    }

    false
}

/// Validates a candidate edge against `diagram` without touching it.
///
/// Both endpoints must be nodes of the diagram, and the edge must keep the edge set acyclic.
pub fn check_new_edge(
    diagram: &Diagram,
    source: &NodeId,
    target: &NodeId,
) -> Result<(), ValidationError> {
    for endpoint in [source, target] {
        if !diagram.contains_node(endpoint) {
            return Err(ValidationError::UnknownNode {
                node_id: endpoint.clone(),
            });
        }
    }

    if would_create_cycle(diagram.edges(), source, target) {
        debug!(
            diagram_id = diagram.id().as_str(),
            source = source.as_str(),
            target = target.as_str();
            "Rejected edge that would close a cycle"
        );
        return Err(ValidationError::Cycle {
            from: source.clone(),
            to: target.clone(),
        });
    }

    Ok(())
}

/// Node ids reachable from `from_node_id` by following edges forward, including the start.
///
/// Returns an empty list for an unknown start node.
pub fn reachable(diagram: &Diagram, from_node_id: &NodeId) -> Vec<NodeId> {
    let known_nodes = diagram
        .nodes()
        .iter()
        .map(|node| node.id())
        .collect::<BTreeSet<_>>();
    if !known_nodes.contains(from_node_id) {
        return Vec::new();
    }

    let outgoing = outgoing_adjacency(diagram.edges());
    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();

    visited.insert(from_node_id);
    queue.push_back(from_node_id);

    while let Some(node_id) = queue.pop_front() {
        for next_id in outgoing.get(node_id).into_iter().flatten() {
            if !known_nodes.contains(*next_id) {
                continue;
            }
            if visited.insert(*next_id) {
                queue.push_back(*next_id);
            }
        }
    }

    visited.into_iter().cloned().collect()
}

/// Strongly connected components that form cycles (size > 1, or a single node with a
/// self-loop). Each component is sorted; the list is sorted. Empty for a DAG.
pub fn cycles(diagram: &Diagram) -> Vec<Vec<NodeId>> {
    let edges = diagram.edges();
    let mut outgoing = outgoing_adjacency(edges);
    for node in diagram.nodes() {
        outgoing.entry(node.id()).or_default();
    }
    for edge in edges {
        outgoing.entry(edge.target()).or_default();
    }

    let mut tarjan = Tarjan {
        outgoing: &outgoing,
        index: 0,
        indices: BTreeMap::new(),
        lowlink: BTreeMap::new(),
        stack: Vec::new(),
        on_stack: BTreeSet::new(),
        sccs: Vec::new(),
    };

    for v in outgoing.keys() {
        if !tarjan.indices.contains_key(*v) {
            tarjan.strongconnect(*v);
        }
    }

    let mut cycles: Vec<Vec<NodeId>> = tarjan
        .sccs
        .into_iter()
        .filter_map(|scc| {
            let mut scc = scc.into_iter().cloned().collect::<Vec<_>>();
            scc.sort();
            match scc.as_slice() {
                [] => None,
                [node_id] => outgoing
                    .get(node_id)
                    .into_iter()
                    .flatten()
                    .any(|next_id| *next_id == node_id)
                    .then_some(scc),
                _ => Some(scc),
            }
        })
        .collect();

    cycles.sort();
    cycles
}

pub fn is_acyclic(diagram: &Diagram) -> bool {
    cycles(diagram).is_empty()
}

struct Tarjan<'a> {
    outgoing: &'a BTreeMap<&'a NodeId, Vec<&'a NodeId>>,
    index: usize,
    indices: BTreeMap<&'a NodeId, usize>,
    lowlink: BTreeMap<&'a NodeId, usize>,
    stack: Vec<&'a NodeId>,
    on_stack: BTreeSet<&'a NodeId>,
    sccs: Vec<Vec<&'a NodeId>>,
}

impl<'a> Tarjan<'a> {
    fn strongconnect(&mut self, v: &'a NodeId) {
        self.indices.insert(v, self.index);
        self.lowlink.insert(v, self.index);
        self.index = self.index.saturating_add(1);

        self.stack.push(v);
        self.on_stack.insert(v);

        let outgoing = self.outgoing;
        for w in outgoing.get(v).into_iter().flatten().copied() {
            if !self.indices.contains_key(w) {
                self.strongconnect(w);
                let v_low = self.lowlink.get(v).copied().unwrap_or(usize::MAX);
                let w_low = self.lowlink.get(w).copied().unwrap_or(usize::MAX);
                self.lowlink.insert(v, v_low.min(w_low));
            } else if self.on_stack.contains(w) {
                let v_low = self.lowlink.get(v).copied().unwrap_or(usize::MAX);
                let w_index = self.indices.get(w).copied().unwrap_or(usize::MAX);
                self.lowlink.insert(v, v_low.min(w_index));
            }
        }

        let v_index = self.indices.get(v).copied().unwrap_or(usize::MAX);
        let v_low = self.lowlink.get(v).copied().unwrap_or(usize::MAX);
        if v_low == v_index {
            let mut scc: Vec<&'a NodeId> = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.remove(w);
                scc.push(w);
                if w == v {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }
}

#[cfg(test)]
mod tests;
