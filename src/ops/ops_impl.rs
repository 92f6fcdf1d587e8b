// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Node/edge mutation helpers used by `apply_ops_with`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(
    diagram: &mut Diagram,
    op: &DiagramOp,
    defaults: &NodeDefaults,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        DiagramOp::AddNode {
            node_id,
            kind,
            label,
            position,
            reliability,
            k,
        } => {
            if diagram.contains_node(node_id) {
                return Err(ValidationError::DuplicateId {
                    kind: "node",
                    id: node_id.to_string(),
                }
                .into());
            }

            let label = label
                .clone()
                .unwrap_or_else(|| format!("{} {}", kind.title(), diagram.nodes().len() + 1));
            let reliability = match (reliability, kind) {
                (Some(reliability), _) => Some(*reliability),
                (None, NodeKind::Basic) => Some(defaults.reliability),
                (None, _) => None,
            };
            let k = match (k, kind) {
                (Some(k), _) => Some(*k),
                (None, NodeKind::KOutOfN) => Some(defaults.k),
                (None, _) => None,
            };

            let mut node = Node::new(node_id.clone(), *kind, label, *position);
            node.set_reliability(reliability)?;
            node.set_k(k)?;
            diagram.nodes_mut().push(node);
            delta.record_added(ElementRef::Node(node_id.clone()));
            Ok(())
        }
        DiagramOp::UpdateNode { node_id, patch } => {
            let Some(node) = diagram.node_mut(node_id) else {
                return Err(NotFoundError::Node(node_id.clone()).into());
            };

            if let Some(label) = &patch.label {
                node.set_label(label.clone());
            }
            if let Some(position) = patch.position {
                node.set_position(position);
            }
            if let Some(reliability) = patch.reliability {
                node.set_reliability(reliability)?;
            }
            if let Some(k) = patch.k {
                node.set_k(k)?;
            }
            delta.record_updated(ElementRef::Node(node_id.clone()));
            Ok(())
        }
        DiagramOp::RemoveNode { node_id } => {
            let Some(index) = diagram.nodes().iter().position(|n| n.id() == node_id) else {
                return Err(NotFoundError::Node(node_id.clone()).into());
            };
            diagram.nodes_mut().remove(index);

            let removed_edge_ids = diagram
                .edges()
                .iter()
                .filter(|edge| edge.touches(node_id))
                .map(|edge| edge.id().clone())
                .collect::<Vec<_>>();
            diagram.edges_mut().retain(|edge| !edge.touches(node_id));

            for edge_id in removed_edge_ids {
                delta.record_removed(ElementRef::Edge(edge_id));
            }
            delta.record_removed(ElementRef::Node(node_id.clone()));
            Ok(())
        }
        DiagramOp::AddEdge {
            edge_id,
            source,
            target,
        } => {
            check_new_edge(diagram, source, target)?;

            let already_connected = diagram
                .edges()
                .iter()
                .any(|edge| edge.source() == source && edge.target() == target);
            if already_connected {
                return Ok(());
            }

            if diagram.edge(edge_id).is_some() {
                return Err(ValidationError::DuplicateId {
                    kind: "edge",
                    id: edge_id.to_string(),
                }
                .into());
            }

            diagram
                .edges_mut()
                .push(Edge::new(edge_id.clone(), source.clone(), target.clone()));
            delta.record_added(ElementRef::Edge(edge_id.clone()));
            Ok(())
        }
        DiagramOp::RemoveEdge { edge_id } => {
            let Some(index) = diagram.edges().iter().position(|e| e.id() == edge_id) else {
                return Err(NotFoundError::Edge(edge_id.clone()).into());
            };
            diagram.edges_mut().remove(index);
            delta.record_removed(ElementRef::Edge(edge_id.clone()));
            Ok(())
        }
        DiagramOp::Clear => {
            let (nodes, edges) = diagram.replace_contents(Vec::new(), Vec::new());
            for edge in edges {
                delta.record_removed(ElementRef::Edge(edge.id().clone()));
            }
            for node in nodes {
                delta.record_removed(ElementRef::Node(node.id().clone()));
            }
            Ok(())
        }
    }
}
