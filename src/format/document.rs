// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON export/import document.
//!
//! ```json
//! {
//!   "name": "Cooling loop",
//!   "nodes": [{ "id": "n1", "type": "basic", "label": "Pump", "position": { "x": 0, "y": 0 },
//!               "reliability": 0.95 }],
//!   "edges": [{ "id": "e1", "source": "n1", "target": "n2" }]
//! }
//! ```
//!
//! Import validates shape only: ids, types, ranges and edge endpoints. Cycles are not checked;
//! a cyclic document is accepted as-is.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ImportFormatError, ValidationError};
use crate::model::{Diagram, Edge, Node, NodeId, NodeKind, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub name: String,
    pub nodes: Vec<DocumentNode>,
    pub edges: Vec<Edge>,
}

/// A node as it appears in a document. Node metadata is not part of the format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
}

impl From<&Node> for DocumentNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().clone(),
            kind: node.kind(),
            label: node.label().to_owned(),
            position: node.position(),
            reliability: node.reliability(),
            k: node.k(),
        }
    }
}

impl DocumentNode {
    fn into_node(self) -> Result<Node, ValidationError> {
        let mut node = Node::new(self.id, self.kind, self.label, self.position);
        node.set_reliability(self.reliability)?;
        node.set_k(self.k)?;
        Ok(node)
    }
}

impl DiagramDocument {
    /// Pretty JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Validated contents of an import document, ready to be committed onto a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramFragment {
    /// Document name, when present and a string.
    pub name: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

pub fn export(diagram: &Diagram) -> DiagramDocument {
    DiagramDocument {
        name: diagram.name().to_owned(),
        nodes: diagram.nodes().iter().map(DocumentNode::from).collect(),
        edges: diagram.edges().to_vec(),
    }
}

/// Download file name for a diagram: whitespace runs become `-`, plus a `.json` suffix.
pub fn export_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 5);
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out.push_str(".json");
    out
}

pub fn import(text: &str) -> Result<DiagramFragment, ImportFormatError> {
    let value: Value = serde_json::from_str(text).map_err(ImportFormatError::Syntax)?;
    let Value::Object(object) = value else {
        return Err(ImportFormatError::NotAnObject);
    };

    let node_entries = required_array(&object, "nodes")?;
    let edge_entries = required_array(&object, "edges")?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let mut node_ids = BTreeSet::new();
    let mut nodes = Vec::with_capacity(node_entries.len());
    for (index, entry) in node_entries.iter().enumerate() {
        let path = format!("nodes[{index}]");
        let node = DocumentNode::deserialize(entry)
            .map_err(|source| ImportFormatError::InvalidEntry {
                path: path.clone(),
                source,
            })?
            .into_node()
            .map_err(|source| ImportFormatError::InvalidValue {
                path: path.clone(),
                source,
            })?;

        if !node_ids.insert(node.id().clone()) {
            return Err(ImportFormatError::InvalidValue {
                path,
                source: ValidationError::DuplicateId {
                    kind: "node",
                    id: node.id().to_string(),
                },
            });
        }
        nodes.push(node);
    }

    let mut edge_ids = BTreeSet::new();
    let mut edges = Vec::with_capacity(edge_entries.len());
    for (index, entry) in edge_entries.iter().enumerate() {
        let path = format!("edges[{index}]");
        let edge = Edge::deserialize(entry).map_err(|source| ImportFormatError::InvalidEntry {
            path: path.clone(),
            source,
        })?;

        if !edge_ids.insert(edge.id().clone()) {
            return Err(ImportFormatError::InvalidValue {
                path,
                source: ValidationError::DuplicateId {
                    kind: "edge",
                    id: edge.id().to_string(),
                },
            });
        }
        for endpoint in [edge.source(), edge.target()] {
            if !node_ids.contains(endpoint) {
                return Err(ImportFormatError::InvalidValue {
                    path,
                    source: ValidationError::UnknownNode {
                        node_id: endpoint.clone(),
                    },
                });
            }
        }
        edges.push(edge);
    }

    Ok(DiagramFragment { name, nodes, edges })
}

fn required_array<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a Vec<Value>, ImportFormatError> {
    match object.get(field) {
        None => Err(ImportFormatError::MissingArray(field)),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(ImportFormatError::NotAnArray(field)),
    }
}
