// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{DiagramId, EdgeId, NodeId, ProjectId};
use super::Timestamp;
use crate::error::ValidationError;

/// The block type of a diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "series")]
    Series,
    #[serde(rename = "parallel")]
    Parallel,
    #[serde(rename = "k-out-of-n")]
    KOutOfN,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [Self::Basic, Self::Series, Self::Parallel, Self::KOutOfN];

    /// Wire tag, as used in persisted records and export documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Series => "series",
            Self::Parallel => "parallel",
            Self::KOutOfN => "k-out-of-n",
        }
    }

    /// Capitalized tag, used to build default node labels ("Basic 1", "K-out-of-n 3").
    pub fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Series => "Series",
            Self::Parallel => "Parallel",
            Self::KOutOfN => "K-out-of-n",
        }
    }

    /// Human-readable palette description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Basic => "basic component",
            Self::Series => "series group",
            Self::Parallel => "parallel group",
            Self::KOutOfN => "k-out-of-n group",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node type {0:?} (expected basic, series, parallel or k-out-of-n)")]
pub struct ParseNodeKindError(String);

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseNodeKindError(s.to_owned()))
    }
}

/// Canvas position of a node. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    #[serde(rename = "type")]
    kind: NodeKind,
    label: String,
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reliability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            position,
            reliability: None,
            k: None,
            metadata: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn reliability(&self) -> Option<f64> {
        self.reliability
    }

    pub fn set_reliability(&mut self, reliability: Option<f64>) -> Result<(), ValidationError> {
        if let Some(value) = reliability {
            validate_reliability(value)?;
        }
        self.reliability = reliability;
        Ok(())
    }

    pub fn k(&self) -> Option<u32> {
        self.k
    }

    pub fn set_k(&mut self, k: Option<u32>) -> Result<(), ValidationError> {
        if let Some(value) = k {
            validate_k(value)?;
        }
        self.k = k;
        Ok(())
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: Option<Metadata>) {
        self.metadata = metadata;
    }

    /// Checks the field ranges of a node built without the validating setters (deserialized
    /// records, import documents).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(reliability) = self.reliability {
            validate_reliability(reliability)?;
        }
        if let Some(k) = self.k {
            validate_k(k)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_reliability(reliability: f64) -> Result<(), ValidationError> {
    if reliability.is_finite() && (0.0..=1.0).contains(&reliability) {
        Ok(())
    } else {
        Err(ValidationError::ReliabilityOutOfRange { reliability })
    }
}

pub(crate) fn validate_k(k: u32) -> Result<(), ValidationError> {
    if k >= 1 {
        Ok(())
    } else {
        Err(ValidationError::InvalidK { k })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

/// A named reliability block diagram owned by one project.
///
/// `nodes` keep insertion order (canvas z-order). `project_id` is a lookup back-reference; the
/// owning project's diagram collection is what actually holds the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    id: DiagramId,
    name: String,
    project_id: ProjectId,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Diagram {
    pub fn new(
        id: DiagramId,
        project_id: ProjectId,
        name: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            project_id,
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &DiagramId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id() == edge_id)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Swaps in a new node/edge set wholesale, returning the previous one.
    pub fn replace_contents(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> (Vec<Node>, Vec<Edge>) {
        let nodes = std::mem::replace(&mut self.nodes, nodes);
        let edges = std::mem::replace(&mut self.edges, edges);
        (nodes, edges)
    }

    /// Checks everything except acyclicity: node field ranges, unique node/edge ids and edge
    /// endpoints referencing nodes of this diagram.
    pub fn validate_shape(&self) -> Result<(), ValidationError> {
        validate_contents(&self.nodes, &self.edges)
    }
}

pub(crate) fn validate_contents(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
    let mut node_ids = BTreeSet::new();
    for node in nodes {
        node.validate()?;
        if !node_ids.insert(node.id()) {
            return Err(ValidationError::DuplicateId {
                kind: "node",
                id: node.id().to_string(),
            });
        }
    }

    let mut edge_ids = BTreeSet::new();
    for edge in edges {
        if !edge_ids.insert(edge.id()) {
            return Err(ValidationError::DuplicateId {
                kind: "edge",
                id: edge.id().to_string(),
            });
        }
        for endpoint in [edge.source(), edge.target()] {
            if !node_ids.contains(endpoint) {
                return Err(ValidationError::UnknownNode {
                    node_id: endpoint.clone(),
                });
            }
        }
    }

    Ok(())
}
