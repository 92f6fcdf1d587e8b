// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command surface over projects and diagrams.
//!
//! Every call returns new values. Diagram editing calls (`add_node`, `try_add_edge`, ...) work
//! on a diagram value and do not persist; [`Workspace::save_diagram`] does. Destructive calls
//! are two-phase: `plan_delete_*` describes what would go, [`DeletionPlan::confirm`] turns the
//! plan into a [`ConfirmedDeletion`], and only [`Workspace::delete`] removes anything.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};

use crate::error::{NotFoundError, Result};
use crate::format::{self, DiagramDocument};
use crate::model::{
    Diagram, DiagramId, EdgeId, NodeId, NodeKind, Position, Project, ProjectId, ProjectPatch,
};
use crate::ops::{apply_ops_with, DiagramOp, NodeDefaults, NodePatch};
use crate::repo::{DiagramRepository, ProjectRepository};
use crate::store::{FolderBackend, MemoryBackend, StorageBackend, WriteDurability};

/// Name given to an imported diagram whose document has no usable name.
pub const IMPORTED_DIAGRAM_NAME: &str = "Imported diagram";

#[derive(Debug, Clone)]
pub struct Workspace {
    backend: Arc<dyn StorageBackend>,
    projects: ProjectRepository,
    node_defaults: NodeDefaults,
}

impl Workspace {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let projects = ProjectRepository::new(Arc::clone(&backend));
        Self {
            backend,
            projects,
            node_defaults: NodeDefaults::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn open_folder(root: impl Into<PathBuf>, durability: WriteDurability) -> Self {
        Self::new(Arc::new(
            FolderBackend::new(root).with_durability(durability),
        ))
    }

    pub fn with_node_defaults(mut self, node_defaults: NodeDefaults) -> Self {
        self.node_defaults = node_defaults;
        self
    }

    pub fn node_defaults(&self) -> &NodeDefaults {
        &self.node_defaults
    }

    fn diagram_repo(&self, project_id: &ProjectId) -> DiagramRepository {
        DiagramRepository::new(Arc::clone(&self.backend), project_id.clone())
    }

    fn existing_diagram_repo(&self, project_id: &ProjectId) -> Result<DiagramRepository> {
        if !self.projects.contains(project_id) {
            return Err(NotFoundError::Project(project_id.clone()).into());
        }
        Ok(self.diagram_repo(project_id))
    }

    // Projects

    pub fn projects(&self) -> Vec<Project> {
        self.projects.list()
    }

    pub fn project(&self, id: &ProjectId) -> Result<Project> {
        Ok(self.projects.get(id)?)
    }

    pub fn create_project(&self, name: &str, description: &str) -> Result<Project> {
        self.projects.create(name, description)
    }

    pub fn update_project(&self, id: &ProjectId, patch: ProjectPatch) -> Result<Project> {
        self.projects.update(id, patch)
    }

    pub fn plan_delete_project(&self, id: &ProjectId) -> DeletionPlan {
        let target = DeletionTarget::Project {
            project_id: id.clone(),
        };
        let summary = match self.projects.get(id) {
            Ok(project) => DeletionSummary::Project {
                name: project.name().to_owned(),
                diagram_count: self.diagram_repo(id).list().len(),
            },
            Err(_) => DeletionSummary::Nothing,
        };
        debug!(project_id = id.as_str(); "Planned project deletion");
        DeletionPlan { target, summary }
    }

    // Diagrams

    pub fn diagrams(&self, project_id: &ProjectId) -> Result<Vec<Diagram>> {
        Ok(self.existing_diagram_repo(project_id)?.list())
    }

    pub fn diagram(&self, project_id: &ProjectId, id: &DiagramId) -> Result<Diagram> {
        Ok(self.existing_diagram_repo(project_id)?.get(id)?)
    }

    pub fn create_diagram(&self, project_id: &ProjectId, name: &str) -> Result<Diagram> {
        self.existing_diagram_repo(project_id)?.create(name)
    }

    pub fn rename_diagram(
        &self,
        project_id: &ProjectId,
        id: &DiagramId,
        name: &str,
    ) -> Result<Diagram> {
        self.existing_diagram_repo(project_id)?.rename(id, name)
    }

    /// Persists a diagram value, replacing the stored record wholesale.
    pub fn save_diagram(&self, diagram: &Diagram) -> Result<Diagram> {
        self.existing_diagram_repo(diagram.project_id())?
            .update(diagram.clone())
    }

    pub fn plan_delete_diagram(&self, project_id: &ProjectId, id: &DiagramId) -> DeletionPlan {
        let target = DeletionTarget::Diagram {
            project_id: project_id.clone(),
            diagram_id: id.clone(),
        };
        let summary = match self.diagram_repo(project_id).get(id) {
            Ok(diagram) => DeletionSummary::Diagram {
                name: diagram.name().to_owned(),
                node_count: diagram.nodes().len(),
                edge_count: diagram.edges().len(),
            },
            Err(_) => DeletionSummary::Nothing,
        };
        debug!(project_id = project_id.as_str(), diagram_id = id.as_str(); "Planned diagram deletion");
        DeletionPlan { target, summary }
    }

    /// Executes a confirmed deletion. Returns whether anything was removed.
    pub fn delete(&self, confirmed: ConfirmedDeletion) -> Result<bool> {
        let removed = match &confirmed.target {
            DeletionTarget::Project { project_id } => self.projects.delete(project_id)?,
            DeletionTarget::Diagram {
                project_id,
                diagram_id,
            } => self.diagram_repo(project_id).delete(diagram_id)?,
        };
        info!(deletion = confirmed.target.to_string(), removed = removed; "Executed confirmed deletion");
        Ok(removed)
    }

    // Diagram editing

    fn edit(&self, diagram: &Diagram, ops: &[DiagramOp]) -> Result<Diagram> {
        let mut edited = diagram.clone();
        apply_ops_with(&mut edited, ops, &self.node_defaults)?;
        Ok(edited)
    }

    /// Drops a node of `kind` at `position` with the palette defaults.
    pub fn add_node(&self, diagram: &Diagram, kind: NodeKind, position: Position) -> Result<Diagram> {
        self.edit(
            diagram,
            &[DiagramOp::AddNode {
                node_id: NodeId::generate(),
                kind,
                label: None,
                position,
                reliability: None,
                k: None,
            }],
        )
    }

    pub fn update_node(
        &self,
        diagram: &Diagram,
        node_id: &NodeId,
        patch: NodePatch,
    ) -> Result<Diagram> {
        self.edit(
            diagram,
            &[DiagramOp::UpdateNode {
                node_id: node_id.clone(),
                patch,
            }],
        )
    }

    /// Connects `source -> target` unless that would close a cycle.
    ///
    /// Connecting an already connected pair returns the diagram unchanged.
    pub fn try_add_edge(
        &self,
        diagram: &Diagram,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Diagram> {
        self.edit(
            diagram,
            &[DiagramOp::AddEdge {
                edge_id: EdgeId::generate(),
                source: source.clone(),
                target: target.clone(),
            }],
        )
    }

    /// Removes a node and exactly the edges touching it.
    pub fn delete_node(&self, diagram: &Diagram, node_id: &NodeId) -> Result<Diagram> {
        self.edit(
            diagram,
            &[DiagramOp::RemoveNode {
                node_id: node_id.clone(),
            }],
        )
    }

    pub fn delete_edge(&self, diagram: &Diagram, edge_id: &EdgeId) -> Result<Diagram> {
        self.edit(
            diagram,
            &[DiagramOp::RemoveEdge {
                edge_id: edge_id.clone(),
            }],
        )
    }

    pub fn clear_diagram(&self, diagram: &Diagram) -> Diagram {
        let mut cleared = diagram.clone();
        cleared.replace_contents(Vec::new(), Vec::new());
        cleared
    }

    // Export / import

    pub fn export_diagram(&self, diagram: &Diagram) -> DiagramDocument {
        format::export(diagram)
    }

    /// Creates and persists a new diagram in `project_id` from an export document.
    pub fn import_diagram(&self, project_id: &ProjectId, text: &str) -> Result<Diagram> {
        let repo = self.existing_diagram_repo(project_id)?;
        let fragment = format::import(text)?;
        let name = fragment
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(IMPORTED_DIAGRAM_NAME);
        repo.create_with_contents(name, fragment.nodes, fragment.edges)
    }

    /// Replaces the nodes and edges of a diagram value with a document's contents.
    ///
    /// The result is not persisted and keeps the diagram's own name. On error the input is
    /// untouched.
    pub fn import_into(&self, diagram: &Diagram, text: &str) -> Result<Diagram> {
        let fragment = format::import(text)?;
        let mut imported = diagram.clone();
        imported.replace_contents(fragment.nodes, fragment.edges);
        Ok(imported)
    }
}

/// What a deletion removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionTarget {
    /// A project and its whole diagram collection.
    Project { project_id: ProjectId },
    Diagram {
        project_id: ProjectId,
        diagram_id: DiagramId,
    },
}

impl fmt::Display for DeletionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project { project_id } => write!(f, "project {project_id}"),
            Self::Diagram {
                project_id,
                diagram_id,
            } => write!(f, "diagram {diagram_id} of project {project_id}"),
        }
    }
}

/// What the target holds at planning time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionSummary {
    Project {
        name: String,
        diagram_count: usize,
    },
    Diagram {
        name: String,
        node_count: usize,
        edge_count: usize,
    },
    /// The target does not exist; executing the plan removes nothing.
    Nothing,
}

/// A described but not yet confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a deletion plan does nothing until confirmed and passed to Workspace::delete"]
pub struct DeletionPlan {
    target: DeletionTarget,
    summary: DeletionSummary,
}

impl DeletionPlan {
    pub fn target(&self) -> &DeletionTarget {
        &self.target
    }

    pub fn summary(&self) -> &DeletionSummary {
        &self.summary
    }

    pub fn is_noop(&self) -> bool {
        self.summary == DeletionSummary::Nothing
    }

    /// Records the caller's confirmation.
    pub fn confirm(self) -> ConfirmedDeletion {
        ConfirmedDeletion {
            target: self.target,
        }
    }
}

impl fmt::Display for DeletionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            DeletionSummary::Project {
                name,
                diagram_count,
            } => write!(
                f,
                "delete project {name:?} and its {diagram_count} diagram(s)"
            ),
            DeletionSummary::Diagram {
                name,
                node_count,
                edge_count,
            } => write!(
                f,
                "delete diagram {name:?} with {node_count} node(s) and {edge_count} edge(s)"
            ),
            DeletionSummary::Nothing => write!(f, "nothing to delete ({} not found)", self.target),
        }
    }
}

/// A deletion the caller has confirmed. Only obtainable through [`DeletionPlan::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeletion {
    target: DeletionTarget,
}

impl ConfirmedDeletion {
    pub fn target(&self) -> &DeletionTarget {
        &self.target
    }
}
