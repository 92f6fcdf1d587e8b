// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use super::require_name;
use crate::error::{NotFoundError, Result};
use crate::model::{Diagram, DiagramId, Edge, Node, ProjectId};
use crate::store::{diagrams_key, KeyedStore, StorageBackend};

/// CRUD over the diagram collection of one project.
#[derive(Debug, Clone)]
pub struct DiagramRepository {
    project_id: ProjectId,
    store: KeyedStore<Vec<Diagram>>,
}

impl DiagramRepository {
    pub fn new(backend: Arc<dyn StorageBackend>, project_id: ProjectId) -> Self {
        let store = KeyedStore::new(backend, diagrams_key(&project_id));
        Self { project_id, store }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn list(&self) -> Vec<Diagram> {
        self.store.read()
    }

    pub fn get(&self, id: &DiagramId) -> Result<Diagram, NotFoundError> {
        self.list()
            .into_iter()
            .find(|diagram| diagram.id() == id)
            .ok_or_else(|| self.not_found(id))
    }

    pub fn create(&self, name: &str) -> Result<Diagram> {
        self.create_with_contents(name, Vec::new(), Vec::new())
    }

    /// Creates a diagram that starts out with `nodes` and `edges`, in a single write.
    ///
    /// The contents are shape-checked like [`DiagramRepository::update`]; cycles are not.
    pub fn create_with_contents(
        &self,
        name: &str,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Result<Diagram> {
        let name = require_name("diagram name", name)?;

        let mut diagram = Diagram::new(
            DiagramId::generate(),
            self.project_id.clone(),
            name,
            Utc::now(),
        );
        diagram.replace_contents(nodes, edges);
        diagram.validate_shape()?;

        let mut diagrams = self.list();
        diagrams.push(diagram.clone());
        self.store.write(&diagrams)?;

        info!(
            project_id = self.project_id.as_str(),
            diagram_id = diagram.id().as_str(),
            nodes = diagram.nodes().len();
            "Created diagram"
        );
        Ok(diagram)
    }

    /// Replaces the stored record with the same id wholesale and refreshes `updatedAt`.
    ///
    /// The record is shape-checked (node field ranges, unique ids, edge endpoints); cycles are
    /// not re-checked. A diagram belonging to another project is reported as not found.
    pub fn update(&self, mut diagram: Diagram) -> Result<Diagram> {
        if diagram.project_id() != &self.project_id {
            return Err(self.not_found(diagram.id()).into());
        }
        diagram.validate_shape()?;

        let mut diagrams = self.list();
        let Some(slot) = diagrams.iter_mut().find(|stored| stored.id() == diagram.id()) else {
            return Err(self.not_found(diagram.id()).into());
        };
        diagram.touch(Utc::now());
        *slot = diagram.clone();
        self.store.write(&diagrams)?;

        debug!(
            project_id = self.project_id.as_str(),
            diagram_id = diagram.id().as_str(),
            nodes = diagram.nodes().len(),
            edges = diagram.edges().len();
            "Saved diagram"
        );
        Ok(diagram)
    }

    pub fn rename(&self, id: &DiagramId, name: &str) -> Result<Diagram> {
        let name = require_name("diagram name", name)?;

        let mut diagrams = self.list();
        let Some(diagram) = diagrams.iter_mut().find(|stored| stored.id() == id) else {
            return Err(self.not_found(id).into());
        };
        diagram.set_name(name);
        diagram.touch(Utc::now());
        let renamed = diagram.clone();
        self.store.write(&diagrams)?;

        info!(
            project_id = self.project_id.as_str(),
            diagram_id = id.as_str();
            "Renamed diagram"
        );
        Ok(renamed)
    }

    /// Removes exactly the record with `id`. Returns whether it existed.
    pub fn delete(&self, id: &DiagramId) -> Result<bool> {
        let mut diagrams = self.list();
        let before = diagrams.len();
        diagrams.retain(|diagram| diagram.id() != id);
        if diagrams.len() == before {
            debug!(
                project_id = self.project_id.as_str(),
                diagram_id = id.as_str();
                "Delete of absent diagram"
            );
            return Ok(false);
        }

        self.store.write(&diagrams)?;
        info!(
            project_id = self.project_id.as_str(),
            diagram_id = id.as_str();
            "Deleted diagram"
        );
        Ok(true)
    }

    fn not_found(&self, id: &DiagramId) -> NotFoundError {
        NotFoundError::Diagram {
            project_id: self.project_id.clone(),
            diagram_id: id.clone(),
        }
    }
}
