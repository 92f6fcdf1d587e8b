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
use crate::model::{Diagram, Project, ProjectId, ProjectPatch};
use crate::store::{diagrams_key, KeyedStore, StorageBackend, PROJECTS_KEY};

/// CRUD over the global project list.
///
/// Deleting a project also clears its diagram collection.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    backend: Arc<dyn StorageBackend>,
    store: KeyedStore<Vec<Project>>,
}

impl ProjectRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let store = KeyedStore::new(Arc::clone(&backend), PROJECTS_KEY);
        Self { backend, store }
    }

    pub fn list(&self) -> Vec<Project> {
        self.store.read()
    }

    pub fn get(&self, id: &ProjectId) -> Result<Project, NotFoundError> {
        self.list()
            .into_iter()
            .find(|project| project.id() == id)
            .ok_or_else(|| NotFoundError::Project(id.clone()))
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.list().iter().any(|project| project.id() == id)
    }

    pub fn create(&self, name: &str, description: &str) -> Result<Project> {
        let name = require_name("project name", name)?;

        let mut projects = self.list();
        let project = Project::new(ProjectId::generate(), name, description, Utc::now());
        projects.push(project.clone());
        self.store.write(&projects)?;

        info!(project_id = project.id().as_str(), name = project.name(); "Created project");
        Ok(project)
    }

    pub fn update(&self, id: &ProjectId, mut patch: ProjectPatch) -> Result<Project> {
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(require_name("project name", name)?);
        }

        let mut projects = self.list();
        let Some(project) = projects.iter_mut().find(|project| project.id() == id) else {
            return Err(NotFoundError::Project(id.clone()).into());
        };
        project.apply_patch(patch, Utc::now());
        let updated = project.clone();
        self.store.write(&projects)?;

        info!(project_id = id.as_str(); "Updated project");
        Ok(updated)
    }

    /// Removes the project and its diagram collection. Returns whether the project existed.
    ///
    /// Deleting an absent project still clears any orphaned diagram collection under its id.
    pub fn delete(&self, id: &ProjectId) -> Result<bool> {
        let mut projects = self.list();
        let before = projects.len();
        projects.retain(|project| project.id() != id);
        let existed = projects.len() != before;

        if existed {
            self.store.write(&projects)?;
        }
        KeyedStore::<Vec<Diagram>>::new(Arc::clone(&self.backend), diagrams_key(id)).clear()?;

        if existed {
            info!(project_id = id.as_str(); "Deleted project and its diagrams");
        } else {
            debug!(project_id = id.as_str(); "Delete of absent project");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::ProjectRepository;
    use crate::error::{Error, NotFoundError, PersistenceError, ValidationError};
    use crate::model::{ProjectId, ProjectPatch};
    use crate::repo::DiagramRepository;
    use crate::store::{MemoryBackend, StorageBackend};

    struct RepoCtx {
        backend: Arc<MemoryBackend>,
        projects: ProjectRepository,
    }

    #[fixture]
    fn ctx() -> RepoCtx {
        let backend = Arc::new(MemoryBackend::new());
        let projects = ProjectRepository::new(backend.clone());
        RepoCtx { backend, projects }
    }

    #[rstest]
    fn create_assigns_fresh_ids_and_timestamps(ctx: RepoCtx) {
        let a = ctx.projects.create("Plant A", "").expect("create");
        let b = ctx.projects.create("Plant A", "again").expect("create");

        assert_ne!(a.id(), b.id());
        assert_eq!(a.created_at(), a.updated_at());
        assert_eq!(ctx.projects.list(), vec![a.clone(), b]);
        assert_eq!(ctx.projects.get(a.id()).expect("get"), a);
    }

    #[rstest]
    fn create_rejects_blank_names_without_writing(ctx: RepoCtx) {
        let err = ctx.projects.create("  ", "desc").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyName { .. })
        ));
        assert_eq!(ctx.backend.get("projects").expect("get"), None);
    }

    #[rstest]
    fn update_merges_named_fields(ctx: RepoCtx) {
        let project = ctx.projects.create("Plant", "old").expect("create");

        let updated = ctx
            .projects
            .update(
                project.id(),
                ProjectPatch {
                    description: Some("new".to_owned()),
                    ..ProjectPatch::default()
                },
            )
            .expect("update");

        assert_eq!(updated.name(), "Plant");
        assert_eq!(updated.description(), "new");
        assert!(updated.updated_at() >= project.updated_at());
        assert_eq!(updated.created_at(), project.created_at());
        assert_eq!(ctx.projects.get(project.id()).expect("get"), updated);
    }

    #[rstest]
    fn update_rejects_blank_name(ctx: RepoCtx) {
        let project = ctx.projects.create("Plant", "").expect("create");
        let err = ctx
            .projects
            .update(
                project.id(),
                ProjectPatch {
                    name: Some(" ".to_owned()),
                    ..ProjectPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(ctx.projects.get(project.id()).expect("get").name(), "Plant");
    }

    #[rstest]
    fn update_and_get_report_missing_projects(ctx: RepoCtx) {
        let missing = ProjectId::new("nope").expect("id");
        assert_eq!(
            ctx.projects.get(&missing),
            Err(NotFoundError::Project(missing.clone()))
        );
        assert!(matches!(
            ctx.projects.update(&missing, ProjectPatch::default()),
            Err(Error::NotFound(NotFoundError::Project(_)))
        ));
    }

    #[rstest]
    fn delete_cascades_to_diagrams_only_of_that_project(ctx: RepoCtx) {
        let doomed = ctx.projects.create("Doomed", "").expect("create");
        let kept = ctx.projects.create("Kept", "").expect("create");

        let doomed_diagrams = DiagramRepository::new(ctx.backend.clone(), doomed.id().clone());
        let kept_diagrams = DiagramRepository::new(ctx.backend.clone(), kept.id().clone());
        doomed_diagrams.create("One").expect("diagram");
        doomed_diagrams.create("Two").expect("diagram");
        let survivor = kept_diagrams.create("Three").expect("diagram");

        assert!(ctx.projects.delete(doomed.id()).expect("delete"));

        assert_eq!(ctx.projects.list(), vec![kept]);
        assert!(doomed_diagrams.list().is_empty());
        assert_eq!(
            ctx.backend
                .get(&format!("diagrams:{}", doomed.id()))
                .expect("get"),
            None
        );
        assert_eq!(kept_diagrams.list(), vec![survivor]);

        assert!(!ctx.projects.delete(doomed.id()).expect("idempotent"));
    }

    #[test]
    fn quota_failure_is_surfaced_and_list_is_unchanged() {
        let backend = Arc::new(MemoryBackend::with_quota(256));
        let projects = ProjectRepository::new(backend);
        projects.create("P", "").expect("first fits");

        let err = projects.create("Q", &"x".repeat(400)).unwrap_err();
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::QuotaExceeded { .. })
        ));
        assert_eq!(projects.list().len(), 1);
    }
}
