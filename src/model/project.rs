// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::ProjectId;
use super::Timestamp;

/// A named container for diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    #[serde(default)]
    description: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Shallow merge: each `Some` field replaces the stored one, `None` leaves it alone.
    pub fn apply_patch(&mut self, patch: ProjectPatch, now: Timestamp) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::{Project, ProjectPatch};
    use crate::model::{fixtures, ProjectId};

    #[test]
    fn apply_patch_merges_only_named_fields() {
        let now = fixtures::fixed_now();
        let mut project = Project::new(
            ProjectId::new("p1").expect("project id"),
            "Plant",
            "Cooling loop",
            now,
        );

        let later = now + Duration::seconds(5);
        project.apply_patch(
            ProjectPatch {
                name: Some("Plant B".to_owned()),
                description: None,
            },
            later,
        );

        assert_eq!(project.name(), "Plant B");
        assert_eq!(project.description(), "Cooling loop");
        assert_eq!(project.created_at(), now);
        assert_eq!(project.updated_at(), later);
    }

    #[test]
    fn missing_description_deserializes_as_empty() {
        let json = serde_json::json!({
            "id": "p1",
            "name": "Plant",
            "createdAt": "2024-06-01T12:00:00Z",
            "updatedAt": "2024-06-01T12:00:00Z",
        });
        let project: Project = serde_json::from_value(json).expect("deserialize");
        assert_eq!(project.description(), "");
        assert_eq!(project.created_at(), project.updated_at());
    }
}
