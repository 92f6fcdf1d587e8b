// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error taxonomy shared by the repositories, the graph validator and the serializer.
//!
//! Every failure a caller can observe falls in one of four families:
//!
//! - [`ValidationError`]: the request is rejected and no state changed.
//! - [`NotFoundError`]: the targeted project/diagram/node/edge does not exist.
//! - [`ImportFormatError`]: an import document is malformed; the current diagram is untouched.
//! - [`PersistenceError`]: the storage backend refused a write. Never retried automatically.
//!
//! [`Error`] wraps all four so command-surface methods can use a single `Result`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{DiagramId, EdgeId, NodeId, ProjectId};
use crate::ops::ApplyError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    ImportFormat(#[from] ImportFormatError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("connecting {from} -> {to} would create a cycle")]
    Cycle { from: NodeId, to: NodeId },

    #[error("k must be at least 1 (got {k})")]
    InvalidK { k: u32 },

    #[error("reliability must lie in [0, 1] (got {reliability})")]
    ReliabilityOutOfRange { reliability: f64 },

    #[error("edge endpoint references unknown node {node_id}")]
    UnknownNode { node_id: NodeId },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("project not found (id={0})")]
    Project(ProjectId),

    #[error("diagram not found (project={project_id}, id={diagram_id})")]
    Diagram {
        project_id: ProjectId,
        diagram_id: DiagramId,
    },

    #[error("node not found (id={0})")]
    Node(NodeId),

    #[error("edge not found (id={0})")]
    Edge(EdgeId),
}

#[derive(Debug, Error)]
pub enum ImportFormatError {
    #[error("import document is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("import document must be a JSON object")]
    NotAnObject,

    #[error("import document is missing the `{0}` array")]
    MissingArray(&'static str),

    #[error("`{0}` must be an array")]
    NotAnArray(&'static str),

    #[error("invalid entry at {path}: {source}")]
    InvalidEntry {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid entry at {path}: {source}")]
    InvalidValue {
        path: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage quota exceeded writing key {key:?} ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },

    #[error("storage backend is unavailable: {0}")]
    Unavailable(String),
}

impl From<ApplyError> for Error {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Validation(err) => Self::Validation(err),
            ApplyError::NotFound(err) => Self::NotFound(err),
        }
    }
}

impl Error {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::ImportFormat(_) => 1,
            Self::Persistence(_) => 3,
        }
    }
}
