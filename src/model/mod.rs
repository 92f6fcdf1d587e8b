// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Projects own diagrams; diagrams own typed nodes and the directed edges between them.

pub mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod project;

pub use diagram::{Diagram, Edge, Metadata, Node, NodeKind, ParseNodeKindError, Position};
pub use ids::{DiagramId, EdgeId, Id, IdError, NodeId, ProjectId};
pub use project::{Project, ProjectPatch};

/// Wall-clock instant stamped on created/updated records.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
