// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reliagraph: projects of reliability block diagrams.
//!
//! A [`model::Project`] owns diagrams; a [`model::Diagram`] owns typed nodes (basic component,
//! series, parallel, k-out-of-n) and the directed edges between them. The edge set of every
//! diagram is kept acyclic by checking each new edge with [`graph::check_new_edge`] before it is
//! inserted. Loaded and imported diagrams are not re-checked; [`graph::cycles`] reports them.
//!
//! Persistence goes through [`store::KeyedStore`]: the project list lives under `"projects"` and
//! each project's diagrams under `"diagrams:{projectId}"`. The [`workspace::Workspace`] command
//! surface ties repositories, ops and the JSON document format together.
//!
//! # Limitations
//!
//! Storage has no locking or transactions. Two processes pointed at the same data directory are
//! last-write-wins per key: each write replaces the whole project list or the whole diagram
//! collection of one project.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod model;
pub mod ops;
pub mod repo;
pub mod store;
pub mod workspace;

pub use error::{Error, Result};
pub use workspace::Workspace;
