// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::model::{DiagramId, EdgeId, NodeId, NodeKind, ProjectId};

/// Manage reliability block diagrams grouped into projects.
#[derive(Parser, Debug)]
#[command(name = "reliagraph", author, version, about, long_about = None)]
pub struct Args {
    /// Folder holding the stored projects and diagrams
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Fsync every write (slower, best-effort durability)
    #[arg(long, global = true)]
    pub durable_writes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, list, rename, describe or delete projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Create, list, show, rename or delete diagrams
    #[command(subcommand)]
    Diagram(DiagramCommand),

    /// Add, update or remove diagram nodes
    #[command(subcommand)]
    Node(NodeCommand),

    /// Connect or disconnect diagram nodes
    #[command(subcommand)]
    Edge(EdgeCommand),

    /// Write a diagram as a JSON document
    Export {
        project: ProjectId,
        diagram: DiagramId,
        /// Output file; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a new diagram from a JSON document
    Import { project: ProjectId, file: PathBuf },

    /// Report cycles in a stored diagram
    Check {
        project: ProjectId,
        diagram: DiagramId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    List,
    Rename {
        id: ProjectId,
        name: String,
    },
    Describe {
        id: ProjectId,
        text: String,
    },
    /// Delete a project and all of its diagrams
    Delete {
        id: ProjectId,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiagramCommand {
    Create {
        project: ProjectId,
        name: String,
    },
    List {
        project: ProjectId,
    },
    Show {
        project: ProjectId,
        id: DiagramId,
    },
    Rename {
        project: ProjectId,
        id: DiagramId,
        name: String,
    },
    Delete {
        project: ProjectId,
        id: DiagramId,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    Add {
        project: ProjectId,
        diagram: DiagramId,
        /// basic, series, parallel or k-out-of-n
        kind: NodeKind,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
    Update {
        project: ProjectId,
        diagram: DiagramId,
        node: NodeId,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        reliability: Option<f64>,
        #[arg(long)]
        k: Option<u32>,
    },
    /// Remove a node and every edge touching it
    Remove {
        project: ProjectId,
        diagram: DiagramId,
        node: NodeId,
    },
}

#[derive(Subcommand, Debug)]
pub enum EdgeCommand {
    /// Connect source -> target, refusing connections that would close a cycle
    Add {
        project: ProjectId,
        diagram: DiagramId,
        source: NodeId,
        target: NodeId,
    },
    Remove {
        project: ProjectId,
        diagram: DiagramId,
        edge: EdgeId,
    },
}

#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct Confirm {
    /// Execute the deletion instead of only describing it
    #[arg(long)]
    pub yes: bool,
}
