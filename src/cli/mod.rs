// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line front end.
//!
//! Every command opens the folder-backed workspace, performs one call and prints a plain-text
//! result. Commands that change a diagram load it, edit the value and save it back.

mod args;

pub use args::{Args, Command, Confirm, DiagramCommand, EdgeCommand, NodeCommand, ProjectCommand};

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::config::{load_config, AppConfig, ConfigError};
use crate::error::Error;
use crate::format::export_file_name;
use crate::graph::cycles;
use crate::model::{NodeId, Position, ProjectPatch};
use crate::ops::NodePatch;
use crate::store::WriteDurability;
use crate::workspace::{DeletionPlan, Workspace};

/// Exit code for command-line usage errors.
pub const EXIT_USAGE: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write to stdout: {0}")]
    Stdout(#[from] io::Error),

    #[error("not deleted; re-run with --yes to confirm")]
    NotConfirmed,

    #[error("diagram contains {count} cycle(s)")]
    CyclesFound { count: usize },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(err) => err.exit_code(),
            Self::Config(_) => EXIT_USAGE,
            Self::ReadInput { .. } | Self::NotConfirmed | Self::CyclesFound { .. } => 1,
            Self::WriteOutput { .. } | Self::Encode(_) | Self::Stdout(_) => 3,
        }
    }
}

/// Opens the workspace described by `args` and the configuration.
pub fn open_workspace(args: &Args, config: &AppConfig) -> Workspace {
    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir());
    let durability = if args.durable_writes {
        WriteDurability::Durable
    } else {
        config.durability()
    };
    info!(data_dir = data_dir.display().to_string(); "Opening workspace");
    Workspace::open_folder(data_dir, durability).with_node_defaults(config.node_defaults())
}

/// Runs one command, writing its human-readable result to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let workspace = open_workspace(args, &config);

    match &args.command {
        Command::Project(command) => run_project(&workspace, command, out),
        Command::Diagram(command) => run_diagram(&workspace, command, out),
        Command::Node(command) => run_node(&workspace, command, out),
        Command::Edge(command) => run_edge(&workspace, command, out),
        Command::Export {
            project,
            diagram,
            output,
        } => {
            let diagram = workspace.diagram(project, diagram)?;
            let text = workspace
                .export_diagram(&diagram)
                .to_json_pretty()
                .map_err(CliError::Encode)?;
            match output {
                Some(path) => {
                    fs::write(path, format!("{text}\n")).map_err(|source| {
                        CliError::WriteOutput {
                            path: path.clone(),
                            source,
                        }
                    })?;
                    writeln!(out, "{}", path.display())?;
                }
                None => writeln!(out, "{text}")?,
            }
            Ok(())
        }
        Command::Import { project, file } => {
            let text = fs::read_to_string(file).map_err(|source| CliError::ReadInput {
                path: file.clone(),
                source,
            })?;
            let diagram = workspace.import_diagram(project, &text)?;
            writeln!(out, "{}\t{}", diagram.id(), diagram.name())?;
            Ok(())
        }
        Command::Check { project, diagram } => {
            let diagram = workspace.diagram(project, diagram)?;
            let found = cycles(&diagram);
            if found.is_empty() {
                writeln!(
                    out,
                    "ok: {} node(s), {} edge(s), no cycles",
                    diagram.nodes().len(),
                    diagram.edges().len()
                )?;
                return Ok(());
            }
            for cycle in &found {
                let ids = cycle.iter().map(NodeId::as_str).collect::<Vec<_>>();
                writeln!(out, "cycle: {}", ids.join(", "))?;
            }
            Err(CliError::CyclesFound { count: found.len() })
        }
    }
}

fn run_project(
    workspace: &Workspace,
    command: &ProjectCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        ProjectCommand::Create { name, description } => {
            let project = workspace.create_project(name, description)?;
            writeln!(out, "{}", project.id())?;
        }
        ProjectCommand::List => {
            for project in workspace.projects() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    project.id(),
                    project.name(),
                    project.description()
                )?;
            }
        }
        ProjectCommand::Rename { id, name } => {
            let patch = ProjectPatch {
                name: Some(name.clone()),
                ..ProjectPatch::default()
            };
            let project = workspace.update_project(id, patch)?;
            writeln!(out, "{}\t{}", project.id(), project.name())?;
        }
        ProjectCommand::Describe { id, text } => {
            let patch = ProjectPatch {
                description: Some(text.clone()),
                ..ProjectPatch::default()
            };
            let project = workspace.update_project(id, patch)?;
            writeln!(out, "{}\t{}", project.id(), project.description())?;
        }
        ProjectCommand::Delete { id, confirm } => {
            let plan = workspace.plan_delete_project(id);
            execute_plan(workspace, plan, confirm.yes, out)?;
        }
    }
    Ok(())
}

fn run_diagram(
    workspace: &Workspace,
    command: &DiagramCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        DiagramCommand::Create { project, name } => {
            let diagram = workspace.create_diagram(project, name)?;
            writeln!(out, "{}", diagram.id())?;
        }
        DiagramCommand::List { project } => {
            for diagram in workspace.diagrams(project)? {
                writeln!(
                    out,
                    "{}\t{}\t{} node(s)\t{} edge(s)",
                    diagram.id(),
                    diagram.name(),
                    diagram.nodes().len(),
                    diagram.edges().len()
                )?;
            }
        }
        DiagramCommand::Show { project, id } => {
            let diagram = workspace.diagram(project, id)?;
            let text = serde_json::to_string_pretty(&diagram).map_err(CliError::Encode)?;
            writeln!(out, "{text}")?;
            writeln!(out, "# export file name: {}", export_file_name(diagram.name()))?;
        }
        DiagramCommand::Rename { project, id, name } => {
            let diagram = workspace.rename_diagram(project, id, name)?;
            writeln!(out, "{}\t{}", diagram.id(), diagram.name())?;
        }
        DiagramCommand::Delete {
            project,
            id,
            confirm,
        } => {
            let plan = workspace.plan_delete_diagram(project, id);
            execute_plan(workspace, plan, confirm.yes, out)?;
        }
    }
    Ok(())
}

fn run_node(
    workspace: &Workspace,
    command: &NodeCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        NodeCommand::Add {
            project,
            diagram,
            kind,
            x,
            y,
        } => {
            let current = workspace.diagram(project, diagram)?;
            let edited = workspace.add_node(&current, *kind, Position::new(*x, *y))?;
            let saved = workspace.save_diagram(&edited)?;
            if let Some(node) = saved.nodes().last() {
                writeln!(out, "{}\t{}", node.id(), node.label())?;
            }
        }
        NodeCommand::Update {
            project,
            diagram,
            node,
            label,
            reliability,
            k,
        } => {
            let patch = NodePatch {
                label: label.clone(),
                position: None,
                reliability: reliability.map(Some),
                k: k.map(Some),
            };
            let current = workspace.diagram(project, diagram)?;
            let edited = workspace.update_node(&current, node, patch)?;
            workspace.save_diagram(&edited)?;
            writeln!(out, "{node}")?;
        }
        NodeCommand::Remove {
            project,
            diagram,
            node,
        } => {
            let current = workspace.diagram(project, diagram)?;
            let edited = workspace.delete_node(&current, node)?;
            let saved = workspace.save_diagram(&edited)?;
            let removed_edges = current.edges().len() - saved.edges().len();
            writeln!(out, "{node}\tremoved with {removed_edges} edge(s)")?;
        }
    }
    Ok(())
}

fn run_edge(
    workspace: &Workspace,
    command: &EdgeCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        EdgeCommand::Add {
            project,
            diagram,
            source,
            target,
        } => {
            let current = workspace.diagram(project, diagram)?;
            let edited = workspace.try_add_edge(&current, source, target)?;
            if edited.edges().len() == current.edges().len() {
                writeln!(out, "already connected: {source} -> {target}")?;
                return Ok(());
            }
            let saved = workspace.save_diagram(&edited)?;
            if let Some(edge) = saved.edges().last() {
                writeln!(out, "{}\t{} -> {}", edge.id(), edge.source(), edge.target())?;
            }
        }
        EdgeCommand::Remove {
            project,
            diagram,
            edge,
        } => {
            let current = workspace.diagram(project, diagram)?;
            let edited = workspace.delete_edge(&current, edge)?;
            workspace.save_diagram(&edited)?;
            writeln!(out, "{edge}")?;
        }
    }
    Ok(())
}

fn execute_plan(
    workspace: &Workspace,
    plan: DeletionPlan,
    confirmed: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    writeln!(out, "{plan}")?;
    if plan.is_noop() {
        return Ok(());
    }
    if !confirmed {
        return Err(CliError::NotConfirmed);
    }
    workspace.delete(plan.confirm())?;
    writeln!(out, "deleted")?;
    Ok(())
}
