// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Repositories over the keyed store.
//!
//! Each call reads the full collection, edits it and writes it back. Callers get new values;
//! nothing is cached between calls.

pub mod diagrams;
pub mod projects;

pub use diagrams::DiagramRepository;
pub use projects::ProjectRepository;

use crate::error::ValidationError;

/// Trimmed `name`, or [`ValidationError::EmptyName`] when nothing is left.
pub(crate) fn require_name(field: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(trimmed.to_owned())
}
