// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Portable diagram formats.
//!
//! Currently this module covers the JSON export/import document.

pub mod document;

pub use document::{
    export, export_file_name, import, DiagramDocument, DiagramFragment, DocumentNode,
};
