// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lacrima: navigation and layout core for an interactive dry-eye classification diagram.
//!
//! - [`model`]: the category/subcategory catalog.
//! - [`nav`]: the selection state machine and its publisher.
//! - [`layout`]: pure geometry (alignment, top clearance, connectors).
//! - [`orchestrate`]: sequencing of layout passes around repaints.
//! - [`view`]: read-only queries the presentation layer renders from.

pub mod config;
pub mod layout;
pub mod model;
pub mod nav;
pub mod orchestrate;
pub mod view;
