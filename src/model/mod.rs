// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog data model.
//!
//! Categories own an ordered list of subcategories; both are immutable once the catalog is built.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;

pub use catalog::{
    AnchorX, Catalog, CatalogDef, CatalogError, Category, MarkerAnchor, ParseRgbError, Rgb,
    Subcategory,
};
pub use ids::{CategoryId, Id, IdError, SubcategoryId};
