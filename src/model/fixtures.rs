// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::catalog::{Catalog, Category, MarkerAnchor, Rgb, Subcategory};
use super::ids::{CategoryId, SubcategoryId};

pub(crate) fn cid(value: &str) -> CategoryId {
    CategoryId::new(value).expect("category id")
}

pub(crate) fn sid(value: &str) -> SubcategoryId {
    SubcategoryId::new(value).expect("subcategory id")
}

pub(crate) fn ocular_surface() -> Arc<Catalog> {
    Arc::new(Catalog::ocular_surface())
}

/// Two categories with centered anchors; keeps geometry arithmetic easy to follow in tests.
pub(crate) fn two_category_grid() -> Arc<Catalog> {
    let anchor = MarkerAnchor::fraction(0.5, 0.5);
    let catalog = Catalog::new(vec![
        Category::new(
            cid("left"),
            "LEFT",
            Rgb::new(0xFF, 0x00, 0x00),
            anchor,
            vec![Subcategory::new(sid("l1"), "L1"), Subcategory::new(sid("l2"), "L2")],
        ),
        Category::new(
            cid("right"),
            "RIGHT",
            Rgb::new(0x00, 0x00, 0xFF),
            anchor,
            vec![
                Subcategory::new(sid("r1"), "R1"),
                Subcategory::new(sid("r2"), "R2"),
                Subcategory::new(sid("r3"), "R3"),
            ],
        ),
    ])
    .expect("catalog");
    Arc::new(catalog)
}
