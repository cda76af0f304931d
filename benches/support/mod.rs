// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG) and criterion settings.

use std::collections::BTreeMap;
use std::time::Duration;

use criterion::Criterion;

use lacrima::layout::{ElementTag, Rect};
use lacrima::model::{
    Catalog, Category, CategoryId, MarkerAnchor, Rgb, Subcategory, SubcategoryId,
};

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let sample_size = env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// The built-in three-category diagram.
    Builtin,
    /// 24 categories with 12 subcategories each.
    Wide,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Wide => "wide",
        }
    }
}

pub fn catalog(case: Case) -> Catalog {
    match case {
        Case::Builtin => Catalog::ocular_surface(),
        Case::Wide => synthetic_catalog(24, 12),
    }
}

fn synthetic_catalog(categories: usize, subcategories: usize) -> Catalog {
    let categories = (0..categories)
        .map(|c| {
            let subs = (0..subcategories)
                .map(|s| {
                    let id = SubcategoryId::new(format!("bench-{c:02}-{s:02}")).expect("sub id");
                    Subcategory::new(id, format!("Bench {c}.{s}"))
                })
                .collect();
            let color = Rgb::new((c * 10) as u8, 0x80, 0xC0);
            Category::new(
                CategoryId::new(format!("bench-{c:02}")).expect("category id"),
                format!("Bench {c}"),
                color,
                MarkerAnchor::fraction(0.75, 0.25),
                subs,
            )
        })
        .collect();
    Catalog::new(categories).expect("synthetic catalog")
}

/// Markers in a left column, panels to the right, one row per category.
pub fn rects(catalog: &Catalog) -> BTreeMap<ElementTag, Rect> {
    let mut rects = BTreeMap::new();
    rects.insert(ElementTag::Container, Rect::new(0.0, 0.0, 1280.0, 240.0 * 32.0));
    for (index, category) in catalog.categories().iter().enumerate() {
        let row = 120.0 + index as f64 * 240.0;
        rects.insert(ElementTag::Marker(category.id().clone()), Rect::new(40.0, row, 160.0, 160.0));
        rects.insert(ElementTag::Panel(category.id().clone()), Rect::new(512.0, row - 20.0, 704.0, 180.0));
    }
    rects.insert(ElementTag::VisiblePanel, Rect::new(512.0, 10.0, 704.0, 420.0));
    rects
}

pub fn checksum_f64(acc: u64, value: f64) -> u64 {
    acc.wrapping_mul(131).wrapping_add(value.to_bits())
}
