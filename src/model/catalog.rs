// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, SubcategoryId};

/// A display color in `#RRGGBB` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError {
    raw: String,
}

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?} (expected #RRGGBB)", self.raw)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError { raw: s.to_owned() };
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl JsonSchema for Rgb {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Rgb")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": "^#[0-9A-Fa-f]{6}$"
        })
    }
}

/// Horizontal part of a marker anchor.
///
/// Marker shapes differ per category, so the connector leaves each diamond at a different spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnchorX {
    /// Fraction of the marker width, measured from its left edge.
    Fraction(f64),
    /// Fixed distance in from the marker's right edge.
    InsetFromRight(f64),
}

/// Where a connector attaches to a category marker, relative to the marker's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarkerAnchor {
    pub x: AnchorX,
    /// Fraction of the marker height, measured from its top edge.
    pub y: f64,
}

impl MarkerAnchor {
    pub const fn fraction(x: f64, y: f64) -> Self {
        Self { x: AnchorX::Fraction(x), y }
    }

    pub const fn inset_from_right(inset: f64, y: f64) -> Self {
        Self { x: AnchorX::InsetFromRight(inset), y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Subcategory {
    id: SubcategoryId,
    title: String,
}

impl Subcategory {
    pub fn new(id: SubcategoryId, title: impl Into<String>) -> Self {
        Self { id, title: title.into() }
    }

    pub fn id(&self) -> &SubcategoryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A top-level diagram branch: one diamond marker plus its ordered subcategory panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    id: CategoryId,
    title: String,
    color: Rgb,
    marker_anchor: MarkerAnchor,
    subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(
        id: CategoryId,
        title: impl Into<String>,
        color: Rgb,
        marker_anchor: MarkerAnchor,
        subcategories: Vec<Subcategory>,
    ) -> Self {
        Self { id, title: title.into(), color, marker_anchor, subcategories }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn marker_anchor(&self) -> MarkerAnchor {
        self.marker_anchor
    }

    /// Subcategories in navigation order.
    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    pub fn contains(&self, subcategory_id: &SubcategoryId) -> bool {
        self.subcategories.iter().any(|s| s.id() == subcategory_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    DuplicateCategory { category_id: CategoryId },
    EmptyCategory { category_id: CategoryId },
    DuplicateSubcategory { subcategory_id: SubcategoryId },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("catalog must declare at least one category"),
            Self::DuplicateCategory { category_id } => {
                write!(f, "category {category_id} is declared more than once")
            }
            Self::EmptyCategory { category_id } => {
                write!(f, "category {category_id} has no subcategories")
            }
            Self::DuplicateSubcategory { subcategory_id } => {
                write!(f, "subcategory {subcategory_id} is declared more than once")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Wire form of a [`Catalog`], validated on conversion.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CatalogDef {
    pub categories: Vec<Category>,
}

/// The fixed set of categories and their ordered subcategories.
///
/// Immutable once built; membership and ordering are validated up front so navigation can rely
/// on every subcategory belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "CatalogDef")]
pub struct Catalog {
    categories: Vec<Category>,
    // subcategory -> (category index, position within that category)
    placements: BTreeMap<SubcategoryId, (usize, usize)>,
}

impl TryFrom<CatalogDef> for Catalog {
    type Error = CatalogError;

    fn try_from(value: CatalogDef) -> Result<Self, Self::Error> {
        Self::new(value.categories)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ocular_surface()
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_categories = BTreeSet::new();
        let mut placements = BTreeMap::new();
        for (category_index, category) in categories.iter().enumerate() {
            if !seen_categories.insert(category.id().clone()) {
                return Err(CatalogError::DuplicateCategory { category_id: category.id().clone() });
            }
            if category.subcategories().is_empty() {
                return Err(CatalogError::EmptyCategory { category_id: category.id().clone() });
            }
            for (position, subcategory) in category.subcategories().iter().enumerate() {
                let previous =
                    placements.insert(subcategory.id().clone(), (category_index, position));
                if previous.is_some() {
                    return Err(CatalogError::DuplicateSubcategory {
                        subcategory_id: subcategory.id().clone(),
                    });
                }
            }
        }

        Ok(Self { categories, placements })
    }

    /// The built-in tear-film / ocular-surface classification.
    pub fn ocular_surface() -> Self {
        let sub = |id: &'static str, title: &str| {
            Subcategory::new(SubcategoryId::from_static(id), title)
        };

        let categories = vec![
            Category::new(
                CategoryId::from_static("tear"),
                "TEAR FILM DEFICIENCIES",
                Rgb::new(0x3A, 0xAD, 0xE1),
                MarkerAnchor::fraction(0.75, 0.24),
                vec![
                    sub("lipid", "LIPID"),
                    sub("aqueous", "AQUEOUS"),
                    sub("mucin-glycocalyx", "MUCIN GLYCOCALYX"),
                ],
            ),
            Category::new(
                CategoryId::from_static("eyelid"),
                "EYELID ANOMALIES",
                Rgb::new(0x52, 0xA5, 0xA4),
                MarkerAnchor::inset_from_right(10.0, 0.47),
                vec![
                    sub("blink-lid-closure", "BLINK / LID CLOSURE"),
                    sub("lid-margin", "LID MARGIN"),
                ],
            ),
            Category::new(
                CategoryId::from_static("ocular"),
                "OCULAR SURFACE ABNORMALITIES",
                Rgb::new(0x7B, 0x52, 0x95),
                MarkerAnchor::fraction(0.74, 0.72),
                vec![
                    sub("anatomical-misalignment", "ANATOMICAL MISALIGNMENT"),
                    sub("neural-dysfunction", "NEURAL DYSFUNCTION"),
                    sub("ocular-surface-cellular", "CELLULAR DAMAGE"),
                    sub("primary-inflammation", "INFLAMMATION"),
                ],
            ),
        ];

        match Self::new(categories) {
            Ok(catalog) => catalog,
            Err(err) => unreachable!("built-in catalog is valid: {err}"),
        }
    }

    /// Categories in declared order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == category_id)
    }

    pub fn subcategory(&self, subcategory_id: &SubcategoryId) -> Option<&Subcategory> {
        let &(category_index, position) = self.placements.get(subcategory_id)?;
        self.categories.get(category_index)?.subcategories().get(position)
    }

    /// The category a subcategory belongs to.
    pub fn category_of(&self, subcategory_id: &SubcategoryId) -> Option<&Category> {
        let &(category_index, _) = self.placements.get(subcategory_id)?;
        self.categories.get(category_index)
    }

    /// Returns `(index, len)` of the subcategory within its category's ordered list.
    pub fn position(&self, subcategory_id: &SubcategoryId) -> Option<(usize, usize)> {
        let &(category_index, position) = self.placements.get(subcategory_id)?;
        let len = self.categories.get(category_index)?.subcategories().len();
        Some((position, len))
    }
}
