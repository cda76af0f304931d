// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AnchorX, CategoryId, MarkerAnchor};

/// A point in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Re-expresses this point with `origin` as `(0, 0)`.
    pub fn relative_to(self, origin: Point) -> Self {
        Self { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// A measured bounding box in viewport units (`y` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn translate_y(self, dy: f64) -> Self {
        Self { y: self.y + dy, ..self }
    }

    /// Where a connector leaves a marker with this bounding box.
    pub fn marker_anchor(&self, anchor: MarkerAnchor) -> Point {
        let x = match anchor.x {
            AnchorX::Fraction(fraction) => self.left() + self.width * fraction,
            AnchorX::InsetFromRight(inset) => self.right() - inset,
        };
        Point::new(x, self.top() + self.height * anchor.y)
    }

    /// Where a connector enters a panel: the vertical midpoint of its left edge.
    pub fn panel_anchor(&self) -> Point {
        Point::new(self.left(), self.center_y())
    }
}

/// Names a rendered element the layout engine reads geometry from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementTag {
    /// The element connector coordinates are expressed against.
    Container,
    Marker(CategoryId),
    Panel(CategoryId),
    /// Whichever content panel is currently shown.
    VisiblePanel,
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::Marker(category_id) => write!(f, "marker:{category_id}"),
            Self::Panel(category_id) => write!(f, "panel:{category_id}"),
            Self::VisiblePanel => f.write_str("visible-panel"),
        }
    }
}

/// A required element has no geometry yet (not mounted, or not painted).
///
/// Expected during first paint and rapid navigation; callers skip the pass rather than fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementUnavailable {
    pub tag: ElementTag,
}

impl fmt::Display for MeasurementUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no geometry for {}", self.tag)
    }
}

impl std::error::Error for MeasurementUnavailable {}

/// Read access to the rendered geometry of tagged elements.
pub trait MeasurementProvider {
    fn rect(&self, tag: &ElementTag) -> Option<Rect>;

    fn measure(&self, tag: &ElementTag) -> Result<Rect, MeasurementUnavailable> {
        self.rect(tag).ok_or_else(|| MeasurementUnavailable { tag: tag.clone() })
    }
}

impl<T: MeasurementProvider + ?Sized> MeasurementProvider for &T {
    fn rect(&self, tag: &ElementTag) -> Option<Rect> {
        (**self).rect(tag)
    }
}

impl MeasurementProvider for BTreeMap<ElementTag, Rect> {
    fn rect(&self, tag: &ElementTag) -> Option<Rect> {
        self.get(tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_anchor_resolves_fraction_and_inset() {
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);

        let fraction = rect.marker_anchor(MarkerAnchor::fraction(0.75, 0.25));
        assert_eq!(fraction, Point::new(250.0, 75.0));

        let inset = rect.marker_anchor(MarkerAnchor::inset_from_right(10.0, 0.5));
        assert_eq!(inset, Point::new(290.0, 100.0));
    }

    #[test]
    fn panel_anchor_is_left_edge_midpoint() {
        let rect = Rect::new(400.0, 20.0, 300.0, 60.0);
        assert_eq!(rect.panel_anchor(), Point::new(400.0, 50.0));
    }

    #[test]
    fn measure_names_missing_tag() {
        let rects: BTreeMap<ElementTag, Rect> = BTreeMap::new();
        let err = rects.measure(&ElementTag::VisiblePanel).unwrap_err();
        assert_eq!(err.tag, ElementTag::VisiblePanel);
        assert_eq!(err.to_string(), "no geometry for visible-panel");
    }
}
