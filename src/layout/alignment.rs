// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::geometry::{ElementTag, MeasurementProvider, MeasurementUnavailable, Rect};
use crate::model::{Catalog, CategoryId, MarkerAnchor};

/// Vertical offsets the view applies to keep markers and panels lined up.
///
/// All values are non-negative; content is only ever pushed down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutOffsets {
    /// Applied to the panel group.
    pub panels: f64,
    /// Applied to the marker group.
    pub markers: f64,
    /// Extra space reserved above the content area.
    pub top_clearance: f64,
}

impl LayoutOffsets {
    pub const ZERO: Self = Self { panels: 0.0, markers: 0.0, top_clearance: 0.0 };
}

/// Offsets that make a reference marker and panel share a vertical center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Alignment {
    pub panels: f64,
    pub markers: f64,
}

impl Alignment {
    pub fn into_offsets(self, top_clearance: f64) -> LayoutOffsets {
        LayoutOffsets { panels: self.panels, markers: self.markers, top_clearance }
    }
}

/// Pushes whichever group sits higher down by the center difference; the other stays at zero.
///
/// Both rects must be measured with zero offsets applied.
pub fn align_centers(marker: &Rect, anchor: MarkerAnchor, panel: &Rect) -> Alignment {
    let marker_center = marker.marker_anchor(anchor).y;
    let panel_center = panel.center_y();
    let delta = marker_center - panel_center;

    if delta > 0.0 {
        Alignment { panels: delta, markers: 0.0 }
    } else {
        Alignment { panels: 0.0, markers: -delta }
    }
}

/// Measures the reference category's marker/panel pair and aligns them.
pub fn measure_alignment<P>(
    catalog: &Catalog,
    reference: &CategoryId,
    provider: &P,
) -> Result<Alignment, MeasurementUnavailable>
where
    P: MeasurementProvider + ?Sized,
{
    let marker_tag = ElementTag::Marker(reference.clone());
    let Some(category) = catalog.category(reference) else {
        return Err(MeasurementUnavailable { tag: marker_tag });
    };
    let marker = provider.measure(&marker_tag)?;
    let panel = provider.measure(&ElementTag::Panel(reference.clone()))?;
    Ok(align_centers(&marker, category.marker_anchor(), &panel))
}

/// How far `panel_top` pokes above `boundary`; zero when it does not.
pub fn top_clearance(panel_top: f64, boundary: f64) -> f64 {
    (boundary - panel_top).max(0.0)
}

/// Measures the visible panel against the container's padding boundary.
pub fn measure_top_clearance<P>(provider: &P, padding_top: f64) -> Result<f64, MeasurementUnavailable>
where
    P: MeasurementProvider + ?Sized,
{
    let container = provider.measure(&ElementTag::Container)?;
    let panel = provider.measure(&ElementTag::VisiblePanel)?;
    Ok(top_clearance(panel.top(), container.top() + padding_top))
}
