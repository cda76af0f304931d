// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout geometry for the diagram.
//!
//! Everything here is a function of measured rectangles: connector endpoints, the marker/panel
//! alignment offsets and the top clearance. Measuring itself goes through
//! [`MeasurementProvider`], so the math runs the same against a live view or injected fixtures.

use serde::Serialize;

pub mod alignment;
pub mod connectors;
pub mod geometry;

pub use alignment::{
    align_centers, measure_alignment, measure_top_clearance, top_clearance, Alignment,
    LayoutOffsets,
};
pub use connectors::{compute_connectors, ConnectorPath, Connectors};
pub use geometry::{ElementTag, MeasurementProvider, MeasurementUnavailable, Point, Rect};

/// Derived layout the view consumes: group offsets plus connector lines.
///
/// Always replaced wholesale; a pass that cannot measure leaves the previous value in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutValues {
    pub offsets: LayoutOffsets,
    pub connectors: Connectors,
}
