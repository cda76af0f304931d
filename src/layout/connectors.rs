// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use smallvec::SmallVec;

use super::geometry::{ElementTag, MeasurementProvider, MeasurementUnavailable, Point};
use crate::model::{Catalog, CategoryId, Rgb};

/// A straight line from a category marker to its panel, in container coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorPath {
    pub id: CategoryId,
    pub color: Rgb,
    pub start: Point,
    pub end: Point,
}

/// One connector per category, in catalog order.
pub type Connectors = SmallVec<[ConnectorPath; 3]>;

/// Computes every category's connector from the current geometry.
///
/// All-or-nothing: if any marker, panel or the container is missing, nothing is returned and
/// the caller keeps its previous connectors.
pub fn compute_connectors<P>(
    catalog: &Catalog,
    provider: &P,
) -> Result<Connectors, MeasurementUnavailable>
where
    P: MeasurementProvider + ?Sized,
{
    let origin = provider.measure(&ElementTag::Container)?.origin();

    let mut connectors = Connectors::with_capacity(catalog.categories().len());
    for category in catalog.categories() {
        let marker = provider.measure(&ElementTag::Marker(category.id().clone()))?;
        let panel = provider.measure(&ElementTag::Panel(category.id().clone()))?;

        connectors.push(ConnectorPath {
            id: category.id().clone(),
            color: category.color(),
            start: marker.marker_anchor(category.marker_anchor()).relative_to(origin),
            end: panel.panel_anchor().relative_to(origin),
        });
    }

    Ok(connectors)
}
