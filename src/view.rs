// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only view helpers derived from navigation state.
//!
//! The presentation layer asks these questions when rendering; none of them mutate anything.

use crate::model::{CategoryId, SubcategoryId};
use crate::nav::{NavPhase, NavigationState};

/// How a category's connector ends at its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// The category itself is selected; the line ends in a bracket spanning its subcategories.
    Bracket,
    /// A single subcategory is selected; the line ends in a dot at that entry.
    Dot,
}

#[derive(Debug, Clone, Copy)]
pub struct DiagramView<'a> {
    state: &'a NavigationState,
}

impl<'a> DiagramView<'a> {
    pub fn new(state: &'a NavigationState) -> Self {
        Self { state }
    }

    /// The usage panel shows while nothing is selected.
    pub fn shows_overview(&self) -> bool {
        self.state.phase() == NavPhase::Overview
    }

    pub fn shows_category(&self, category_id: &CategoryId) -> bool {
        self.state.selected_category() == Some(category_id)
    }

    pub fn is_subcategory_visible(&self, subcategory_id: &SubcategoryId) -> bool {
        self.state.active_subcategory() == Some(subcategory_id)
    }

    pub fn connector_terminal(&self, category_id: &CategoryId) -> Option<Terminal> {
        if !self.shows_category(category_id) {
            return None;
        }
        match self.state.phase() {
            NavPhase::CategorySelected => Some(Terminal::Bracket),
            NavPhase::SubcategorySelected => Some(Terminal::Dot),
            NavPhase::Overview => None,
        }
    }

    /// Heading of the visible panel: the subcategory title, else the category title.
    pub fn active_title(&self) -> Option<&'a str> {
        let catalog = self.state.catalog();
        if let Some(subcategory_id) = self.state.active_subcategory() {
            return catalog.subcategory(subcategory_id).map(|s| s.title());
        }
        self.state.selected().map(|c| c.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{cid, ocular_surface, sid};

    #[test]
    fn overview_shows_usage_panel_and_no_terminals() {
        let state = NavigationState::new(ocular_surface());
        let view = DiagramView::new(&state);

        assert!(view.shows_overview());
        assert_eq!(view.connector_terminal(&cid("tear")), None);
        assert_eq!(view.active_title(), None);
    }

    #[test]
    fn category_selection_ends_in_bracket() {
        let mut state = NavigationState::new(ocular_surface());
        state.select_category(&cid("eyelid")).unwrap();
        let view = DiagramView::new(&state);

        assert!(!view.shows_overview());
        assert!(view.shows_category(&cid("eyelid")));
        assert_eq!(view.connector_terminal(&cid("eyelid")), Some(Terminal::Bracket));
        assert_eq!(view.connector_terminal(&cid("tear")), None);
        assert_eq!(view.active_title(), Some("EYELID ANOMALIES"));
    }

    #[test]
    fn subcategory_selection_ends_in_dot() {
        let mut state = NavigationState::new(ocular_surface());
        state.select_category(&cid("ocular")).unwrap();
        state.select_subcategory(&sid("ocular-surface-cellular")).unwrap();
        let view = DiagramView::new(&state);

        assert_eq!(view.connector_terminal(&cid("ocular")), Some(Terminal::Dot));
        assert!(view.is_subcategory_visible(&sid("ocular-surface-cellular")));
        assert!(!view.is_subcategory_visible(&sid("neural-dysfunction")));
        assert_eq!(view.active_title(), Some("CELLULAR DAMAGE"));
    }
}
