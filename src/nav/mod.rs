// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation state for the diagram.
//!
//! [`NavigationState`] is the pure state machine (overview -> category -> subcategory) and
//! [`Navigator`] owns one, publishing every change to view subscribers and the layout pipeline.

use std::fmt;
use std::sync::Arc;

use crate::model::{Catalog, Category, CategoryId, SubcategoryId};

mod navigator;

pub use navigator::{NavCommand, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Overview,
    CategorySelected,
    SubcategorySelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownCategory {
        category_id: CategoryId,
    },
    InvalidSelection {
        subcategory_id: SubcategoryId,
        selected_category: Option<CategoryId>,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { category_id } => write!(f, "unknown category {category_id}"),
            Self::InvalidSelection { subcategory_id, selected_category: None } => {
                write!(f, "cannot select subcategory {subcategory_id} without a selected category")
            }
            Self::InvalidSelection { subcategory_id, selected_category: Some(category_id) } => {
                write!(f, "subcategory {subcategory_id} does not belong to category {category_id}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Previous,
    Next,
}

/// Which category/subcategory the diagram currently shows.
///
/// Invariant: an active subcategory always belongs to the selected category. Every transition
/// that changes state bumps [`NavigationState::rev`]; no-op transitions leave it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    catalog: Arc<Catalog>,
    selected_category: Option<CategoryId>,
    active_subcategory: Option<SubcategoryId>,
    rev: u64,
}

impl NavigationState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, selected_category: None, active_subcategory: None, rev: 0 }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selected_category(&self) -> Option<&CategoryId> {
        self.selected_category.as_ref()
    }

    pub fn active_subcategory(&self) -> Option<&SubcategoryId> {
        self.active_subcategory.as_ref()
    }

    pub fn phase(&self) -> NavPhase {
        match (&self.selected_category, &self.active_subcategory) {
            (None, _) => NavPhase::Overview,
            (Some(_), None) => NavPhase::CategorySelected,
            (Some(_), Some(_)) => NavPhase::SubcategorySelected,
        }
    }

    pub fn selected(&self) -> Option<&Category> {
        self.catalog.category(self.selected_category.as_ref()?)
    }

    /// True when nothing is active or the active subcategory is first in its category.
    pub fn is_first(&self) -> bool {
        self.active_position().map_or(true, |(index, _)| index == 0)
    }

    /// True when nothing is active or the active subcategory is last in its category.
    pub fn is_last(&self) -> bool {
        self.active_position().map_or(true, |(index, len)| index + 1 >= len)
    }

    /// `(index, len)` of the active subcategory within its category.
    pub fn active_position(&self) -> Option<(usize, usize)> {
        self.catalog.position(self.active_subcategory.as_ref()?)
    }

    /// Selects a category. Switching categories (or reselecting the current one) drops the
    /// active subcategory.
    ///
    /// Returns whether the state changed.
    pub fn select_category(&mut self, category_id: &CategoryId) -> Result<bool, SelectionError> {
        if self.catalog.category(category_id).is_none() {
            return Err(SelectionError::UnknownCategory { category_id: category_id.clone() });
        }

        if self.selected_category.as_ref() == Some(category_id) && self.active_subcategory.is_none()
        {
            return Ok(false);
        }

        self.selected_category = Some(category_id.clone());
        self.active_subcategory = None;
        self.bump_rev();
        Ok(true)
    }

    /// Activates a subcategory of the selected category.
    ///
    /// Fails with [`SelectionError::InvalidSelection`] (state unchanged) when no category is
    /// selected or the subcategory belongs elsewhere.
    pub fn select_subcategory(
        &mut self,
        subcategory_id: &SubcategoryId,
    ) -> Result<bool, SelectionError> {
        let belongs = self.selected().is_some_and(|category| category.contains(subcategory_id));
        if !belongs {
            return Err(SelectionError::InvalidSelection {
                subcategory_id: subcategory_id.clone(),
                selected_category: self.selected_category.clone(),
            });
        }

        if self.active_subcategory.as_ref() == Some(subcategory_id) {
            return Ok(false);
        }

        self.active_subcategory = Some(subcategory_id.clone());
        self.bump_rev();
        Ok(true)
    }

    /// Returns to the overview. Returns whether the state changed.
    pub fn clear_selection(&mut self) -> bool {
        if self.selected_category.is_none() && self.active_subcategory.is_none() {
            return false;
        }
        self.selected_category = None;
        self.active_subcategory = None;
        self.bump_rev();
        true
    }

    pub fn navigate_previous(&mut self) -> bool {
        self.step(Step::Previous)
    }

    pub fn navigate_next(&mut self) -> bool {
        self.step(Step::Next)
    }

    fn step(&mut self, step: Step) -> bool {
        let Some(target) = self.sibling(step) else {
            return false;
        };
        self.active_subcategory = Some(target);
        self.bump_rev();
        true
    }

    fn sibling(&self, step: Step) -> Option<SubcategoryId> {
        let active = self.active_subcategory.as_ref()?;
        let category = self.catalog.category_of(active)?;
        let (index, len) = self.catalog.position(active)?;
        let target = match step {
            Step::Previous => index.checked_sub(1)?,
            Step::Next if index + 1 < len => index + 1,
            Step::Next => return None,
        };
        category.subcategories().get(target).map(|s| s.id().clone())
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
