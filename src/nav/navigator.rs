// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::{NavigationState, SelectionError};
use crate::model::{Catalog, CategoryId, SubcategoryId};
use crate::orchestrate::LayoutTriggers;

/// A navigation command issued by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    SelectCategory(CategoryId),
    SelectSubcategory(SubcategoryId),
    Previous,
    Next,
    Clear,
}

/// Owns the session's [`NavigationState`] and fans out changes.
///
/// Subscribers see every state that differs from the previous one; when wired to a layout
/// orchestrator each change also requests a structural layout pass.
#[derive(Debug)]
pub struct Navigator {
    state: NavigationState,
    published: watch::Sender<NavigationState>,
    layout: Option<LayoutTriggers>,
}

impl Navigator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let state = NavigationState::new(catalog);
        let (published, _) = watch::channel(state.clone());
        Self { state, published, layout: None }
    }

    pub fn with_layout_triggers(mut self, triggers: LayoutTriggers) -> Self {
        self.layout = Some(triggers);
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.published.subscribe()
    }

    pub fn apply(&mut self, command: &NavCommand) -> Result<(), SelectionError> {
        match command {
            NavCommand::SelectCategory(category_id) => self.select_category(category_id),
            NavCommand::SelectSubcategory(subcategory_id) => {
                self.select_subcategory(subcategory_id)
            }
            NavCommand::Previous => {
                self.navigate_previous();
                Ok(())
            }
            NavCommand::Next => {
                self.navigate_next();
                Ok(())
            }
            NavCommand::Clear => {
                self.clear_selection();
                Ok(())
            }
        }
    }

    pub fn select_category(&mut self, category_id: &CategoryId) -> Result<(), SelectionError> {
        let changed = self.state.select_category(category_id)?;
        self.publish_if(changed);
        Ok(())
    }

    pub fn select_subcategory(
        &mut self,
        subcategory_id: &SubcategoryId,
    ) -> Result<(), SelectionError> {
        let changed = self.state.select_subcategory(subcategory_id)?;
        self.publish_if(changed);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        let changed = self.state.clear_selection();
        self.publish_if(changed);
    }

    pub fn navigate_previous(&mut self) {
        let changed = self.state.navigate_previous();
        self.publish_if(changed);
    }

    pub fn navigate_next(&mut self) {
        let changed = self.state.navigate_next();
        self.publish_if(changed);
    }

    fn publish_if(&mut self, changed: bool) {
        if !changed {
            return;
        }
        trace!(
            rev = self.state.rev(),
            category = ?self.state.selected_category(),
            subcategory = ?self.state.active_subcategory(),
            "navigation changed"
        );
        self.published.send_replace(self.state.clone());
        if let Some(layout) = &self.layout {
            layout.structural();
        }
    }
}
