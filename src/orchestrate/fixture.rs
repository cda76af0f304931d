// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use super::RenderSurface;
use crate::layout::{ElementTag, LayoutOffsets, MeasurementProvider, Rect};

#[derive(Debug, Default)]
struct FixtureState {
    // Geometry as laid out with zero offsets.
    base: BTreeMap<ElementTag, Rect>,
    applied: LayoutOffsets,
    paints: Vec<LayoutOffsets>,
    hold: bool,
    held: Vec<oneshot::Sender<()>>,
    detached: bool,
}

/// An in-memory [`RenderSurface`] backed by injected rectangles.
///
/// Measured rects are the injected ones shifted by the applied offsets: markers move with
/// `markers`, panels with `panels`, and both with `top_clearance`. The container stays put.
/// Clones share state, so a test can keep a handle while the orchestrator owns another.
#[derive(Debug, Clone, Default)]
pub struct FixtureSurface {
    inner: Arc<Mutex<FixtureState>>,
}

impl FixtureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rects(rects: impl IntoIterator<Item = (ElementTag, Rect)>) -> Self {
        let surface = Self::new();
        surface.lock().base.extend(rects);
        surface
    }

    pub fn set_rect(&self, tag: ElementTag, rect: Rect) {
        self.lock().base.insert(tag, rect);
    }

    pub fn remove_rect(&self, tag: &ElementTag) -> Option<Rect> {
        self.lock().base.remove(tag)
    }

    pub fn applied_offsets(&self) -> LayoutOffsets {
        self.lock().applied
    }

    /// Every offset set handed to [`RenderSurface::request_repaint`], oldest first.
    pub fn paints(&self) -> Vec<LayoutOffsets> {
        self.lock().paints.clone()
    }

    /// While held, repaints are recorded but not confirmed. Releasing confirms every held one.
    pub fn hold_repaints(&self, hold: bool) {
        let mut state = self.lock();
        state.hold = hold;
        if !hold {
            for tx in state.held.drain(..) {
                let _ = tx.send(());
            }
        }
    }

    pub fn held_repaints(&self) -> usize {
        self.lock().held.len()
    }

    /// Simulates the view unmounting: repaints are never confirmed from now on.
    pub fn detach(&self) {
        let mut state = self.lock();
        state.detached = true;
        state.held.clear();
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MeasurementProvider for FixtureSurface {
    fn rect(&self, tag: &ElementTag) -> Option<Rect> {
        let state = self.lock();
        let rect = state.base.get(tag).copied()?;
        let offsets = state.applied;
        Some(match tag {
            ElementTag::Container => rect,
            ElementTag::Marker(_) => rect.translate_y(offsets.markers + offsets.top_clearance),
            ElementTag::Panel(_) | ElementTag::VisiblePanel => {
                rect.translate_y(offsets.panels + offsets.top_clearance)
            }
        })
    }
}

impl RenderSurface for FixtureSurface {
    fn request_repaint(&mut self, offsets: LayoutOffsets) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.lock();
        state.applied = offsets;
        state.paints.push(offsets);
        if state.detached {
            drop(tx);
        } else if state.hold {
            state.held.push(tx);
        } else {
            let _ = tx.send(());
        }
        rx
    }
}
