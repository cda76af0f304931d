// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout passes sequenced around repaints.
//!
//! The rendering surface is cooperative: offsets are handed to it, and measurement only
//! resumes once it reports the paint landed. A structural pass runs
//! reset -> repaint -> align -> repaint -> clearance -> repaint -> connectors; a resize pass
//! only recomputes connectors.
//!
//! Passes never overlap. A structural trigger that arrives mid-pass cancels the pass and starts
//! over from the reset; resize triggers are debounced until the viewport settles.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::config::LayoutConfig;
use crate::layout::{
    compute_connectors, measure_alignment, measure_top_clearance, LayoutOffsets, LayoutValues,
    MeasurementProvider, MeasurementUnavailable,
};
use crate::model::Catalog;

mod fixture;

pub use fixture::FixtureSurface;

/// A view the orchestrator can measure and reposition.
pub trait RenderSurface: MeasurementProvider {
    /// Applies `offsets` and schedules a repaint.
    ///
    /// The receiver completes once the paint has landed and geometry reflects the new offsets.
    /// Dropping the sender instead means the view went away.
    fn request_repaint(&mut self, offsets: LayoutOffsets) -> oneshot::Receiver<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTrigger {
    /// Navigation changed what is shown.
    Structural,
    /// The viewport changed size.
    Resize,
}

/// Sending half of the trigger channel; cheap to clone into whatever observes the view.
#[derive(Debug, Clone)]
pub struct LayoutTriggers {
    tx: mpsc::UnboundedSender<LayoutTrigger>,
}

impl LayoutTriggers {
    pub fn structural(&self) {
        self.send(LayoutTrigger::Structural);
    }

    pub fn resize(&self) {
        self.send(LayoutTrigger::Resize);
    }

    fn send(&self, trigger: LayoutTrigger) {
        if self.tx.send(trigger).is_err() {
            debug!(?trigger, "layout orchestrator stopped; dropping trigger");
        }
    }
}

pub fn layout_channel() -> (LayoutTriggers, mpsc::UnboundedReceiver<LayoutTrigger>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LayoutTriggers { tx }, rx)
}

/// Why a pass left the published layout untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unmeasured(MeasurementUnavailable),
    SurfaceDetached,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmeasured(err) => write!(f, "{err}"),
            Self::SurfaceDetached => f.write_str("surface detached before repaint completed"),
        }
    }
}

impl From<MeasurementUnavailable> for SkipReason {
    fn from(value: MeasurementUnavailable) -> Self {
        Self::Unmeasured(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed,
    Skipped(SkipReason),
}

impl PassOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    pub structural_completed: u64,
    pub structural_skipped: u64,
    pub structural_restarted: u64,
    pub resize_completed: u64,
    pub resize_skipped: u64,
}

/// Owns the derived layout and the only code path that updates it.
pub struct LayoutOrchestrator<S> {
    surface: S,
    catalog: Arc<Catalog>,
    config: LayoutConfig,
    published: watch::Sender<LayoutValues>,
    stats: PassStats,
    pass_seq: u64,
}

impl<S: fmt::Debug> fmt::Debug for LayoutOrchestrator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutOrchestrator")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .field("pass_seq", &self.pass_seq)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> LayoutOrchestrator<S> {
    pub fn new(surface: S, catalog: Arc<Catalog>, config: LayoutConfig) -> Self {
        let (published, _) = watch::channel(LayoutValues::default());
        Self { surface, catalog, config, published, stats: PassStats::default(), pass_seq: 0 }
    }

    pub fn subscribe(&self) -> watch::Receiver<LayoutValues> {
        self.published.subscribe()
    }

    /// The last successfully computed layout.
    pub fn values(&self) -> LayoutValues {
        self.published.borrow().clone()
    }

    pub fn stats(&self) -> PassStats {
        self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Full re-measure after a navigation change.
    ///
    /// On any missing element the pass stops, the surface gets the previously published
    /// offsets back, and the published values stay exactly as they were.
    pub async fn structural_pass(&mut self) -> PassOutcome {
        self.pass_seq = self.pass_seq.wrapping_add(1);
        let pass = self.pass_seq;
        let prior = self.published.borrow().offsets;

        match self.measure_structural(pass).await {
            Ok(values) => {
                trace!(pass, offsets = ?values.offsets, "layout pass completed");
                self.published.send_replace(values);
                self.stats.structural_completed += 1;
                PassOutcome::Completed
            }
            Err(reason) => {
                debug!(pass, %reason, "layout pass skipped");
                // Nobody waits on this paint; the next trigger re-measures anyway.
                drop(self.surface.request_repaint(prior));
                self.stats.structural_skipped += 1;
                PassOutcome::Skipped(reason)
            }
        }
    }

    async fn measure_structural(&mut self, pass: u64) -> Result<LayoutValues, SkipReason> {
        trace!(pass, "resetting offsets");
        self.repaint(LayoutOffsets::ZERO).await?;

        let alignment =
            measure_alignment(&self.catalog, &self.config.reference_category, &self.surface)?;
        trace!(pass, ?alignment, "applying alignment");
        self.repaint(alignment.into_offsets(0.0)).await?;

        let clearance = measure_top_clearance(&self.surface, self.config.padding_top)?;
        let offsets = alignment.into_offsets(clearance);
        trace!(pass, clearance, "applying top clearance");
        self.repaint(offsets).await?;

        let connectors = compute_connectors(&self.catalog, &self.surface)?;
        Ok(LayoutValues { offsets, connectors })
    }

    async fn repaint(&mut self, offsets: LayoutOffsets) -> Result<(), SkipReason> {
        self.surface.request_repaint(offsets).await.map_err(|_| SkipReason::SurfaceDetached)
    }

    /// Recomputes connectors against the current geometry, keeping the offsets.
    pub fn resize_pass(&mut self) -> PassOutcome {
        match compute_connectors(&self.catalog, &self.surface) {
            Ok(connectors) => {
                self.published.send_modify(|values| values.connectors = connectors);
                self.stats.resize_completed += 1;
                PassOutcome::Completed
            }
            Err(err) => {
                debug!(%err, "resize pass skipped");
                self.stats.resize_skipped += 1;
                PassOutcome::Skipped(err.into())
            }
        }
    }

    /// Drives passes from `triggers` until the channel closes, then hands the orchestrator back.
    pub async fn run(mut self, mut triggers: mpsc::UnboundedReceiver<LayoutTrigger>) -> Self {
        let mut queued = None;
        let mut closed = false;
        // Resizes seen during structural passes; only a completed pass covers them.
        let mut absorbed_resize = false;

        loop {
            let trigger = match queued.take() {
                Some(trigger) => trigger,
                None if closed => break,
                None => match triggers.recv().await {
                    Some(trigger) => trigger,
                    None => break,
                },
            };

            match trigger {
                LayoutTrigger::Structural => {
                    let outcome = {
                        let pass = self.structural_pass();
                        tokio::pin!(pass);
                        loop {
                            tokio::select! {
                                biased;
                                outcome = &mut pass => break Some(outcome),
                                next = triggers.recv(), if !closed => match next {
                                    Some(LayoutTrigger::Structural) => break None,
                                    // Connectors are computed last, after this resize.
                                    Some(LayoutTrigger::Resize) => absorbed_resize = true,
                                    None => closed = true,
                                },
                            }
                        }
                    };
                    match outcome {
                        None => {
                            debug!("navigation changed mid-pass; restarting layout");
                            self.stats.structural_restarted += 1;
                            queued = Some(LayoutTrigger::Structural);
                        }
                        Some(PassOutcome::Completed) => absorbed_resize = false,
                        Some(PassOutcome::Skipped(_)) if absorbed_resize => {
                            debug!("structural pass skipped; replaying absorbed resize");
                            absorbed_resize = false;
                            queued = Some(LayoutTrigger::Resize);
                        }
                        Some(PassOutcome::Skipped(_)) => {}
                    }
                }
                LayoutTrigger::Resize => {
                    let settle = self.config.resize_settle();
                    match settle_resize(&mut triggers, settle, &mut closed).await {
                        Some(superseding) => queued = Some(superseding),
                        None => {
                            self.resize_pass();
                        }
                    }
                }
            }
        }

        self
    }
}

/// Waits until no resize arrived for `settle`.
///
/// Returns a structural trigger that arrived meanwhile; it replaces the pending resize since a
/// structural pass recomputes connectors too.
async fn settle_resize(
    triggers: &mut mpsc::UnboundedReceiver<LayoutTrigger>,
    settle: Duration,
    closed: &mut bool,
) -> Option<LayoutTrigger> {
    if *closed {
        return None;
    }

    let deadline = tokio::time::sleep(settle);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => return None,
            next = triggers.recv() => match next {
                Some(LayoutTrigger::Resize) => deadline.as_mut().reset(Instant::now() + settle),
                Some(LayoutTrigger::Structural) => return Some(LayoutTrigger::Structural),
                None => {
                    *closed = true;
                    return None;
                }
            },
        }
    }
}
