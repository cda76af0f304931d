// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use lacrima::config::Config;
use lacrima::layout::{ElementTag, LayoutValues, Rect};
use lacrima::model::{Catalog, CategoryId, SubcategoryId};
use lacrima::nav::{NavCommand, NavPhase, Navigator};
use lacrima::orchestrate::{layout_channel, FixtureSurface, LayoutOrchestrator};
use lacrima::view::{DiagramView, Terminal};

fn cid(raw: &str) -> CategoryId {
    CategoryId::new(raw).expect("category id")
}

fn sid(raw: &str) -> SubcategoryId {
    SubcategoryId::new(raw).expect("subcategory id")
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
}

// Rows of 100x100 markers at x=40 and 300x100 panels at x=400. The eyelid marker anchor sits
// at y=347 against a panel center of 330, so panels move down 17.
fn surface() -> FixtureSurface {
    let mut rects = vec![(ElementTag::Container, Rect::new(0.0, 0.0, 1000.0, 900.0))];
    for (row, id) in ["tear", "eyelid", "ocular"].into_iter().enumerate() {
        let y = 100.0 + row as f64 * 200.0;
        rects.push((ElementTag::Marker(cid(id)), Rect::new(40.0, y, 100.0, 100.0)));
        rects.push((ElementTag::Panel(cid(id)), Rect::new(400.0, y - 20.0, 300.0, 100.0)));
    }
    rects.push((ElementTag::VisiblePanel, Rect::new(400.0, 100.0, 300.0, 200.0)));
    FixtureSurface::from_rects(rects)
}

fn connector_end_y(values: &LayoutValues, id: &str) -> f64 {
    values.connectors.iter().find(|c| c.id == cid(id)).expect("connector").end.y
}

#[tokio::test]
async fn selecting_a_subcategory_realigns_and_clears_the_padding() {
    let config = Config::default();
    let catalog = Arc::new(config.catalog.clone());
    let surface = surface();
    let orchestrator = LayoutOrchestrator::new(surface.clone(), catalog.clone(), config.layout);
    let mut layout = orchestrator.subscribe();
    let (triggers, rx) = layout_channel();
    let mut navigator = Navigator::new(catalog).with_layout_triggers(triggers.clone());
    let mut nav_updates = navigator.subscribe();

    let handle = surface.clone();
    let driver = async move {
        triggers.structural();
        let mounted = layout.wait_for(|v| !v.connectors.is_empty()).await.expect("mount").clone();

        navigator.apply(&NavCommand::SelectCategory(cid("tear"))).expect("select tear");
        navigator.apply(&NavCommand::SelectSubcategory(sid("lipid"))).expect("select lipid");
        // The lipid panel is tall enough to reach above the container padding.
        handle.set_rect(ElementTag::VisiblePanel, Rect::new(400.0, 0.0, 300.0, 300.0));

        let selected = layout.wait_for(|v| v.offsets.top_clearance > 0.0).await.expect("pass").clone();
        let state = nav_updates.borrow_and_update().clone();
        drop(navigator);
        drop(triggers);
        (mounted, selected, state)
    };

    let (orchestrator, (mounted, selected, state)) = tokio::join!(orchestrator.run(rx), driver);

    assert_close(mounted.offsets.panels, 17.0);
    assert_close(mounted.offsets.markers, 0.0);
    assert_close(mounted.offsets.top_clearance, 0.0);
    assert_eq!(mounted.connectors.len(), 3);

    assert_close(selected.offsets.panels, 17.0);
    assert_close(selected.offsets.top_clearance, 15.0);
    // Tear panel center 130, shifted by panels and clearance.
    assert_close(connector_end_y(&selected, "tear"), 162.0);
    assert_close(selected.connectors[0].start.x, 115.0);

    assert_eq!(state.phase(), NavPhase::SubcategorySelected);
    let view = DiagramView::new(&state);
    assert_eq!(view.connector_terminal(&cid("tear")), Some(Terminal::Dot));
    assert!(view.is_subcategory_visible(&sid("lipid")));

    assert!(orchestrator.stats().structural_completed >= 2);
    assert_eq!(orchestrator.stats().structural_skipped, 0);
    assert_eq!(surface.applied_offsets(), selected.offsets);
}

#[tokio::test]
async fn rejected_selection_triggers_no_layout_pass() {
    let config = Config::default();
    let catalog = Arc::new(config.catalog.clone());
    let surface = surface();
    let orchestrator = LayoutOrchestrator::new(surface.clone(), catalog.clone(), config.layout);
    let (triggers, rx) = layout_channel();
    let mut navigator = Navigator::new(catalog).with_layout_triggers(triggers);

    let driver = async move {
        navigator.apply(&NavCommand::SelectCategory(cid("cornea"))).unwrap_err();
        navigator.apply(&NavCommand::SelectSubcategory(sid("lipid"))).unwrap_err();
        navigator.apply(&NavCommand::Next).expect("no-op next");
        drop(navigator);
    };

    let (orchestrator, ()) = tokio::join!(orchestrator.run(rx), driver);

    assert_eq!(orchestrator.stats(), Default::default());
    assert!(surface.paints().is_empty());
}

#[tokio::test(start_paused = true)]
async fn resize_moves_connectors_after_the_viewport_settles() {
    let config = Config::default();
    let catalog = Arc::new(config.catalog.clone());
    let surface = surface();
    let mut orchestrator = LayoutOrchestrator::new(surface.clone(), catalog, config.layout);
    assert!(orchestrator.structural_pass().await.is_completed());
    let offsets = orchestrator.values().offsets;
    let mut layout = orchestrator.subscribe();
    let (triggers, rx) = layout_channel();

    let handle = surface.clone();
    let driver = async move {
        for width in [900.0, 800.0, 700.0] {
            for (row, id) in ["tear", "eyelid", "ocular"].into_iter().enumerate() {
                let y = 80.0 + row as f64 * 200.0;
                handle.set_rect(ElementTag::Panel(cid(id)), Rect::new(width * 0.4, y, 300.0, 100.0));
            }
            triggers.resize();
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        // Still inside the settle window.
        assert!(!layout.has_changed().expect("orchestrator alive"));
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(triggers);
    };

    let (orchestrator, ()) = tokio::join!(orchestrator.run(rx), driver);

    let values = orchestrator.values();
    assert_eq!(orchestrator.stats().resize_completed, 1);
    assert_eq!(values.offsets, offsets);
    assert!(values.connectors.iter().all(|c| (c.end.x - 280.0).abs() < 1e-6));
}

#[tokio::test]
async fn configured_catalog_and_reference_drive_the_pass() {
    let config = Config::from_json(
        r##"{
            "catalog": { "categories": [
                { "id": "upper", "title": "Upper", "color": "#102030",
                  "marker_anchor": { "x": { "fraction": 0.5 }, "y": 0.5 },
                  "subcategories": [{ "id": "u1", "title": "U1" }] },
                { "id": "lower", "title": "Lower", "color": "#405060",
                  "marker_anchor": { "x": { "inset_from_right": 0 }, "y": 0.5 },
                  "subcategories": [{ "id": "l1", "title": "L1" }, { "id": "l2", "title": "L2" }] }
            ] },
            "layout": { "reference_category": "lower", "padding_top": 0 }
        }"##,
    )
    .expect("config");
    let catalog: Arc<Catalog> = Arc::new(config.catalog.clone());
    let surface = FixtureSurface::from_rects([
        (ElementTag::Container, Rect::new(0.0, 0.0, 800.0, 600.0)),
        (ElementTag::Marker(cid("upper")), Rect::new(0.0, 0.0, 100.0, 100.0)),
        (ElementTag::Panel(cid("upper")), Rect::new(300.0, 0.0, 200.0, 100.0)),
        (ElementTag::Marker(cid("lower")), Rect::new(0.0, 200.0, 100.0, 100.0)),
        (ElementTag::Panel(cid("lower")), Rect::new(300.0, 260.0, 200.0, 100.0)),
        (ElementTag::VisiblePanel, Rect::new(300.0, 50.0, 200.0, 100.0)),
    ]);
    let mut orchestrator = LayoutOrchestrator::new(surface, catalog, config.layout);

    assert!(orchestrator.structural_pass().await.is_completed());

    // Lower marker center 250 against panel center 310: markers move down 60.
    let values = orchestrator.values();
    assert_close(values.offsets.markers, 60.0);
    assert_close(values.offsets.panels, 0.0);
    assert_close(values.offsets.top_clearance, 0.0);
    let lower = values.connectors.iter().find(|c| c.id == cid("lower")).expect("lower");
    assert_close(lower.start.x, 100.0);
    assert_close(lower.start.y, 310.0);
    assert_eq!(lower.color.to_string(), "#405060");
}
