// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lacrima CLI entrypoint.
//!
//! Replays a navigation script against a simulated diagram and prints the layout the view would
//! receive after every step, one JSON object per line.
//!
//! Use `--print-schema` to dump the JSON schema of the config file instead.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use lacrima::config::Config;
use lacrima::layout::{ElementTag, Rect};
use lacrima::model::Catalog;
use lacrima::nav::{NavCommand, NavigationState, Navigator};
use lacrima::orchestrate::{layout_channel, FixtureSurface, LayoutOrchestrator};
use lacrima::view::DiagramView;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 900.0;
const DEFAULT_SCRIPT: &[&str] =
    &["tear", "lipid", "next", "next", "eyelid", "lid-margin", "prev", "resize=960", "clear"];

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <path>] [<step>...]\n  {program} --print-schema\n\nSteps are replayed in order against a simulated diagram:\n  <category-id> | <subcategory-id>   select\n  next | prev                        move within the selected category\n  clear                              back to the overview\n  resize=<width>                     resize the viewport\n\nWithout steps a built-in walkthrough runs. Set RUST_LOG=lacrima=debug to see skipped passes."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: Option<String>,
    print_schema: bool,
    steps: Vec<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                options.config_path = Some(args.next().ok_or(())?);
            }
            "--print-schema" => {
                if options.print_schema {
                    return Err(());
                }
                options.print_schema = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => options.steps.push(arg),
        }
    }

    if options.print_schema && (options.config_path.is_some() || !options.steps.is_empty()) {
        return Err(());
    }

    Ok(options)
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Nav(NavCommand),
    Resize(f64),
}

fn parse_step(catalog: &Catalog, raw: &str) -> Result<Step, String> {
    match raw {
        "next" => return Ok(Step::Nav(NavCommand::Next)),
        "prev" => return Ok(Step::Nav(NavCommand::Previous)),
        "clear" => return Ok(Step::Nav(NavCommand::Clear)),
        _ => {}
    }

    if let Some(width) = raw.strip_prefix("resize=") {
        let width: f64 = width.parse().map_err(|_| format!("invalid width in {raw:?}"))?;
        if !width.is_finite() || width <= 0.0 {
            return Err(format!("invalid width in {raw:?}"));
        }
        return Ok(Step::Resize(width));
    }

    if let Some(category) = catalog.categories().iter().find(|c| c.id().as_str() == raw) {
        return Ok(Step::Nav(NavCommand::SelectCategory(category.id().clone())));
    }
    let subcategory = catalog
        .categories()
        .iter()
        .flat_map(|c| c.subcategories())
        .find(|s| s.id().as_str() == raw)
        .ok_or_else(|| format!("unknown step {raw:?}"))?;
    Ok(Step::Nav(NavCommand::SelectSubcategory(subcategory.id().clone())))
}

/// Stand-in for the rendered diagram: markers in a left column, panels to the right.
///
/// The visible panel grows with the active subcategory's position and is centered on its
/// marker, so later entries overhang the container padding the way long panels do.
struct SimulatedView {
    catalog: Arc<Catalog>,
    width: f64,
}

impl SimulatedView {
    fn paint(&self, surface: &FixtureSurface, state: &NavigationState) {
        surface.set_rect(ElementTag::Container, Rect::new(0.0, 0.0, self.width, VIEWPORT_HEIGHT));

        let panel_x = self.width * 0.4;
        let panel_width = self.width * 0.55;
        for (index, category) in self.catalog.categories().iter().enumerate() {
            let row = 120.0 + index as f64 * 240.0;
            let marker = Rect::new(40.0, row, 160.0, 160.0);
            let panel_height = 120.0 + 20.0 * category.subcategories().len() as f64;
            let panel = Rect::new(panel_x, row + 40.0 - panel_height / 4.0, panel_width, panel_height);
            surface.set_rect(ElementTag::Marker(category.id().clone()), marker);
            surface.set_rect(ElementTag::Panel(category.id().clone()), panel);
        }

        let visible = match (state.selected_category(), state.active_position()) {
            (None, _) => Rect::new(panel_x, 60.0, panel_width, 320.0),
            (Some(category_id), position) => {
                let index = self
                    .catalog
                    .categories()
                    .iter()
                    .position(|c| c.id() == category_id)
                    .unwrap_or(0);
                let center = 200.0 + index as f64 * 240.0;
                let height = 220.0 + 90.0 * position.map_or(0.0, |(p, _)| (p + 1) as f64);
                Rect::new(panel_x, center - height / 2.0, panel_width, height)
            }
        };
        surface.set_rect(ElementTag::VisiblePanel, visible);
    }
}

async fn replay(config: Config, steps: Vec<(String, Step)>) -> Result<(), Box<dyn Error>> {
    let catalog = Arc::new(config.catalog.clone());
    let mut view = SimulatedView { catalog: catalog.clone(), width: DEFAULT_VIEWPORT_WIDTH };
    let surface = FixtureSurface::new();

    let orchestrator =
        LayoutOrchestrator::new(surface.clone(), catalog.clone(), config.layout.clone());
    let mut layout = orchestrator.subscribe();
    let (triggers, rx) = layout_channel();
    let mut navigator = Navigator::new(catalog).with_layout_triggers(triggers.clone());
    let wait = config.layout.resize_settle() + Duration::from_millis(500);

    let script = async move {
        let mut lines = Vec::new();

        view.paint(&surface, navigator.state());
        triggers.structural();
        let settled = tokio::time::timeout(wait, layout.changed()).await.is_ok();
        lines.push(render_line("mount", navigator.state(), &layout, settled)?);

        for (raw, step) in steps {
            let expect_pass = match step {
                Step::Nav(command) => {
                    let rev = navigator.state().rev();
                    if let Err(err) = navigator.apply(&command) {
                        warn!(step = %raw, %err, "navigation rejected");
                    }
                    view.paint(&surface, navigator.state());
                    navigator.state().rev() != rev
                }
                Step::Resize(width) => {
                    view.width = width;
                    view.paint(&surface, navigator.state());
                    triggers.resize();
                    true
                }
            };

            let settled =
                expect_pass && tokio::time::timeout(wait, layout.changed()).await.is_ok();
            lines.push(render_line(&raw, navigator.state(), &layout, settled)?);
        }

        drop(navigator);
        drop(triggers);
        Ok::<_, serde_json::Error>(lines)
    };

    let (orchestrator, lines) = tokio::join!(orchestrator.run(rx), script);
    for line in lines? {
        println!("{line}");
    }
    info!(stats = ?orchestrator.stats(), "replay finished");
    Ok(())
}

fn render_line(
    step: &str,
    state: &NavigationState,
    layout: &tokio::sync::watch::Receiver<lacrima::layout::LayoutValues>,
    settled: bool,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serde_json::json!({
        "step": step,
        "category": state.selected_category(),
        "subcategory": state.active_subcategory(),
        "title": DiagramView::new(state).active_title(),
        "is_first": state.is_first(),
        "is_last": state.is_last(),
        "updated": settled,
        "layout": &*layout.borrow(),
    }))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "lacrima".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.print_schema {
            println!("{}", Config::json_schema());
            return Ok(());
        }

        init_tracing();

        let config = match &options.config_path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        let raw_steps = if options.steps.is_empty() {
            DEFAULT_SCRIPT.iter().map(|s| (*s).to_owned()).collect()
        } else {
            options.steps
        };
        let steps = raw_steps
            .into_iter()
            .map(|raw| parse_step(&config.catalog, &raw).map(|step| (raw, step)))
            .collect::<Result<Vec<_>, _>>()?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(replay(config, steps))
    })();

    if let Err(err) = result {
        eprintln!("lacrima: {err}");
        std::process::exit(1);
    }
}
