mod anime;
mod charts;
mod chrome;
mod counters;
mod cursor;
mod dom;
mod hover;
mod navigation;
mod particles;
mod rays;
mod scroll;
mod timers;

use std::cell::RefCell;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::PageTransitionEvent;

use self::chrome::{BackToTop, BackToTopProps, Overlay, ReadingProgress};
use crate::config::EffectsConfig;
use crate::effects::animation::{entrance_tweens, load_tweens};
use crate::error::EffectsError;
use crate::lifecycle::{Effect, EffectSet};
use crate::logging::Logger;

fn boxed<E: Effect + 'static>(effect: E) -> Box<dyn Effect> {
    Box::new(effect)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Ready,
    Deferred,
    Load,
    Settled,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Deferred => "deferred",
            Self::Load => "load",
            Self::Settled => "settled",
        }
    }

    fn effects(self, config: &EffectsConfig, logger: &Logger) -> Vec<Box<dyn Effect>> {
        let log = || logger.clone();
        match self {
            Self::Ready => vec![
                boxed(navigation::Navigation::new(config.nav_offset_px, log())),
                boxed(navigation::MobileMenu::new(log())),
                boxed(navigation::AnchorScroll::new()),
                boxed(Overlay::<BackToTop>::new(
                    "back-to-top",
                    BackToTopProps {
                        threshold: config.back_to_top_threshold_px,
                    },
                    log(),
                )),
            ],
            Self::Deferred => vec![
                boxed(anime::Entrance::new("entrance", entrance_tweens, log())),
                boxed(counters::Counters::new(
                    config.counter_duration_ms,
                    config.counter_frame_ms,
                    config.counter_threshold,
                    log(),
                )),
                boxed(scroll::TimelineReveal::new(config.timeline_threshold, log())),
                boxed(scroll::Parallax::new(log())),
                boxed(Overlay::<ReadingProgress>::new("reading-progress", (), log())),
            ],
            Self::Load => vec![boxed(anime::Entrance::new("load-fade", load_tweens, log()))],
            Self::Settled => vec![
                boxed(charts::Charts::new(log())),
                boxed(cursor::Cursor::new(config.cursor_smoothing, log())),
                boxed(particles::Particles::new(
                    config.particle_cap,
                    config.particle_interval_ms,
                    config.particle_lifetime_ms,
                    config.particle_prespawn,
                    config.particle_prespawn_stagger_ms,
                    log(),
                )),
                boxed(hover::Hover::new(config.tilt_damping, log())),
                boxed(rays::Rays::new(config.ray_delay_step_s, log())),
            ],
        }
    }
}

/// Owns every started effect plus the timers and listeners that start the
/// later stages.
struct PageEffects {
    config: EffectsConfig,
    logger: Logger,
    running: EffectSet,
    stage_timers: Vec<Timeout>,
    lifecycle: Vec<EventListener>,
}

thread_local! {
    static PAGE: RefCell<Option<PageEffects>> = const { RefCell::new(None) };
}

fn with_page(f: impl FnOnce(&mut PageEffects)) {
    PAGE.with(|page| {
        if let Some(page) = page.borrow_mut().as_mut() {
            f(page);
        }
    });
}

impl PageEffects {
    fn new(config: EffectsConfig, logger: Logger) -> Self {
        Self {
            config,
            logger,
            running: EffectSet::default(),
            stage_timers: Vec::new(),
            lifecycle: Vec::new(),
        }
    }

    fn enter(&mut self, stage: Stage) {
        let effects = stage.effects(&self.config, &self.logger);
        let started = self.running.start_all(effects, &self.logger);
        self.logger.info("page.stage", json!({ "stage": stage.as_str(), "started": started }));
    }

    fn schedule(&mut self, millis: u32, stage: Stage) {
        self.stage_timers.push(Timeout::new(millis, move || {
            with_page(|page| page.enter(stage));
        }));
    }

    fn on_load(&mut self) {
        self.enter(Stage::Load);
        self.schedule(self.config.load_start_ms, Stage::Settled);
    }

    fn listen(&mut self) -> Result<(), EffectsError> {
        let window = dom::window().ok_or(EffectsError::CapabilityUnavailable("window"))?;

        let loaded = dom::document().is_some_and(|document| document.ready_state() == "complete");
        if loaded {
            self.on_load();
        } else {
            self.lifecycle.push(EventListener::new(&window, "load", |_| {
                with_page(PageEffects::on_load);
            }));
        }

        self.lifecycle.push(EventListener::new(&window, "pagehide", |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            // A page kept in the back/forward cache resumes with its effects intact.
            if persisted {
                return;
            }

            if let Some(mut page) = PAGE.with(|page| page.borrow_mut().take()) {
                page.dispose();
            }
        }));
        Ok(())
    }

    fn dispose(&mut self) {
        self.stage_timers.clear();
        let stopped = self.running.stop_all();
        self.lifecycle.clear();
        self.logger.info("page.disposed", json!({ "stopped": stopped }));
    }
}

pub fn run() {
    let config = dom::config_from_document();
    let logger = Logger::new(config.log_level);
    logger.info(
        "page.banner",
        json!({
            "site": "China-Australia Educational Cooperation Website",
            "features": ["magnetic cursor", "particle system", "3d hover", "light rays", "animations"],
        }),
    );

    PAGE.with(|page| *page.borrow_mut() = Some(PageEffects::new(config, logger)));
    with_page(|page| {
        page.enter(Stage::Ready);
        page.schedule(page.config.deferred_start_ms, Stage::Deferred);
        if let Err(error) = page.listen() {
            page.logger.error("page.listen_failed", json!({ "error": error.to_string() }));
        }
    });
}
