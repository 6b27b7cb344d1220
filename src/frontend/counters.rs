use std::{cell::RefCell, rc::Rc};

use serde_json::json;

use super::dom::{self, Observer};
use super::timers::FrameLoop;
use super::Effect;
use crate::counter::{format_grouped, parse_target, CounterRamp};
use crate::error::EffectsError;
use crate::logging::Logger;

const COUNTER_SELECTOR: &str = ".stats-counter, .metric-number";

/// Groups digits for the visitor's locale, or as `38,000` when it is unknown.
fn display_count(value: u64) -> String {
    match dom::window().and_then(|window| window.navigator().language()) {
        Some(locale) => js_sys::Number::from(value as f64)
            .to_locale_string(&locale)
            .into(),
        None => format_grouped(value),
    }
}

/// Ramps each counter up to its `data-target` the first time it scrolls into view.
pub struct Counters {
    duration_ms: u32,
    frame_ms: u32,
    threshold: f64,
    logger: Logger,
    observer: Option<Observer>,
    loops: Rc<RefCell<Vec<FrameLoop>>>,
}

impl Counters {
    pub fn new(duration_ms: u32, frame_ms: u32, threshold: f64, logger: Logger) -> Self {
        Self {
            duration_ms,
            frame_ms,
            threshold,
            logger,
            observer: None,
            loops: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Effect for Counters {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let counters = dom::require_any(COUNTER_SELECTOR, &self.logger)?;
        let (duration_ms, frame_ms) = (self.duration_ms, self.frame_ms);
        let logger = self.logger.clone();
        let loops = self.loops.clone();

        let observer = Observer::new(self.threshold, move |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }

            let element = entry.target();
            observer.unobserve(&element);

            let Some(target) = element
                .get_attribute("data-target")
                .as_deref()
                .and_then(parse_target)
            else {
                logger.warn(
                    "counters.invalid_target",
                    json!({ "value": element.get_attribute("data-target") }),
                );
                return;
            };

            let mut ramp = CounterRamp::new(target, duration_ms, frame_ms);
            let frame_loop = FrameLoop::start(move |_| {
                if !element.is_connected() {
                    ramp.cancel();
                }

                let Some(frame) = ramp.step() else {
                    return false;
                };
                element.set_text_content(Some(&display_count(frame.value)));
                !frame.done
            });

            let mut loops = loops.borrow_mut();
            loops.retain(FrameLoop::is_running);
            loops.push(frame_loop);
        })?;

        for counter in &counters {
            observer.observe(counter);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn stop(&mut self) {
        self.observer = None;
        for frame_loop in self.loops.borrow_mut().drain(..) {
            frame_loop.stop();
        }
    }
}
