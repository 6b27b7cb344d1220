use gloo_events::EventListener;

use super::dom::{self, Observer};
use super::Effect;
use crate::error::EffectsError;
use crate::logging::Logger;
use crate::progress::parallax_offset;

const TIMELINE_SELECTOR: &str = ".timeline-item";
const FLOATING_SELECTOR: &str = ".floating-element";

/// Adds `animate` to timeline items as they come into view.
pub struct TimelineReveal {
    threshold: f64,
    logger: Logger,
    observer: Option<Observer>,
}

impl TimelineReveal {
    pub fn new(threshold: f64, logger: Logger) -> Self {
        Self {
            threshold,
            logger,
            observer: None,
        }
    }
}

impl Effect for TimelineReveal {
    fn name(&self) -> &'static str {
        "timeline-reveal"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let items = dom::require_any(TIMELINE_SELECTOR, &self.logger)?;

        let observer = Observer::new(self.threshold, |entry, _| {
            if entry.is_intersecting() {
                let _ = entry.target().class_list().add_1("animate");
            }
        })?;

        for item in &items {
            observer.observe(item);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn stop(&mut self) {
        self.observer = None;
    }
}

/// Drifts floating decorations at index-dependent speeds while scrolling.
pub struct Parallax {
    logger: Logger,
    listener: Option<EventListener>,
}

impl Parallax {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            listener: None,
        }
    }
}

impl Effect for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let window = dom::window().ok_or(EffectsError::CapabilityUnavailable("window"))?;
        let elements = dom::require_any(FLOATING_SELECTOR, &self.logger)?;

        self.listener = Some(EventListener::new(&window, "scroll", move |_| {
            let scrolled = dom::scroll_y();
            for (index, element) in elements.iter().enumerate() {
                let shift = parallax_offset(scrolled, index);
                dom::set_style(element, "transform", &format!("translateY({shift}px)"));
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.listener = None;
    }
}
