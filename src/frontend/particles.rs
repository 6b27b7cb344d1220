use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use gloo_timers::callback::{Interval, Timeout};
use serde_json::json;
use web_sys::{Element, HtmlElement};

use super::dom;
use super::Effect;
use crate::effects::particles::{ParticleId, ParticlePool, ParticleStyle};
use crate::error::EffectsError;
use crate::logging::Logger;

const CONTAINER_SELECTOR: &str = "#particleContainer";

/// Live particles inside the container, each with its removal timer.
struct ParticleField {
    container: HtmlElement,
    lifetime_ms: u32,
    logger: Logger,
    pool: RefCell<ParticlePool>,
    nodes: RefCell<BTreeMap<ParticleId, Element>>,
    expiries: RefCell<BTreeMap<ParticleId, Timeout>>,
}

impl ParticleField {
    fn spawn(self: &Rc<Self>) {
        self.sweep();

        let Some(id) = self.pool.borrow_mut().try_spawn(js_sys::Date::now()) else {
            return;
        };

        let style = ParticleStyle::random(self.lifetime_ms, &mut js_sys::Math::random);
        let node = match self.create_node(&style) {
            Ok(node) => node,
            Err(error) => {
                self.pool.borrow_mut().release(id);
                self.logger.warn("particles.spawn_failed", json!({ "error": error.to_string() }));
                return;
            }
        };

        let field: Weak<Self> = Rc::downgrade(self);
        let expiry = Timeout::new(self.lifetime_ms, move || {
            if let Some(field) = field.upgrade() {
                field.sweep();
            }
        });
        self.nodes.borrow_mut().insert(id, node);
        self.expiries.borrow_mut().insert(id, expiry);
    }

    fn create_node(&self, style: &ParticleStyle) -> Result<Element, EffectsError> {
        let document = dom::document().ok_or(EffectsError::CapabilityUnavailable("document"))?;
        let node = document.create_element("div").map_err(dom::js_error)?;
        node.set_class_name("particle");
        node.set_attribute("style", &style.css()).map_err(dom::js_error)?;
        self.container.append_child(&node).map_err(dom::js_error)?;
        Ok(node)
    }

    /// Removes every particle whose lifetime has run out.
    fn sweep(&self) {
        let expired = self.pool.borrow_mut().expire_due(js_sys::Date::now());
        for id in expired {
            if let Some(node) = self.nodes.borrow_mut().remove(&id) {
                node.remove();
            }
            self.expiries.borrow_mut().remove(&id);
        }
    }

    fn clear(&self) {
        self.expiries.borrow_mut().clear();
        for (_, node) in std::mem::take(&mut *self.nodes.borrow_mut()) {
            node.remove();
        }
        let cleared = self.pool.borrow_mut().clear();
        self.logger.debug("particles.cleared", json!({ "live": cleared }));
    }
}

/// Floating particles spawned on a timer, never more than the configured cap.
pub struct Particles {
    cap: usize,
    interval_ms: u32,
    lifetime_ms: u32,
    prespawn: usize,
    prespawn_stagger_ms: u32,
    logger: Logger,
    field: Option<Rc<ParticleField>>,
    interval: Option<Interval>,
    prespawn_timers: Vec<Timeout>,
}

impl Particles {
    pub fn new(
        cap: usize,
        interval_ms: u32,
        lifetime_ms: u32,
        prespawn: usize,
        prespawn_stagger_ms: u32,
        logger: Logger,
    ) -> Self {
        Self {
            cap,
            interval_ms,
            lifetime_ms,
            prespawn,
            prespawn_stagger_ms,
            logger,
            field: None,
            interval: None,
            prespawn_timers: Vec::new(),
        }
    }
}

impl Effect for Particles {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let container = dom::require_html(CONTAINER_SELECTOR, &self.logger)?;
        let field = Rc::new(ParticleField {
            container,
            lifetime_ms: self.lifetime_ms,
            logger: self.logger.clone(),
            pool: RefCell::new(ParticlePool::new(self.cap, self.lifetime_ms)),
            nodes: RefCell::new(BTreeMap::new()),
            expiries: RefCell::new(BTreeMap::new()),
        });

        {
            let field = field.clone();
            self.interval = Some(Interval::new(self.interval_ms, move || field.spawn()));
        }

        for index in 0..self.prespawn {
            let field = field.clone();
            let delay = u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.prespawn_stagger_ms);
            self.prespawn_timers
                .push(Timeout::new(delay, move || field.spawn()));
        }

        self.field = Some(field);
        Ok(())
    }

    fn stop(&mut self) {
        self.interval = None;
        self.prespawn_timers.clear();
        if let Some(field) = self.field.take() {
            field.clear();
        }
    }
}
