use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::dom;
use super::Effect;
use crate::effects::tilt::{CardRect, Tilt, GLOW_SHADOW, NEUTRAL_TRANSFORM};
use crate::error::EffectsError;
use crate::logging::Logger;

const TILT_SELECTOR: &str = ".hover-3d";
const GLOW_SELECTOR: &str = ".glow-button";

/// Pointer-driven tilt on 3D cards and glow on highlighted buttons.
pub struct Hover {
    damping: f64,
    logger: Logger,
    listeners: Vec<EventListener>,
}

impl Hover {
    pub fn new(damping: f64, logger: Logger) -> Self {
        Self {
            damping,
            logger,
            listeners: Vec::new(),
        }
    }
}

impl Effect for Hover {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let cards = dom::safe_query_all(TILT_SELECTOR, &self.logger);
        let buttons = dom::safe_query_all(GLOW_SELECTOR, &self.logger);
        if cards.is_empty() && buttons.is_empty() {
            return Err(EffectsError::MissingElement(format!("{TILT_SELECTOR}, {GLOW_SELECTOR}")));
        }

        let damping = self.damping;
        for card in cards {
            let on_move = card.clone();
            self.listeners.push(EventListener::new(&card, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = on_move.get_bounding_client_rect();
                let rect = CardRect {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                };
                let tilt = Tilt::toward(
                    rect,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    damping,
                );
                dom::set_style(&on_move, "transform", &tilt.transform());
            }));

            let on_leave = card.clone();
            self.listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                dom::set_style(&on_leave, "transform", NEUTRAL_TRANSFORM);
            }));
        }

        for button in buttons {
            let on_enter = button.clone();
            self.listeners.push(EventListener::new(&button, "mouseenter", move |_| {
                dom::set_style(&on_enter, "box-shadow", GLOW_SHADOW);
            }));

            let on_leave = button.clone();
            self.listeners.push(EventListener::new(&button, "mouseleave", move |_| {
                dom::clear_style(&on_leave, "box-shadow");
            }));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}
