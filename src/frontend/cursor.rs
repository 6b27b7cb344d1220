use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use super::dom;
use super::timers::FrameLoop;
use super::Effect;
use crate::effects::cursor::{CursorFollower, CursorLook, HOVER_LOOK, IDLE_LOOK, MAGNETIC_SELECTOR};
use crate::error::EffectsError;
use crate::logging::Logger;

const CURSOR_SELECTOR: &str = "#magneticCursor";

fn apply_look(cursor: &HtmlElement, look: CursorLook) {
    dom::set_style(cursor, "transform", look.transform);
    dom::set_style(cursor, "background", look.background);
}

/// Decorative cursor that trails the pointer and swells over interactive elements.
pub struct Cursor {
    smoothing: f64,
    logger: Logger,
    listeners: Vec<EventListener>,
    frame_loop: Option<FrameLoop>,
}

impl Cursor {
    pub fn new(smoothing: f64, logger: Logger) -> Self {
        Self {
            smoothing,
            logger,
            listeners: Vec::new(),
            frame_loop: None,
        }
    }
}

impl Effect for Cursor {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let cursor = dom::require_html(CURSOR_SELECTOR, &self.logger)?;
        let document = dom::document().ok_or(EffectsError::CapabilityUnavailable("document"))?;
        let follower = Rc::new(RefCell::new(CursorFollower::new(self.smoothing)));

        {
            let cursor = cursor.clone();
            let follower = follower.clone();
            self.listeners.push(EventListener::new(&document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    follower
                        .borrow_mut()
                        .set_target(f64::from(event.client_x()), f64::from(event.client_y()));
                    let _ = cursor.class_list().add_1("active");
                }
            }));
        }

        if let Some(root) = document.document_element() {
            let cursor = cursor.clone();
            self.listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                let _ = cursor.class_list().remove_1("active");
            }));
        }

        for element in dom::safe_query_all(MAGNETIC_SELECTOR, &self.logger) {
            let on_enter = cursor.clone();
            self.listeners.push(EventListener::new(&element, "mouseenter", move |_| {
                apply_look(&on_enter, HOVER_LOOK);
            }));

            let on_leave = cursor.clone();
            self.listeners.push(EventListener::new(&element, "mouseleave", move |_| {
                apply_look(&on_leave, IDLE_LOOK);
            }));
        }

        self.frame_loop = Some(FrameLoop::start(move |_| {
            let (left, top) = follower.borrow_mut().step();
            dom::set_style(&cursor, "left", &format!("{left}px"));
            dom::set_style(&cursor, "top", &format!("{top}px"));
            true
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.frame_loop = None;
        self.listeners.clear();
    }
}
