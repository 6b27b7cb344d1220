use gloo_events::{EventListener, EventListenerOptions};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use super::dom;
use super::Effect;
use crate::error::EffectsError;
use crate::logging::Logger;
use crate::navigation::{
    active_section, fragment_target, is_link_active, toggle_classes, SectionSpan,
    MOBILE_MENU_CLASSES,
};

const NAV_LINK_SELECTOR: &str = ".nav-item";
const SECTION_SELECTOR: &str = ".speech-section";
const MENU_BUTTON_SELECTOR: &str = ".md\\:hidden button";
const MENU_LINKS_SELECTOR: &str = ".hidden.md\\:flex";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

fn measure_sections(sections: &[HtmlElement]) -> Vec<SectionSpan> {
    sections
        .iter()
        .filter_map(|section| {
            let id = section.id();
            (!id.is_empty()).then(|| {
                SectionSpan::new(
                    id,
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
        })
        .collect()
}

fn smooth_scroll_from(event: &Event, href: &str) {
    event.prevent_default();
    if let Some(id) = fragment_target(href) {
        dom::scroll_to_fragment(id);
    }
}

/// Highlights the nav-link of the section in view and smooth-scrolls on click.
pub struct Navigation {
    offset: f64,
    logger: Logger,
    listeners: Vec<EventListener>,
}

impl Navigation {
    pub fn new(offset: f64, logger: Logger) -> Self {
        Self {
            offset,
            logger,
            listeners: Vec::new(),
        }
    }
}

impl Effect for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let window = dom::window().ok_or(EffectsError::CapabilityUnavailable("window"))?;
        let links = dom::require_any(NAV_LINK_SELECTOR, &self.logger)?;
        let sections = dom::safe_query_all(SECTION_SELECTOR, &self.logger);

        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            self.listeners.push(EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| smooth_scroll_from(event, &href),
            ));
        }

        let offset = self.offset;
        self.listeners.push(EventListener::new(&window, "scroll", move |_| {
            let spans = measure_sections(&sections);
            let active = active_section(&spans, dom::scroll_y(), offset);

            for link in &links {
                let href = link.get_attribute("href").unwrap_or_default();
                let _ = link
                    .class_list()
                    .toggle_with_force("active", is_link_active(&href, active));
            }
        }));

        self.logger.debug(
            "navigation.bound",
            json!({ "links": self.listeners.len() - 1 }),
        );
        Ok(())
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

/// Smooth-scrolls any in-page anchor click on the document.
pub struct AnchorScroll {
    listener: Option<EventListener>,
}

impl AnchorScroll {
    pub fn new() -> Self {
        Self { listener: None }
    }
}

impl Effect for AnchorScroll {
    fn name(&self) -> &'static str {
        "anchor-scroll"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let document = dom::document().ok_or(EffectsError::CapabilityUnavailable("document"))?;

        let options = EventListenerOptions::enable_prevent_default();
        self.listener = Some(EventListener::new_with_options(&document, "click", options, |event| {
            let Some(anchor) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
            else {
                return;
            };

            if anchor.matches(ANCHOR_SELECTOR).unwrap_or(false) {
                let href = anchor.get_attribute("href").unwrap_or_default();
                smooth_scroll_from(event, &href);
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.listener = None;
    }
}

/// Flips the mobile presentation classes on the nav-links container.
pub struct MobileMenu {
    logger: Logger,
    listener: Option<EventListener>,
}

impl MobileMenu {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            listener: None,
        }
    }
}

impl Effect for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile-menu"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let button = dom::require_html(MENU_BUTTON_SELECTOR, &self.logger)?;
        let links = dom::require_html(MENU_LINKS_SELECTOR, &self.logger)?;

        self.listener = Some(EventListener::new(&button, "click", move |_| {
            let next = toggle_classes(&links.class_name(), &MOBILE_MENU_CLASSES);
            links.set_class_name(&next);
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.listener = None;
    }
}
