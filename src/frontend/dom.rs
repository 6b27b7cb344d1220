use js_sys::{Array, JSON};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::config::EffectsConfig;
use crate::error::EffectsError;
use crate::logging::Logger;

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn js_message(value: JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }

    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }

    JSON::stringify(&value)
        .ok()
        .and_then(|text| text.as_string())
        .unwrap_or_else(|| "unknown script error".to_string())
}

pub fn js_error(value: JsValue) -> EffectsError {
    EffectsError::Js(js_message(value))
}

pub fn query(selector: &str) -> Result<Option<Element>, EffectsError> {
    let document = document().ok_or(EffectsError::CapabilityUnavailable("document"))?;
    document
        .query_selector(selector)
        .map_err(|_| EffectsError::InvalidSelector(selector.to_string()))
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, EffectsError> {
    let document = document().ok_or(EffectsError::CapabilityUnavailable("document"))?;
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| EffectsError::InvalidSelector(selector.to_string()))?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Like [`query`], but a bad selector is logged and reads as "not found".
pub fn safe_query(selector: &str, logger: &Logger) -> Option<Element> {
    query(selector).unwrap_or_else(|error| {
        logger.warn("dom.query_failed", json!({ "selector": selector, "error": error.to_string() }));
        None
    })
}

pub fn safe_query_all(selector: &str, logger: &Logger) -> Vec<HtmlElement> {
    query_all(selector)
        .unwrap_or_else(|error| {
            logger.warn("dom.query_failed", json!({ "selector": selector, "error": error.to_string() }));
            Vec::new()
        })
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn require_html(selector: &str, logger: &Logger) -> Result<HtmlElement, EffectsError> {
    safe_query(selector, logger)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| EffectsError::MissingElement(selector.to_string()))
}

pub fn require_any(selector: &str, logger: &Logger) -> Result<Vec<HtmlElement>, EffectsError> {
    let elements = safe_query_all(selector, logger);
    if elements.is_empty() {
        return Err(EffectsError::MissingElement(selector.to_string()));
    }
    Ok(elements)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Reads `data-*` overrides from `<html>`.
pub fn config_from_document() -> EffectsConfig {
    let root = document().and_then(|document| document.document_element());
    EffectsConfig::from_lookup(|key| {
        root.as_ref()
            .and_then(|root| root.get_attribute(&format!("data-{key}")))
    })
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.page_y_offset().ok())
        .unwrap_or(0.0)
}

pub fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

pub fn document_height() -> f64 {
    document()
        .and_then(|document| document.body())
        .map(|body| f64::from(body.scroll_height()))
        .unwrap_or(0.0)
}

pub fn scroll_to_top() {
    let Some(window) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_to_fragment(id: &str) -> bool {
    let Some(target) = document().and_then(|document| document.get_element_by_id(id)) else {
        return false;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// An intersection observer that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new<F>(threshold: f64, mut on_entry: F) -> Result<Self, EffectsError>
    where
        F: FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_entry(entry, &observer);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(js_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
