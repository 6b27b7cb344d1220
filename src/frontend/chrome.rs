use gloo_events::EventListener;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;
use yew::{AppHandle, BaseComponent};

use super::dom;
use super::Effect;
use crate::error::EffectsError;
use crate::logging::Logger;
use crate::progress::{back_to_top_visible, progress_label, progress_width_style, scroll_percent};

const OVERLAY_MOUNT_SELECTOR: &str = "#effects-overlay";

#[derive(Clone, Copy, PartialEq)]
struct ScrollMetrics {
    scroll_top: f64,
    document_height: f64,
    viewport_height: f64,
}

impl ScrollMetrics {
    fn measure() -> Self {
        Self {
            scroll_top: dom::scroll_y(),
            document_height: dom::document_height(),
            viewport_height: dom::viewport_height(),
        }
    }
}

#[hook]
fn use_scroll_metrics() -> ScrollMetrics {
    let metrics = use_state_eq(ScrollMetrics::measure);

    {
        let metrics = metrics.clone();
        use_effect_with((), move |_| {
            let listeners: Vec<EventListener> = dom::window()
                .map(|window| {
                    ["scroll", "resize"]
                        .into_iter()
                        .map(|event| {
                            let metrics = metrics.clone();
                            EventListener::new(&window, event, move |_| {
                                metrics.set(ScrollMetrics::measure());
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();

            move || drop(listeners)
        });
    }

    *metrics
}

#[derive(Clone, Properties, PartialEq)]
pub struct BackToTopProps {
    pub threshold: f64,
}

/// Floating button that appears once the reader is past `threshold`.
#[function_component(BackToTop)]
pub fn back_to_top(props: &BackToTopProps) -> Html {
    let metrics = use_scroll_metrics();
    let visible = back_to_top_visible(metrics.scroll_top, props.threshold);
    let onclick = Callback::from(|_: MouseEvent| dom::scroll_to_top());

    html! {
        <button
            id="backToTop"
            class={classes!("back-to-top", visible.then_some("show"))}
            type="button"
            aria-label="Back to top"
            {onclick}
        >
            <span aria-hidden="true">{"↑"}</span>
        </button>
    }
}

/// Reading-progress bar with its percentage label.
#[function_component(ReadingProgress)]
pub fn reading_progress() -> Html {
    let metrics = use_scroll_metrics();
    let percent = scroll_percent(
        metrics.scroll_top,
        metrics.document_height,
        metrics.viewport_height,
    );

    html! {
        <div
            class="reading-progress"
            role="progressbar"
            aria-label="Reading progress"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={(percent.round() as i64).to_string()}
        >
            <div id="progressBar" class="progress-bar" style={progress_width_style(percent)}></div>
            <span id="readingProgress" class="progress-label">{progress_label(percent)}</span>
        </div>
    }
}

/// Renders a component into its own slot inside the page overlay. Stopping
/// destroys the app and removes the slot.
pub struct Overlay<C: BaseComponent> {
    name: &'static str,
    props: C::Properties,
    logger: Logger,
    slot: Option<Element>,
    handle: Option<AppHandle<C>>,
}

impl<C> Overlay<C>
where
    C: BaseComponent,
    C::Properties: Clone,
{
    pub fn new(name: &'static str, props: C::Properties, logger: Logger) -> Self {
        Self {
            name,
            props,
            logger,
            slot: None,
            handle: None,
        }
    }
}

impl<C> Effect for Overlay<C>
where
    C: BaseComponent,
    C::Properties: Clone,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let mount = dom::safe_query(OVERLAY_MOUNT_SELECTOR, &self.logger)
            .ok_or_else(|| EffectsError::MissingElement(OVERLAY_MOUNT_SELECTOR.to_string()))?;
        let document = dom::document().ok_or(EffectsError::CapabilityUnavailable("document"))?;

        let slot = document.create_element("div").map_err(dom::js_error)?;
        slot.set_class_name(self.name);
        mount.append_child(&slot).map_err(dom::js_error)?;

        self.handle = Some(
            yew::Renderer::<C>::with_root_and_props(slot.clone(), self.props.clone()).render(),
        );
        self.slot = Some(slot);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
        if let Some(slot) = self.slot.take() {
            slot.remove();
        }
    }
}
