use gloo_events::EventListener;
use js_sys::{Array, Function, Reflect, JSON};
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use super::dom::{self, js_message};
use super::Effect;
use crate::charts::{
    default_chart_specs, dispose_charts, render_charts, ChartBackend, ChartHandle, ChartsOutcome,
    MountedChart, UnavailableCharts,
};
use crate::error::{ChartError, EffectsError};
use crate::logging::Logger;

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, String> {
    let method = Reflect::get(target, &JsValue::from_str(name)).map_err(js_message)?;
    let method = method
        .dyn_ref::<Function>()
        .ok_or_else(|| format!("{name} is not a function"))?;
    method.apply(target, args).map_err(js_message)
}

/// `window.echarts`, if the page loaded it.
struct Echarts {
    library: JsValue,
}

struct EchartsInstance {
    id: String,
    instance: JsValue,
}

pub fn detect_chart_backend() -> Box<dyn ChartBackend> {
    let library = dom::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("echarts")).ok())
        .filter(JsValue::is_object);

    match library {
        Some(library) => Box::new(Echarts { library }),
        None => Box::new(UnavailableCharts),
    }
}

impl ChartBackend for Echarts {
    fn name(&self) -> &'static str {
        "echarts"
    }

    fn init(&self, container_id: &str) -> Result<Box<dyn ChartHandle>, ChartError> {
        let container = dom::document()
            .and_then(|document| document.get_element_by_id(container_id))
            .ok_or_else(|| ChartError::MissingContainer(container_id.to_string()))?;

        // Drop the loading placeholder before the library takes over.
        container.set_inner_html("");
        if let Some(element) = container.dyn_ref::<HtmlElement>() {
            dom::set_style(element, "display", "block");
        }

        let instance = call_method(&self.library, "init", &Array::of1(&container)).map_err(|message| {
            ChartError::Init {
                id: container_id.to_string(),
                message,
            }
        })?;

        Ok(Box::new(EchartsInstance {
            id: container_id.to_string(),
            instance,
        }))
    }
}

impl ChartHandle for EchartsInstance {
    fn set_option(&self, option: &Value) -> Result<(), ChartError> {
        let set_option_error = |message| ChartError::SetOption {
            id: self.id.clone(),
            message,
        };

        let option = JSON::parse(&option.to_string()).map_err(|error| set_option_error(js_message(error)))?;
        call_method(&self.instance, "setOption", &Array::of1(&option)).map_err(set_option_error)?;
        Ok(())
    }

    fn resize(&self) -> Result<(), ChartError> {
        call_method(&self.instance, "resize", &Array::new()).map_err(|message| ChartError::Resize {
            id: self.id.clone(),
            message,
        })?;
        Ok(())
    }

    fn dispose(&self) {
        let _ = call_method(&self.instance, "dispose", &Array::new());
    }
}

/// Renders the three cooperation charts and keeps them sized to the window.
pub struct Charts {
    logger: Logger,
    mounted: Vec<MountedChart>,
    listeners: Vec<EventListener>,
}

impl Charts {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            mounted: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl Effect for Charts {
    fn name(&self) -> &'static str {
        "charts"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let backend = detect_chart_backend();
        let ChartsOutcome::Rendered(report) =
            render_charts(backend.as_ref(), &default_chart_specs(), &self.logger)
        else {
            return Ok(());
        };

        let window = dom::window().ok_or(EffectsError::CapabilityUnavailable("window"))?;
        for chart in report.mounted {
            let resized = chart.clone();
            let logger = self.logger.clone();
            self.listeners.push(EventListener::new(&window, "resize", move |_| {
                resized.resize(&logger);
            }));
            self.mounted.push(chart);
        }

        self.logger.info(
            "charts.ready",
            json!({
                "backend": backend.name(),
                "mounted": self.mounted.iter().map(|chart| chart.container_id).collect::<Vec<_>>(),
                "missing": report.missing,
                "failed": report.failed.len(),
            }),
        );
        Ok(())
    }

    fn stop(&mut self) {
        self.listeners.clear();
        dispose_charts(std::mem::take(&mut self.mounted), &self.logger);
    }
}
