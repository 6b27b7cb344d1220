mod options;

use std::rc::Rc;

use serde_json::{json, Value};

use crate::error::ChartError;
use crate::logging::Logger;

pub use options::{program_growth_option, research_distribution_option, student_flow_option};

/// A mounted chart instance.
pub trait ChartHandle {
    fn set_option(&self, option: &Value) -> Result<(), ChartError>;
    fn resize(&self) -> Result<(), ChartError>;
    fn dispose(&self);
}

/// The charting library as seen by the page.
pub trait ChartBackend {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn init(&self, container_id: &str) -> Result<Box<dyn ChartHandle>, ChartError>;
}

/// Stands in when no charting library was loaded.
pub struct UnavailableCharts;

impl ChartBackend for UnavailableCharts {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn init(&self, container_id: &str) -> Result<Box<dyn ChartHandle>, ChartError> {
        Err(ChartError::Init {
            id: container_id.to_string(),
            message: "no chart library loaded".to_string(),
        })
    }
}

pub struct ChartSpec {
    pub container_id: &'static str,
    pub build: fn() -> Value,
}

pub fn default_chart_specs() -> [ChartSpec; 3] {
    [
        ChartSpec {
            container_id: "studentFlowChart",
            build: student_flow_option,
        },
        ChartSpec {
            container_id: "programGrowthChart",
            build: program_growth_option,
        },
        ChartSpec {
            container_id: "researchDistributionChart",
            build: research_distribution_option,
        },
    ]
}

#[derive(Clone)]
pub struct MountedChart {
    pub container_id: &'static str,
    pub handle: Rc<dyn ChartHandle>,
}

impl MountedChart {
    /// Refits the chart to its container. A failed resize keeps the old size.
    pub fn resize(&self, logger: &Logger) {
        if let Err(error) = self.handle.resize() {
            logger.debug(
                "charts.resize_failed",
                json!({ "chart": self.container_id, "error": error.to_string() }),
            );
        }
    }
}

/// Releases every chart instance, returning how many were disposed.
pub fn dispose_charts(charts: Vec<MountedChart>, logger: &Logger) -> usize {
    for chart in &charts {
        chart.handle.dispose();
    }

    logger.debug("charts.disposed", json!({ "count": charts.len() }));
    charts.len()
}

#[derive(Default)]
pub struct ChartsReport {
    pub mounted: Vec<MountedChart>,
    pub missing: Vec<&'static str>,
    pub failed: Vec<ChartError>,
}

pub enum ChartsOutcome {
    Unavailable,
    Rendered(ChartsReport),
}

/// Mounts every chart it can. Each chart fails on its own; a missing library
/// skips the whole set with a warning.
pub fn render_charts(backend: &dyn ChartBackend, specs: &[ChartSpec], logger: &Logger) -> ChartsOutcome {
    if !backend.is_available() {
        logger.warn(
            "charts.skipped",
            json!({ "reason": "chart library not found", "backend": backend.name() }),
        );
        return ChartsOutcome::Unavailable;
    }

    let mut report = ChartsReport::default();

    for spec in specs {
        match mount_chart(backend, spec) {
            Ok(handle) => {
                logger.debug("charts.mounted", json!({ "chart": spec.container_id }));
                report.mounted.push(MountedChart {
                    container_id: spec.container_id,
                    handle,
                });
            }
            Err(ChartError::MissingContainer(_)) => {
                logger.debug("charts.container_missing", json!({ "chart": spec.container_id }));
                report.missing.push(spec.container_id);
            }
            Err(error) => {
                logger.error(
                    "charts.failed",
                    json!({ "chart": spec.container_id, "error": error.to_string() }),
                );
                report.failed.push(error);
            }
        }
    }

    ChartsOutcome::Rendered(report)
}

fn mount_chart(backend: &dyn ChartBackend, spec: &ChartSpec) -> Result<Rc<dyn ChartHandle>, ChartError> {
    let handle = backend.init(spec.container_id)?;
    handle.set_option(&(spec.build)())?;
    Ok(Rc::from(handle))
}
