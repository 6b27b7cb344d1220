use super::dom;
use super::Effect;
use crate::effects::rays::RayTiming;
use crate::error::EffectsError;
use crate::logging::Logger;

const RAY_SELECTOR: &str = ".light-ray";

/// Staggers the sweep animation of the decorative light rays.
pub struct Rays {
    delay_step_s: f64,
    logger: Logger,
}

impl Rays {
    pub fn new(delay_step_s: f64, logger: Logger) -> Self {
        Self { delay_step_s, logger }
    }
}

impl Effect for Rays {
    fn name(&self) -> &'static str {
        "light-rays"
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        for (index, ray) in dom::require_any(RAY_SELECTOR, &self.logger)?.iter().enumerate() {
            let timing = RayTiming::staggered(index, self.delay_step_s, js_sys::Math::random());
            dom::set_style(ray, "animation-delay", &timing.delay_css());
            dom::set_style(ray, "animation-duration", &timing.duration_css());
        }
        Ok(())
    }

    fn stop(&mut self) {}
}
