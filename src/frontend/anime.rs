use js_sys::{Function, Reflect, JSON};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};

use super::dom::{self, js_error};
use super::Effect;
use crate::effects::animation::{play, Animator, NoAnimation, Tween};
use crate::error::EffectsError;
use crate::logging::Logger;

/// `window.anime`, if the page loaded it.
struct AnimeJs {
    library: Function,
}

pub fn detect_animator() -> Box<dyn Animator> {
    let library = dom::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("anime")).ok())
        .and_then(|value| value.dyn_into::<Function>().ok());

    match library {
        Some(library) => Box::new(AnimeJs { library }),
        None => Box::new(NoAnimation),
    }
}

impl AnimeJs {
    fn stagger(&self, step_ms: u32) -> Result<JsValue, EffectsError> {
        let stagger = Reflect::get(&self.library, &JsValue::from_str("stagger"))
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| EffectsError::CapabilityUnavailable("anime.stagger"))?;
        stagger
            .call1(&self.library, &JsValue::from(step_ms))
            .map_err(js_error)
    }
}

impl Animator for AnimeJs {
    fn name(&self) -> &'static str {
        "anime"
    }

    fn animate(&self, tween: &Tween) -> Result<(), EffectsError> {
        let params = JSON::parse(&tween.params().to_string()).map_err(js_error)?;

        if let Some(step_ms) = tween.stagger_ms {
            let delay = self.stagger(step_ms)?;
            Reflect::set(&params, &JsValue::from_str("delay"), &delay).map_err(js_error)?;
        }

        self.library.call1(&JsValue::NULL, &params).map_err(js_error)?;
        Ok(())
    }
}

/// Plays a fixed tween table once, unless the visitor asked for reduced motion.
pub struct Entrance {
    name: &'static str,
    tweens: fn(bool) -> Vec<Tween>,
    logger: Logger,
}

impl Entrance {
    pub fn new(name: &'static str, tweens: fn(bool) -> Vec<Tween>, logger: Logger) -> Self {
        Self {
            name,
            tweens,
            logger,
        }
    }
}

impl Effect for Entrance {
    fn name(&self) -> &'static str {
        self.name
    }

    fn start(&mut self) -> Result<(), EffectsError> {
        let reduced_motion = dom::prefers_reduced_motion();
        if reduced_motion {
            self.logger.debug("animation.reduced_motion", json!({ "effect": self.name }));
        }

        let tweens = (self.tweens)(reduced_motion);
        let animator = detect_animator();
        let started = play(animator.as_ref(), &tweens, &self.logger);

        self.logger.debug(
            "animation.played",
            json!({ "effect": self.name, "backend": animator.name(), "started": started }),
        );
        Ok(())
    }

    fn stop(&mut self) {}
}
