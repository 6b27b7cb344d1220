use serde::Serialize;
use serde_json::{json, Value};

use crate::error::EffectsError;
use crate::logging::Logger;

/// One fire-and-forget tween, serialised as the animation library's parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    pub targets: &'static str,
    pub opacity: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 2]>,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    pub easing: &'static str,
    /// Per-element delay step; the library builds the stagger function itself.
    #[serde(skip)]
    pub stagger_ms: Option<u32>,
}

impl Tween {
    fn fade(targets: &'static str, duration: u32, easing: &'static str) -> Self {
        Self {
            targets,
            opacity: [0.0, 1.0],
            translate_y: None,
            scale: None,
            duration,
            delay: None,
            easing,
            stagger_ms: None,
        }
    }

    pub fn params(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({ "targets": self.targets }))
    }
}

/// Tweens played shortly after the document is ready.
pub fn entrance_tweens(reduced_motion: bool) -> Vec<Tween> {
    if reduced_motion {
        return Vec::new();
    }

    vec![
        Tween {
            translate_y: Some([50.0, 0.0]),
            stagger_ms: Some(100),
            ..Tween::fade(".card-hover", 800, "easeOutQuart")
        },
        Tween {
            scale: Some([0.8, 1.0]),
            stagger_ms: Some(150),
            ..Tween::fade(".metric-card", 600, "easeOutBack")
        },
        Tween {
            opacity: [0.0, 0.4],
            scale: Some([0.5, 1.0]),
            delay: Some(600),
            ..Tween::fade(".floating-element", 1_200, "easeOutQuart")
        },
        Tween {
            translate_y: Some([-30.0, 0.0]),
            ..Tween::fade("nav", 600, "easeOutQuart")
        },
        Tween {
            scale: Some([0.9, 1.0]),
            delay: Some(300),
            ..Tween::fade(".hero-title", 1_000, "easeOutExpo")
        },
    ]
}

/// Fade played on window load.
pub fn load_tweens(reduced_motion: bool) -> Vec<Tween> {
    if reduced_motion {
        return Vec::new();
    }

    vec![Tween::fade("body", 500, "easeOutQuart")]
}

/// The animation library as seen by the page.
pub trait Animator {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn animate(&self, tween: &Tween) -> Result<(), EffectsError>;
}

/// Stands in when no animation library was loaded.
pub struct NoAnimation;

impl Animator for NoAnimation {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn animate(&self, _tween: &Tween) -> Result<(), EffectsError> {
        Err(EffectsError::CapabilityUnavailable("animation library"))
    }
}

/// Plays each tween independently and returns how many started.
pub fn play(animator: &dyn Animator, tweens: &[Tween], logger: &Logger) -> usize {
    if tweens.is_empty() {
        return 0;
    }

    if !animator.is_available() {
        logger.warn(
            "animation.skipped",
            json!({ "reason": "animation library not found", "tweens": tweens.len() }),
        );
        return 0;
    }

    tweens
        .iter()
        .filter(|tween| match animator.animate(tween) {
            Ok(()) => true,
            Err(error) => {
                logger.warn(
                    "animation.failed",
                    json!({ "targets": tween.targets, "error": error.to_string() }),
                );
                false
            }
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::cell::RefCell;

    struct RecordingAnimator {
        played: RefCell<Vec<&'static str>>,
        reject: &'static str,
    }

    impl Animator for RecordingAnimator {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn animate(&self, tween: &Tween) -> Result<(), EffectsError> {
            if tween.targets == self.reject {
                return Err(EffectsError::Js("no targets".to_string()));
            }
            self.played.borrow_mut().push(tween.targets);
            Ok(())
        }
    }

    #[test]
    fn reduced_motion_skips_every_tween() {
        assert!(entrance_tweens(true).is_empty());
        assert!(load_tweens(true).is_empty());
        assert_eq!(entrance_tweens(false).len(), 5);
    }

    #[test]
    fn params_use_library_property_names() {
        let tweens = entrance_tweens(false);
        let params = tweens[0].params();

        assert_eq!(params["targets"], ".card-hover");
        assert_eq!(params["translateY"], json!([50.0, 0.0]));
        assert_eq!(params["easing"], "easeOutQuart");
        assert!(params.get("scale").is_none());
        assert!(params.get("staggerMs").is_none());
        assert_eq!(tweens[0].stagger_ms, Some(100));
    }

    #[test]
    fn one_rejected_tween_leaves_the_rest_playing() {
        let animator = RecordingAnimator {
            played: RefCell::new(Vec::new()),
            reject: "nav",
        };
        let (logger, records) = Logger::capturing(LogLevel::Info);

        let started = play(&animator, &entrance_tweens(false), &logger);

        assert_eq!(started, 4);
        assert!(!animator.played.borrow().contains(&"nav"));
        assert_eq!(records.borrow().len(), 1);
    }

    #[test]
    fn missing_library_warns_once() {
        let (logger, records) = Logger::capturing(LogLevel::Info);

        assert_eq!(play(&NoAnimation, &load_tweens(false), &logger), 0);
        assert_eq!(records.borrow()[0].event, "animation.skipped");
    }
}
