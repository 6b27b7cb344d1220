use serde_json::json;

use crate::error::EffectsError;
use crate::logging::Logger;

/// One independently started page behavior. `stop` releases everything
/// `start` registered.
pub trait Effect {
    fn name(&self) -> &'static str;
    fn start(&mut self) -> Result<(), EffectsError>;
    fn stop(&mut self);
}

/// Effects that started successfully, stopped newest first.
#[derive(Default)]
pub struct EffectSet {
    running: Vec<Box<dyn Effect>>,
}

impl EffectSet {
    /// Starts each effect in order. A failed effect is stopped right away so
    /// nothing it registered outlives it; the rest still start.
    pub fn start_all(&mut self, effects: Vec<Box<dyn Effect>>, logger: &Logger) -> Vec<&'static str> {
        let mut started = Vec::new();

        for mut effect in effects {
            match effect.start() {
                Ok(()) => {
                    started.push(effect.name());
                    self.running.push(effect);
                }
                Err(EffectsError::MissingElement(selector)) => {
                    effect.stop();
                    logger.debug(
                        "effect.skipped",
                        json!({ "effect": effect.name(), "missing": selector }),
                    );
                }
                Err(error) => {
                    effect.stop();
                    logger.warn(
                        "effect.failed",
                        json!({ "effect": effect.name(), "error": error.to_string() }),
                    );
                }
            }
        }

        started
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Stops every running effect in reverse start order and forgets them.
    pub fn stop_all(&mut self) -> usize {
        let mut stopped = 0;
        while let Some(mut effect) = self.running.pop() {
            effect.stop();
            stopped += 1;
        }
        stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::{cell::RefCell, rc::Rc};

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Recording {
        name: &'static str,
        outcome: Option<fn() -> EffectsError>,
        journal: Journal,
    }

    impl Effect for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn start(&mut self) -> Result<(), EffectsError> {
            self.journal.borrow_mut().push(format!("start {}", self.name));
            match self.outcome {
                Some(error) => Err(error()),
                None => Ok(()),
            }
        }

        fn stop(&mut self) {
            self.journal.borrow_mut().push(format!("stop {}", self.name));
        }
    }

    fn recording(name: &'static str, journal: &Journal) -> Box<dyn Effect> {
        Box::new(Recording {
            name,
            outcome: None,
            journal: journal.clone(),
        })
    }

    fn failing(name: &'static str, error: fn() -> EffectsError, journal: &Journal) -> Box<dyn Effect> {
        Box::new(Recording {
            name,
            outcome: Some(error),
            journal: journal.clone(),
        })
    }

    #[test]
    fn stop_all_runs_in_reverse_start_order() {
        let journal = Journal::default();
        let (logger, _) = Logger::capturing(LogLevel::Debug);
        let mut set = EffectSet::default();

        set.start_all(vec![recording("navigation", &journal), recording("menu", &journal)], &logger);
        set.start_all(vec![recording("particles", &journal)], &logger);
        journal.borrow_mut().clear();

        assert_eq!(set.stop_all(), 3);
        assert_eq!(
            *journal.borrow(),
            vec!["stop particles", "stop menu", "stop navigation"]
        );
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn stopping_twice_releases_nothing_the_second_time() {
        let journal = Journal::default();
        let (logger, _) = Logger::capturing(LogLevel::Debug);
        let mut set = EffectSet::default();
        set.start_all(vec![recording("cursor", &journal)], &logger);

        set.stop_all();
        journal.borrow_mut().clear();

        assert_eq!(set.stop_all(), 0);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn failed_start_is_cleaned_up_and_does_not_block_the_rest() {
        let journal = Journal::default();
        let (logger, records) = Logger::capturing(LogLevel::Debug);
        let mut set = EffectSet::default();

        let started = set.start_all(
            vec![
                failing("cursor", || EffectsError::MissingElement("#magneticCursor".into()), &journal),
                failing("charts", || EffectsError::Js("boom".into()), &journal),
                recording("rays", &journal),
            ],
            &logger,
        );

        assert_eq!(started, vec!["rays"]);
        assert_eq!(set.len(), 1);
        assert_eq!(
            *journal.borrow(),
            vec!["start cursor", "stop cursor", "start charts", "stop charts", "start rays"]
        );

        let records = records.borrow();
        assert_eq!(records[0].event, "effect.skipped");
        assert_eq!(records[0].level, LogLevel::Debug);
        assert_eq!(records[1].event, "effect.failed");
        assert_eq!(records[1].level, LogLevel::Warn);
    }
}
