#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct LogRecord {
    pub level: LogLevel,
    pub event: String,
    pub line: String,
}

/// Writes one JSON object per event to the browser console (stderr natively).
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    #[cfg(test)]
    capture: Option<Rc<RefCell<Vec<LogRecord>>>>,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            #[cfg(test)]
            capture: None,
        }
    }

    /// Keeps records in memory instead of writing them out.
    #[cfg(test)]
    pub fn capturing(min_level: LogLevel) -> (Self, Rc<RefCell<Vec<LogRecord>>>) {
        let records = Rc::new(RefCell::new(Vec::new()));
        let logger = Self {
            min_level,
            capture: Some(records.clone()),
        };
        (logger, records)
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: Value) {
        if level < self.min_level {
            return;
        }

        let line = format_event(now_unix_millis(), level, event, fields);

        #[cfg(test)]
        if let Some(capture) = &self.capture {
            capture.borrow_mut().push(LogRecord {
                level,
                event: event.to_string(),
                line,
            });
            return;
        }

        write_line(level, &line);
    }

    pub fn debug(&self, event: &str, fields: Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn error(&self, event: &str, fields: Value) {
        self.event(LogLevel::Error, event, fields);
    }
}

pub fn format_event(ts: u64, level: LogLevel, event: &str, fields: Value) -> String {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::info_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formatted_event_merges_fields_after_envelope() {
        let line = format_event(42, LogLevel::Warn, "charts.skipped", json!({ "reason": "missing" }));
        let parsed: Value = serde_json::from_str(&line).expect("valid JSON");

        assert_eq!(parsed["ts"], 42);
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["event"], "charts.skipped");
        assert_eq!(parsed["reason"], "missing");
    }

    #[test]
    fn events_below_minimum_level_are_dropped() {
        let (logger, records) = Logger::capturing(LogLevel::Info);

        logger.debug("noise", json!({}));
        logger.warn("kept", json!({}));

        let records = records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "kept");
        assert_eq!(records[0].level, LogLevel::Warn);
    }
}
