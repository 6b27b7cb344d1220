use crate::logging::LogLevel;

const DEFAULT_NAV_OFFSET_PX: f64 = 150.0;
const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_COUNTER_FRAME_MS: u32 = 16;
const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
const DEFAULT_TIMELINE_THRESHOLD: f64 = 0.3;
const DEFAULT_PARTICLE_CAP: usize = 15;
const DEFAULT_PARTICLE_INTERVAL_MS: u32 = 800;
const DEFAULT_PARTICLE_LIFETIME_MS: u32 = 9_000;
const DEFAULT_PARTICLE_PRESPAWN: usize = 5;
const DEFAULT_PARTICLE_PRESPAWN_STAGGER_MS: u32 = 300;
const DEFAULT_CURSOR_SMOOTHING: f64 = 0.1;
const DEFAULT_TILT_DAMPING: f64 = 10.0;
const DEFAULT_RAY_DELAY_STEP_S: f64 = 2.0;
const DEFAULT_DEFERRED_START_MS: u32 = 100;
const DEFAULT_LOAD_START_MS: u32 = 500;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAV_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const BACK_TO_TOP_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (100, 60_000);
const COUNTER_FRAME_MS_BOUNDS: (u32, u32) = (1, 1_000);
const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const PARTICLE_CAP_BOUNDS: (usize, usize) = (0, 200);
const PARTICLE_INTERVAL_MS_BOUNDS: (u32, u32) = (50, 60_000);
const PARTICLE_LIFETIME_MS_BOUNDS: (u32, u32) = (6_000, 60_000);
const PARTICLE_PRESPAWN_BOUNDS: (usize, usize) = (0, 50);
const PARTICLE_PRESPAWN_STAGGER_MS_BOUNDS: (u32, u32) = (0, 10_000);
const CURSOR_SMOOTHING_BOUNDS: (f64, f64) = (0.01, 1.0);
const TILT_DAMPING_BOUNDS: (f64, f64) = (1.0, 100.0);
const RAY_DELAY_STEP_S_BOUNDS: (f64, f64) = (0.0, 30.0);
const START_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);

/// Tunables for every page effect. Overrides come from `data-*` attributes on
/// the document element; anything missing or out of bounds keeps its default.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub nav_offset_px: f64,
    pub back_to_top_threshold_px: f64,
    pub counter_duration_ms: u32,
    pub counter_frame_ms: u32,
    pub counter_threshold: f64,
    pub timeline_threshold: f64,
    pub particle_cap: usize,
    pub particle_interval_ms: u32,
    pub particle_lifetime_ms: u32,
    pub particle_prespawn: usize,
    pub particle_prespawn_stagger_ms: u32,
    pub cursor_smoothing: f64,
    pub tilt_damping: f64,
    pub ray_delay_step_s: f64,
    pub deferred_start_ms: u32,
    pub load_start_ms: u32,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            nav_offset_px: DEFAULT_NAV_OFFSET_PX,
            back_to_top_threshold_px: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            counter_frame_ms: DEFAULT_COUNTER_FRAME_MS,
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            timeline_threshold: DEFAULT_TIMELINE_THRESHOLD,
            particle_cap: DEFAULT_PARTICLE_CAP,
            particle_interval_ms: DEFAULT_PARTICLE_INTERVAL_MS,
            particle_lifetime_ms: DEFAULT_PARTICLE_LIFETIME_MS,
            particle_prespawn: DEFAULT_PARTICLE_PRESPAWN,
            particle_prespawn_stagger_ms: DEFAULT_PARTICLE_PRESPAWN_STAGGER_MS,
            cursor_smoothing: DEFAULT_CURSOR_SMOOTHING,
            tilt_damping: DEFAULT_TILT_DAMPING,
            ray_delay_step_s: DEFAULT_RAY_DELAY_STEP_S,
            deferred_start_ms: DEFAULT_DEFERRED_START_MS,
            load_start_ms: DEFAULT_LOAD_START_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EffectsConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            nav_offset_px: parse_f64_with_bounds(
                lookup("nav-offset"),
                DEFAULT_NAV_OFFSET_PX,
                NAV_OFFSET_PX_BOUNDS,
            ),
            back_to_top_threshold_px: parse_f64_with_bounds(
                lookup("back-to-top-threshold"),
                DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
                BACK_TO_TOP_THRESHOLD_PX_BOUNDS,
            ),
            counter_duration_ms: parse_u32_with_bounds(
                lookup("counter-duration"),
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            counter_frame_ms: parse_u32_with_bounds(
                lookup("counter-frame"),
                DEFAULT_COUNTER_FRAME_MS,
                COUNTER_FRAME_MS_BOUNDS,
            ),
            counter_threshold: parse_f64_with_bounds(
                lookup("counter-threshold"),
                DEFAULT_COUNTER_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            timeline_threshold: parse_f64_with_bounds(
                lookup("timeline-threshold"),
                DEFAULT_TIMELINE_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            particle_cap: parse_usize_with_bounds(
                lookup("particle-cap"),
                DEFAULT_PARTICLE_CAP,
                PARTICLE_CAP_BOUNDS,
            ),
            particle_interval_ms: parse_u32_with_bounds(
                lookup("particle-interval"),
                DEFAULT_PARTICLE_INTERVAL_MS,
                PARTICLE_INTERVAL_MS_BOUNDS,
            ),
            particle_lifetime_ms: parse_u32_with_bounds(
                lookup("particle-lifetime"),
                DEFAULT_PARTICLE_LIFETIME_MS,
                PARTICLE_LIFETIME_MS_BOUNDS,
            ),
            particle_prespawn: parse_usize_with_bounds(
                lookup("particle-prespawn"),
                DEFAULT_PARTICLE_PRESPAWN,
                PARTICLE_PRESPAWN_BOUNDS,
            ),
            particle_prespawn_stagger_ms: parse_u32_with_bounds(
                lookup("particle-prespawn-stagger"),
                DEFAULT_PARTICLE_PRESPAWN_STAGGER_MS,
                PARTICLE_PRESPAWN_STAGGER_MS_BOUNDS,
            ),
            cursor_smoothing: parse_f64_with_bounds(
                lookup("cursor-smoothing"),
                DEFAULT_CURSOR_SMOOTHING,
                CURSOR_SMOOTHING_BOUNDS,
            ),
            tilt_damping: parse_f64_with_bounds(
                lookup("tilt-damping"),
                DEFAULT_TILT_DAMPING,
                TILT_DAMPING_BOUNDS,
            ),
            ray_delay_step_s: parse_f64_with_bounds(
                lookup("ray-delay-step"),
                DEFAULT_RAY_DELAY_STEP_S,
                RAY_DELAY_STEP_S_BOUNDS,
            ),
            deferred_start_ms: parse_u32_with_bounds(
                lookup("deferred-start"),
                DEFAULT_DEFERRED_START_MS,
                START_DELAY_MS_BOUNDS,
            ),
            load_start_ms: parse_u32_with_bounds(
                lookup("load-start"),
                DEFAULT_LOAD_START_MS,
                START_DELAY_MS_BOUNDS,
            ),
            log_level: parse_log_level(lookup("log-level"), DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(raw: Option<String>, default: usize, bounds: (usize, usize)) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(raw: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    raw.map(|value| value.trim().to_ascii_lowercase())
        .and_then(|value| LogLevel::from_str(&value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = EffectsConfig::from_lookup(|_| None);
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.particle_cap, 15);
        assert_eq!(config.particle_lifetime_ms, 9_000);
    }

    #[test]
    fn in_bounds_overrides_are_applied() {
        let config = EffectsConfig::from_lookup(lookup_from(&[
            ("particle-cap", " 8 "),
            ("cursor-smoothing", "0.25"),
            ("log-level", "DEBUG"),
        ]));

        assert_eq!(config.particle_cap, 8);
        assert_eq!(config.cursor_smoothing, 0.25);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_or_garbage_falls_back_to_default() {
        let config = EffectsConfig::from_lookup(lookup_from(&[
            ("particle-cap", "5000"),
            ("counter-threshold", "1.5"),
            ("tilt-damping", "NaN"),
            ("counter-duration", "fast"),
            ("log-level", "verbose"),
        ]));

        assert_eq!(config.particle_cap, DEFAULT_PARTICLE_CAP);
        assert_eq!(config.counter_threshold, DEFAULT_COUNTER_THRESHOLD);
        assert_eq!(config.tilt_damping, DEFAULT_TILT_DAMPING);
        assert_eq!(config.counter_duration_ms, DEFAULT_COUNTER_DURATION_MS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
