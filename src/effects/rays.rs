#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayTiming {
    pub delay_s: f64,
    pub duration_s: f64,
}

impl RayTiming {
    /// Rays start one `step_s` apart and sweep for 4 to 6 seconds.
    pub fn staggered(index: usize, step_s: f64, unit: f64) -> Self {
        Self {
            delay_s: index as f64 * step_s,
            duration_s: 4.0 + unit.clamp(0.0, 1.0) * 2.0,
        }
    }

    pub fn delay_css(self) -> String {
        format!("{}s", self.delay_s)
    }

    pub fn duration_css(self) -> String {
        format!("{:.2}s", self.duration_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_step_by_index() {
        let timings: Vec<RayTiming> = (0..3).map(|index| RayTiming::staggered(index, 2.0, 0.5)).collect();

        assert_eq!(timings[0].delay_css(), "0s");
        assert_eq!(timings[2].delay_css(), "4s");
        assert_eq!(timings[1].duration_css(), "5.00s");
    }

    #[test]
    fn duration_stays_within_four_to_six_seconds() {
        assert_eq!(RayTiming::staggered(0, 2.0, -1.0).duration_s, 4.0);
        assert_eq!(RayTiming::staggered(0, 2.0, 7.0).duration_s, 6.0);
    }
}
