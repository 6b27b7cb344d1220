/// One displayed value of a counter animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

/// Linear ramp from zero to `target`, advanced once per animation frame.
#[derive(Clone, Debug)]
pub struct CounterRamp {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterRamp {
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = (f64::from(duration_ms) / f64::from(frame_ms.max(1))).max(1.0);

        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Ends the ramp where it stands; later steps yield nothing.
    pub fn cancel(&mut self) {
        self.done = true;
    }

    /// Advances one frame. Returns `None` once the target has been shown.
    pub fn step(&mut self) -> Option<CounterFrame> {
        if self.done {
            return None;
        }

        self.current += self.increment;
        let target = self.target as f64;

        if self.current < target {
            let value = (self.current.floor() as u64).min(self.target);
            return Some(CounterFrame { value, done: false });
        }

        self.done = true;
        Some(CounterFrame {
            value: self.target,
            done: true,
        })
    }
}

impl Iterator for CounterRamp {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

pub fn parse_target(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Formats with `,` between thousands groups.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ramp_ends_on_grouped_target() {
        let last = CounterRamp::new(38_000, 2_000, 16)
            .last()
            .expect("ramp yields frames");

        assert!(last.done);
        assert_eq!(format_grouped(last.value), "38,000");
    }

    #[test]
    fn ramp_takes_about_duration_over_frame_steps() {
        let frames = CounterRamp::new(150, 2_000, 16).count();
        assert!((125..=126).contains(&frames), "got {frames} frames");
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut ramp = CounterRamp::new(0, 2_000, 16);

        assert_eq!(ramp.step(), Some(CounterFrame { value: 0, done: true }));
        assert_eq!(ramp.step(), None);
        assert!(ramp.is_done());
    }

    #[test]
    fn cancelled_ramp_yields_no_more_frames() {
        let mut ramp = CounterRamp::new(38_000, 2_000, 16);
        let first = ramp.step().expect("first frame");
        assert!(!first.done);

        ramp.cancel();

        assert!(ramp.is_done());
        assert_eq!(ramp.step(), None);
        assert_eq!(ramp.count(), 0);
    }

    #[test]
    fn cancel_before_start_shows_nothing() {
        let mut ramp = CounterRamp::new(150, 2_000, 16);
        ramp.cancel();
        assert_eq!(ramp.next(), None);
    }

    #[test]
    fn grouping_handles_short_and_long_numbers() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(950), "950");
        assert_eq!(format_grouped(9_500), "9,500");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn target_parsing_rejects_non_numbers() {
        assert_eq!(parse_target(" 120 "), Some(120));
        assert_eq!(parse_target("-4"), None);
        assert_eq!(parse_target("lots"), None);
    }

    proptest! {
        #[test]
        fn ramp_is_non_decreasing_and_capped(target in 0u64..10_000_000, duration in 100u32..5_000) {
            let frames: Vec<CounterFrame> = CounterRamp::new(target, duration, 16).collect();

            prop_assert!(!frames.is_empty());
            prop_assert!(frames.windows(2).all(|pair| pair[0].value <= pair[1].value));
            prop_assert!(frames.iter().all(|frame| frame.value <= target));

            let last = frames[frames.len() - 1];
            prop_assert!(last.done);
            prop_assert_eq!(last.value, target);
            prop_assert_eq!(frames.iter().filter(|frame| frame.done).count(), 1);
        }
    }
}
