/// Share of the scrollable distance already covered, in percent.
///
/// A page that fits the viewport has nothing to scroll and reads as 0%.
pub fn scroll_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }

    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn progress_label(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

pub fn progress_width_style(percent: f64) -> String {
    format!("width: {percent:.2}%;")
}

pub fn back_to_top_visible(scroll_top: f64, threshold: f64) -> bool {
    scroll_top > threshold
}

/// Vertical drift of the floating element at `index` for a given scroll offset.
pub fn parallax_offset(scroll_top: f64, index: usize) -> f64 {
    let speed = 0.5 + index as f64 * 0.1;
    scroll_top * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn endpoints_read_zero_and_hundred() {
        assert_eq!(scroll_percent(0.0, 2_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_percent(1_000.0, 2_000.0, 1_000.0), 100.0);
        assert_relative_eq!(scroll_percent(250.0, 2_000.0, 1_000.0), 25.0);
    }

    #[test]
    fn short_page_does_not_divide_by_zero() {
        assert_eq!(scroll_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_percent(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn label_rounds_to_whole_percent() {
        assert_eq!(progress_label(33.4), "33%");
        assert_eq!(progress_label(99.5), "100%");
        assert_eq!(progress_width_style(12.5), "width: 12.50%;");
    }

    #[test]
    fn back_to_top_appears_strictly_past_threshold() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(300.5, 300.0));
    }

    #[test]
    fn parallax_speed_grows_with_index() {
        assert_relative_eq!(parallax_offset(100.0, 0), 50.0);
        assert_relative_eq!(parallax_offset(100.0, 3), 80.0);
    }

    proptest! {
        #[test]
        fn percent_is_monotonic_in_scroll_top(
            viewport in 100.0f64..2_000.0,
            extra in 1.0f64..20_000.0,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let document = viewport + extra;
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let first = scroll_percent(low * extra, document, viewport);
            let second = scroll_percent(high * extra, document, viewport);

            prop_assert!(first <= second);
            prop_assert!((0.0..=100.0).contains(&second));
        }
    }
}
