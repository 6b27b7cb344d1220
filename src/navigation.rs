/// Classes flipped on the nav-links container by the mobile menu button.
pub const MOBILE_MENU_CLASSES: [&str; 11] = [
    "hidden",
    "flex",
    "flex-col",
    "absolute",
    "top-16",
    "left-0",
    "right-0",
    "bg-white",
    "border-b",
    "border-gray-200",
    "p-4",
];

#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, scroll_y: f64, offset: f64) -> bool {
        let start = self.top - offset;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// Id of the section whose shifted span holds `scroll_y`. Later sections win
/// when spans overlap, matching document order.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(scroll_y, offset))
        .map(|section| section.id.as_str())
}

pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn is_link_active(href: &str, active: Option<&str>) -> bool {
    match (fragment_target(href), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

/// Flips each class in `toggles` on a space separated class attribute.
pub fn toggle_classes(class_name: &str, toggles: &[&str]) -> String {
    let mut classes: Vec<&str> = class_name.split_whitespace().collect();

    for &toggle in toggles {
        if classes.contains(&toggle) {
            classes.retain(|class| *class != toggle);
        } else {
            classes.push(toggle);
        }
    }

    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const OFFSET: f64 = 150.0;

    fn stacked_sections(heights: &[f64]) -> Vec<SectionSpan> {
        let mut top = 0.0;
        heights
            .iter()
            .enumerate()
            .map(|(index, height)| {
                let section = SectionSpan::new(format!("section-{index}"), top, *height);
                top += height;
                section
            })
            .collect()
    }

    fn class_set(value: &str) -> BTreeSet<&str> {
        value.split_whitespace().collect()
    }

    #[test]
    fn offset_shifts_section_start_upward() {
        let sections = stacked_sections(&[600.0, 800.0]);

        assert_eq!(active_section(&sections, 0.0, OFFSET), Some("section-0"));
        assert_eq!(active_section(&sections, 449.0, OFFSET), Some("section-0"));
        assert_eq!(active_section(&sections, 450.0, OFFSET), Some("section-1"));
    }

    #[test]
    fn scroll_outside_every_span_activates_nothing() {
        let sections = vec![SectionSpan::new("intro", 1_000.0, 200.0)];

        let active = active_section(&sections, 10.0, OFFSET);
        assert_eq!(active, None);
        assert!(!is_link_active("#intro", active));
        assert!(!is_link_active("#", active));
    }

    #[test]
    fn fragment_target_requires_a_hash_and_an_id() {
        assert_eq!(fragment_target("#history"), Some("history"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/about"), None);
    }

    #[test]
    fn double_toggle_restores_closed_menu() {
        let closed = "hidden md:flex space-x-8";

        let opened = toggle_classes(closed, &MOBILE_MENU_CLASSES);
        assert!(!class_set(&opened).contains("hidden"));
        assert!(class_set(&opened).contains("flex-col"));
        assert!(class_set(&opened).contains("md:flex"));

        let closed_again = toggle_classes(&opened, &MOBILE_MENU_CLASSES);
        assert_eq!(class_set(&closed_again), class_set(closed));
    }

    proptest! {
        #[test]
        fn exactly_one_link_active_inside_a_span(
            heights in prop::collection::vec(200u32..2_000, 1..8),
            pick in any::<prop::sample::Index>(),
            step in 0u32..2_000,
        ) {
            let heights: Vec<f64> = heights.into_iter().map(f64::from).collect();
            let sections = stacked_sections(&heights);
            let chosen = &sections[pick.index(sections.len())];
            let start = chosen.top - OFFSET;
            let scroll_y = start + (f64::from(step) % chosen.height);

            let active = active_section(&sections, scroll_y, OFFSET);
            let hrefs: Vec<String> = sections.iter().map(|s| format!("#{}", s.id)).collect();
            let active_links: Vec<&String> = hrefs
                .iter()
                .filter(|href| is_link_active(href, active))
                .collect();

            prop_assert_eq!(active_links.len(), 1);
            prop_assert_eq!(active_links[0], &format!("#{}", chosen.id));
        }
    }
}
