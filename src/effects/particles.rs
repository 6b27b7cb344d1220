use std::collections::BTreeMap;

pub type ParticleId = u64;

const MIN_DURATION_S: f64 = 6.0;
const DURATION_SPREAD_S: f64 = 3.0;
const MIN_SIZE_PX: f64 = 2.0;
const SIZE_SPREAD_PX: f64 = 3.0;

/// Randomised placement and timing of one particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStyle {
    pub left_percent: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub size_px: f64,
}

impl ParticleStyle {
    /// Draws a style whose delay plus duration fits inside `lifetime_ms`, so the
    /// float animation has finished by the time the particle is removed.
    pub fn random<R>(lifetime_ms: u32, unit: &mut R) -> Self
    where
        R: FnMut() -> f64,
    {
        let lifetime_s = f64::from(lifetime_ms) / 1_000.0;
        let left_percent = unit() * 100.0;
        let duration_s = (MIN_DURATION_S + unit() * DURATION_SPREAD_S).min(lifetime_s);
        let delay_s = unit() * (lifetime_s - duration_s).max(0.0);
        let size_px = MIN_SIZE_PX + unit() * SIZE_SPREAD_PX;

        Self {
            left_percent,
            delay_s,
            duration_s,
            size_px,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "left: {:.2}%; animation-delay: {:.2}s; animation-duration: {:.2}s; width: {:.2}px; height: {:.2}px;",
            self.left_percent, self.delay_s, self.duration_s, self.size_px, self.size_px
        )
    }
}

/// Bookkeeping for live particles. Never admits more than `cap` at once, and
/// each particle falls due `lifetime_ms` after it spawned.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    cap: usize,
    lifetime_ms: f64,
    next_id: ParticleId,
    due: BTreeMap<ParticleId, f64>,
}

impl ParticlePool {
    pub fn new(cap: usize, lifetime_ms: u32) -> Self {
        Self {
            cap,
            lifetime_ms: f64::from(lifetime_ms),
            next_id: 0,
            due: BTreeMap::new(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.due.len()
    }

    pub fn try_spawn(&mut self, now_ms: f64) -> Option<ParticleId> {
        if self.due.len() >= self.cap {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.due.insert(id, now_ms + self.lifetime_ms);
        Some(id)
    }

    /// Removes and returns every particle whose lifetime has run out by `now_ms`.
    pub fn expire_due(&mut self, now_ms: f64) -> Vec<ParticleId> {
        let expired: Vec<ParticleId> = self
            .due
            .iter()
            .filter(|(_, due)| **due <= now_ms)
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.due.remove(id);
        }
        expired
    }

    /// Returns false for ids that were never live or already released.
    pub fn release(&mut self, id: ParticleId) -> bool {
        self.due.remove(&id).is_some()
    }

    pub fn clear(&mut self) -> usize {
        let live = self.due.len();
        self.due.clear();
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pool_refuses_past_cap_and_reopens_on_release() {
        let mut pool = ParticlePool::new(2, 9_000);

        let first = pool.try_spawn(0.0).expect("room for first");
        pool.try_spawn(0.0).expect("room for second");
        assert_eq!(pool.try_spawn(0.0), None);

        assert!(pool.release(first));
        assert!(!pool.release(first));
        assert!(pool.try_spawn(0.0).is_some());
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn particles_expire_exactly_at_their_lifetime() {
        let mut pool = ParticlePool::new(15, 9_000);
        let early = pool.try_spawn(0.0).expect("room");
        let late = pool.try_spawn(800.0).expect("room");

        assert!(pool.expire_due(8_999.0).is_empty());
        assert_eq!(pool.expire_due(9_000.0), vec![early]);
        assert_eq!(pool.live_count(), 1);

        assert!(pool.expire_due(9_500.0).is_empty());
        assert_eq!(pool.expire_due(9_800.0), vec![late]);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn expiry_frees_room_under_the_cap() {
        let mut pool = ParticlePool::new(1, 9_000);
        pool.try_spawn(0.0).expect("room");
        assert_eq!(pool.try_spawn(800.0), None);

        pool.expire_due(9_000.0);

        assert!(pool.try_spawn(9_000.0).is_some());
    }

    #[test]
    fn clear_forgets_every_live_particle() {
        let mut pool = ParticlePool::new(3, 9_000);
        pool.try_spawn(0.0);
        pool.try_spawn(0.0);

        assert_eq!(pool.clear(), 2);
        assert_eq!(pool.live_count(), 0);
        assert!(pool.expire_due(f64::MAX).is_empty());
    }

    #[test]
    fn style_fits_inside_lifetime_for_extreme_draws() {
        for draw in [0.0, 0.5, 0.999_999] {
            let style = ParticleStyle::random(9_000, &mut || draw);
            assert!(style.delay_s + style.duration_s <= 9.0 + 1e-9);
            assert!((6.0..=9.0).contains(&style.duration_s));
            assert!((2.0..5.0).contains(&style.size_px));
        }
    }

    #[test]
    fn css_sets_square_size() {
        let style = ParticleStyle {
            left_percent: 12.0,
            delay_s: 1.0,
            duration_s: 7.5,
            size_px: 3.0,
        };

        let css = style.css();
        assert!(css.contains("left: 12.00%"));
        assert!(css.contains("animation-duration: 7.50s"));
        assert!(css.contains("width: 3.00px; height: 3.00px"));
    }

    proptest! {
        #[test]
        fn live_count_never_exceeds_cap(
            cap in 0usize..20,
            ops in prop::collection::vec(any::<Option<prop::sample::Index>>(), 0..200),
        ) {
            let mut pool = ParticlePool::new(cap, 9_000);
            let mut spawned: Vec<ParticleId> = Vec::new();

            for op in ops {
                match op {
                    None => {
                        if let Some(id) = pool.try_spawn(0.0) {
                            spawned.push(id);
                        }
                    }
                    Some(index) if !spawned.is_empty() => {
                        let id = spawned.swap_remove(index.index(spawned.len()));
                        prop_assert!(pool.release(id));
                    }
                    Some(_) => {}
                }

                prop_assert!(pool.live_count() <= cap);
                prop_assert_eq!(pool.live_count(), spawned.len());
            }
        }

        #[test]
        fn random_style_stays_in_range(draws in prop::collection::vec(0.0f64..1.0, 4), lifetime in 6_000u32..60_000) {
            let mut draws = draws.into_iter();
            let style = ParticleStyle::random(lifetime, &mut || draws.next().unwrap_or(0.0));

            prop_assert!((0.0..100.0).contains(&style.left_percent));
            prop_assert!(style.delay_s >= 0.0);
            prop_assert!(style.delay_s + style.duration_s <= f64::from(lifetime) / 1_000.0 + 1e-9);
        }

        #[test]
        fn no_particle_outlives_its_lifetime(
            spawn_gaps in prop::collection::vec(0u32..2_000, 1..40),
            lifetime in 6_000u32..20_000,
        ) {
            let mut pool = ParticlePool::new(15, lifetime);
            let mut now = 0.0;
            let mut born = std::collections::HashMap::new();

            for gap in spawn_gaps {
                now += f64::from(gap);
                for id in pool.expire_due(now) {
                    let spawned_at: f64 = born.remove(&id).expect("expired id was live");
                    prop_assert!(now - spawned_at >= f64::from(lifetime));
                }
                if let Some(id) = pool.try_spawn(now) {
                    born.insert(id, now);
                }
                prop_assert!(born.values().all(|spawned_at| now - spawned_at < f64::from(lifetime)));
            }
        }
    }
}
