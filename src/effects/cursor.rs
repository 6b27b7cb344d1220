pub const MAGNETIC_SELECTOR: &str = ".card-hover, .nav-link, .glow-button, .metric-card";

/// Half the follower's size; its box is centred on the smoothed point.
const CURSOR_RADIUS_PX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorLook {
    pub transform: &'static str,
    pub background: &'static str,
}

pub const IDLE_LOOK: CursorLook = CursorLook {
    transform: "scale(1)",
    background: "radial-gradient(circle, rgba(245, 158, 11, 0.3) 0%, transparent 70%)",
};

pub const HOVER_LOOK: CursorLook = CursorLook {
    transform: "scale(2)",
    background: "radial-gradient(circle, rgba(245, 158, 11, 0.5) 0%, transparent 70%)",
};

/// Low-pass filter pulling the drawn cursor toward the pointer each frame.
#[derive(Clone, Debug)]
pub struct CursorFollower {
    smoothing: f64,
    x: f64,
    y: f64,
    target_x: f64,
    target_y: f64,
}

impl CursorFollower {
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 1.0),
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
        }
    }

    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target_x = x;
        self.target_y = y;
    }

    #[cfg(test)]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Advances one frame and returns the follower's `(left, top)` in pixels.
    pub fn step(&mut self) -> (f64, f64) {
        self.x += (self.target_x - self.x) * self.smoothing;
        self.y += (self.target_y - self.y) * self.smoothing;
        (self.x - CURSOR_RADIUS_PX, self.y - CURSOR_RADIUS_PX)
    }
}
