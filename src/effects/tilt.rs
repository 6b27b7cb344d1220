pub const NEUTRAL_TRANSFORM: &str = "perspective(1000px) rotateX(0deg) rotateY(0deg) translateZ(0px)";
pub const GLOW_SHADOW: &str = "0 0 30px rgba(245, 158, 11, 0.6)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// Rotation for a pointer at client coordinates over `rect`. The card leans
    /// away from the pointer, scaled down by `damping`.
    pub fn toward(rect: CardRect, client_x: f64, client_y: f64, damping: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;

        Self {
            rotate_x: (y - center_y) / damping,
            rotate_y: (center_x - x) / damping,
        }
    }

    pub fn transform(self) -> String {
        format!(
            "perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg) translateZ(20px)",
            self.rotate_x, self.rotate_y
        )
    }
}
