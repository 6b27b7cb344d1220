pub mod animation;
pub mod cursor;
pub mod particles;
pub mod rays;
pub mod tilt;
