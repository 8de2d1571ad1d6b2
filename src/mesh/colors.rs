//! Cell colors and blending

use glam::Vec4;

/// RGBA color type
pub type CellColor = [f32; 4];

pub const WHITE: CellColor = [1.0, 1.0, 1.0, 1.0];
pub const YELLOW: CellColor = [1.0, 0.92, 0.016, 1.0];
pub const GREEN: CellColor = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: CellColor = [0.0, 0.0, 1.0, 1.0];

/// Editor swatches, in the order a painting tool would present them
pub const PALETTE: [CellColor; 4] = [YELLOW, GREEN, BLUE, WHITE];

/// Linear blend between two colors
#[inline]
pub fn lerp_color(a: CellColor, b: CellColor, t: f32) -> CellColor {
    Vec4::from(a).lerp(Vec4::from(b), t).to_array()
}
