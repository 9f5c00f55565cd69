//! Rainbow colormap for tile classes

/// RGBA colour of `x` in `[0, 1]` on the rainbow colormap
///
/// `r = |2x - 1|`, `g = sin(pi x)`, `b = cos(pi x / 2)`.
pub fn rainbow(x: f32) -> [u8; 4] {
    let x = x.clamp(0.0, 1.0);
    let r = (2.0 * x - 1.0).abs();
    let g = (std::f32::consts::PI * x).sin();
    let b = (std::f32::consts::FRAC_PI_2 * x).cos();
    [to_byte(r), to_byte(g), to_byte(b), u8::MAX]
}

/// Colour of tile `class` out of `tile_classes`
pub fn tile_color(class: usize, tile_classes: usize) -> [u8; 4] {
    rainbow(class as f32 / tile_classes.max(1) as f32)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
