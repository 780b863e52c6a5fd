// Shared colors for the renderer and the egui overlay.

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [18, 18, 30];
pub const TRACK: Rgb = [70, 70, 90];
pub const GRASS: Rgb = [30, 120, 50];
pub const WHITE: Rgb = [240, 240, 240];
pub const YELLOW: Rgb = [255, 210, 0];
pub const BOOST: Rgb = [120, 200, 255];
pub const SLOW: Rgb = [220, 40, 40];
pub const WHEEL: Rgb = [0, 0, 0];

/// sRGB byte color to linear floats, for writing into an sRGB surface.
pub fn to_linear(color: Rgb) -> [f32; 4] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
    };
    [channel(color[0]), channel(color[1]), channel(color[2]), 1.0]
}

pub fn to_egui(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}
