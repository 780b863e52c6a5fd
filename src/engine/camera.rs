// Fixed top-down camera over the race arena.
//
// World units are screen units: (0, 0) is the top-left corner of the arena
// and y grows downward, matching the race simulation. The projection maps
// the whole arena onto the window regardless of its pixel size.

use glam::{Mat4, Vec2};

pub struct ArenaCamera {
    /// Arena size in world units.
    pub extent: Vec2,
}

impl ArenaCamera {
    pub fn new(extent: Vec2) -> Self {
        Self { extent }
    }

    /// Orthographic projection with y flipped so +y points down the screen.
    pub fn view_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.extent.x, self.extent.y, 0.0, -1.0, 1.0)
    }
}
