// Selectable racers. Fixed at startup, never mutated.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub name: &'static str,
    /// sRGB body color.
    pub color: [u8; 3],
}

pub const ROSTER: [Character; 4] = [
    Character { name: "Nova", color: [235, 75, 75] },
    Character { name: "Bolt", color: [80, 200, 120] },
    Character { name: "Violet", color: [120, 90, 220] },
    Character { name: "Blaze", color: [230, 150, 40] },
];
