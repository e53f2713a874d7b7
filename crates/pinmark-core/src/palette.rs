// License: MIT

use crate::colour::Colour;
use crate::prefs::PrefStore;

pub const FIXED_PALETTE_PREFIX: &str = "fixed.palette.color.";

pub const DEFAULT_PALETTE: [Colour; 9] = [
    Colour::rgb(0, 0, 0),
    Colour::rgb(255, 255, 255),
    Colour::rgb(255, 0, 0),
    Colour::rgb(255, 165, 0),
    Colour::rgb(255, 255, 0),
    Colour::rgb(0, 128, 0),
    Colour::rgb(0, 0, 255),
    Colour::rgb(128, 0, 128),
    Colour::rgb(75, 0, 130),
];

pub fn reset_to_defaults(prefs: &mut dyn PrefStore) {
    for (i, c) in DEFAULT_PALETTE.iter().enumerate() {
        prefs.set(&format!("{FIXED_PALETTE_PREFIX}{i}"), &c.to_hex());
    }
}

/// Palette as stored, slot by slot; unparsable slots keep their default.
pub fn load(prefs: &dyn PrefStore) -> [Colour; 9] {
    let mut out = DEFAULT_PALETTE;
    for (i, slot) in out.iter_mut().enumerate() {
        if let Some(c) = prefs
            .get(&format!("{FIXED_PALETTE_PREFIX}{i}"))
            .and_then(|s| Colour::parse_hex(&s).ok())
        {
            *slot = c;
        }
    }
    out
}
