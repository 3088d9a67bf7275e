use crate::error::{Error, Result};
use crate::geometry::limits::MAX_PALETTE_LEN;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (case-insensitive).
    pub fn from_hex(s: &str) -> Result<Color> {
        let bad = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| bad());
        match hex.len() {
            3 => Ok(Color { r: nib(0)?, g: nib(1)?, b: nib(2)?, a: 255 }),
            6 => Ok(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: 255 }),
            8 => Ok(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => Err(bad()),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

// ColorBrewer qualitative schemes
pub const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
pub const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
pub const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

/// Ordered, immutable list of colors. Its length is the K of the K-coloring.
/// Entries are opaque to the assigners; only [`Palette::from_hex`] validates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<String>,
}

impl Palette {
    pub fn new(entries: Vec<String>) -> Palette { Palette { entries } }

    pub fn from_hex(entries: &[&str]) -> Result<Palette> {
        Palette::validated(entries.iter().map(|s| s.to_string()).collect())
    }

    /// Strict constructor: every entry must parse as a hex color.
    pub fn validated(entries: Vec<String>) -> Result<Palette> {
        if entries.len() > MAX_PALETTE_LEN {
            return Err(Error::LimitExceeded { what: "palette", max: MAX_PALETTE_LEN, got: entries.len() });
        }
        for e in &entries {
            Color::from_hex(e)?;
        }
        Ok(Palette { entries })
    }

    pub fn dark2() -> Palette { Palette::new(DARK2.iter().map(|s| s.to_string()).collect()) }

    /// Look up one of the bundled schemes by name.
    pub fn named(name: &str) -> Option<Palette> {
        let src = match name.to_ascii_lowercase().as_str() {
            "dark2" => DARK2,
            "set3" => SET3,
            "paired" => PAIRED,
            _ => return None,
        };
        Some(Palette::new(src.iter().map(|s| s.to_string()).collect()))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, i: usize) -> Option<&str> { self.entries.get(i).map(String::as_str) }

    pub fn entries(&self) -> &[String] { &self.entries }

    /// FNV-1a over the entries, length-prefixed so `["ab"]` and `["a","b"]` differ.
    pub fn fingerprint(&self) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        let mut feed = |bytes: &[u8]| {
            for b in bytes {
                hash ^= *b as u64;
                hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            }
        };
        for e in &self.entries {
            feed(&(e.len() as u64).to_le_bytes());
            feed(e.as_bytes());
        }
        hash
    }
}

impl Default for Palette {
    fn default() -> Self { Palette::dark2() }
}
