//! The fixed palette mapping color identifiers to RGB.

use crate::types::Color;

/// RGB values indexed by color identifier. Entry 0 is the background.
pub const DEFAULT_PALETTE: [[u8; 3]; 6] = [
    [0, 0, 0],
    [125, 0, 0],
    [0, 125, 0],
    [0, 0, 125],
    [125, 0, 125],
    [255, 255, 255],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Creates a palette from explicit entries.
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self { colors }
    }

    /// The RGB value for `color`, if the palette has it.
    pub fn rgb(&self, color: Color) -> Option<[u8; 3]> {
        self.colors.get(color as usize).copied()
    }

    pub fn contains(&self, color: Color) -> bool {
        (color as usize) < self.colors.len()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.rgb(0), Some([0, 0, 0]));
        assert_eq!(palette.rgb(5), Some([255, 255, 255]));
        assert_eq!(palette.rgb(6), None);
        assert!(palette.contains(4));
        assert!(!palette.contains(6));
    }
}
