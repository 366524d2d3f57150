//! Glyph ramps
//!
//! A ramp is the ordered run of characters grayscale values are mapped onto,
//! darkest level first by convention. Two presets ship with the crate; any
//! other string of at least two characters can be used as a custom ramp.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The long 70-level ramp
pub const DENSE_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// A 10-level ramp for a cleaner look
pub const SPARSE_RAMP: &str = "@%#*+=-:. ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RampError {
    #[error("a glyph ramp needs at least 2 characters, got {len}")]
    TooShort { len: usize },

    #[error("unknown ramp preset '{0}' (expected 'dense' or 'sparse')")]
    UnknownPreset(String),
}

/// Named ramp presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampPreset {
    #[default]
    Dense,
    Sparse,
}

impl RampPreset {
    pub fn chars(&self) -> &'static str {
        match self {
            RampPreset::Dense => DENSE_RAMP,
            RampPreset::Sparse => SPARSE_RAMP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RampPreset::Dense => "dense",
            RampPreset::Sparse => "sparse",
        }
    }

    pub fn ramp(&self) -> GlyphRamp {
        GlyphRamp(self.chars().chars().collect())
    }
}

impl FromStr for RampPreset {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(RampPreset::Dense),
            "sparse" => Ok(RampPreset::Sparse),
            other => Err(RampError::UnknownPreset(other.to_string())),
        }
    }
}

/// A validated glyph ramp of at least two characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp(Vec<char>);

impl GlyphRamp {
    pub fn new(chars: &str) -> Result<Self, RampError> {
        let glyphs: Vec<char> = chars.chars().collect();
        if glyphs.len() < 2 {
            return Err(RampError::TooShort { len: glyphs.len() });
        }
        Ok(Self(glyphs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.0
    }

    /// Map a grayscale value onto the ramp
    ///
    /// Index is `value * (len - 1) / 255` with integer division, so 0 picks
    /// the first glyph and 255 the last.
    pub fn glyph_for(&self, value: u8) -> char {
        let index = value as usize * (self.0.len() - 1) / 255;
        self.0[index]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        RampPreset::Dense.ramp()
    }
}

impl fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl FromStr for GlyphRamp {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlyphRamp::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lengths() {
        assert_eq!(RampPreset::Dense.ramp().len(), 70);
        assert_eq!(RampPreset::Sparse.ramp().len(), 10);
    }

    #[test]
    fn test_default_is_dense() {
        assert_eq!(GlyphRamp::default(), RampPreset::Dense.ramp());
        assert_eq!(RampPreset::default(), RampPreset::Dense);
    }

    #[test]
    fn test_two_char_ramp_endpoints() {
        let ramp = GlyphRamp::new("ab").unwrap();
        assert_eq!(ramp.glyph_for(0), 'a');
        assert_eq!(ramp.glyph_for(254), 'a');
        assert_eq!(ramp.glyph_for(255), 'b');
    }

    #[test]
    fn test_glyph_for_never_overruns() {
        for len in 2..=80 {
            let chars: String = (0..len).map(|i| char::from(b'!' + i as u8)).collect();
            let ramp = GlyphRamp::new(&chars).unwrap();
            for v in 0..=255u8 {
                ramp.glyph_for(v);
            }
            assert_eq!(ramp.glyph_for(255), *ramp.glyphs().last().unwrap());
        }
    }

    #[test]
    fn test_sparse_midpoint() {
        let ramp = RampPreset::Sparse.ramp();
        // 128 * 9 / 255 = 4
        assert_eq!(ramp.glyph_for(128), '+');
    }

    #[test]
    fn test_too_short() {
        assert_eq!(GlyphRamp::new(""), Err(RampError::TooShort { len: 0 }));
        assert_eq!(GlyphRamp::new("x"), Err(RampError::TooShort { len: 1 }));
    }

    #[test]
    fn test_multibyte_glyphs_count_as_one() {
        let ramp = GlyphRamp::new(" ░▒▓█").unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.glyph_for(255), '█');
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Dense".parse::<RampPreset>(), Ok(RampPreset::Dense));
        assert_eq!(" sparse ".parse::<RampPreset>(), Ok(RampPreset::Sparse));
        assert!("blocks".parse::<RampPreset>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let ramp = RampPreset::Sparse.ramp();
        assert_eq!(ramp.to_string(), SPARSE_RAMP);
    }
}
