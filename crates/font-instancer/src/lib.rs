//! # Font Instancer
//!
//! Pin the variation axes of a variable TrueType font to fixed values and
//! produce a standard static font, with all variation data removed.
//!
//! This is the engine behind the `generate-static-fonts` batch tool, which
//! derives the fixed-weight fonts an application bundles when runtime font
//! fetching is disabled.
//!
//! ## Example
//!
//! ```no_run
//! use font_instancer::{AxisLocation, instantiate};
//!
//! let vf = std::fs::read("NotoSansMono[wdth,wght].ttf").unwrap();
//! let pins = [
//!     AxisLocation::new("wght", 700.0),
//!     AxisLocation::new("wdth", 100.0),
//! ];
//! let static_font = instantiate(&vf, &pins).unwrap();
//! std::fs::write("NotoSansMono-Bold.ttf", static_font).unwrap();
//! ```
//!
//! Requested axes must exist in the font and values must lie within the
//! declared axis ranges; anything else is rejected before any table is
//! rebuilt.

mod error;
mod glyf;
mod instancer;

pub use error::{Error, Result};
pub use instancer::instantiate;
use read_fonts::types::Tag;

/// A single axis pin: tag plus user-space value.
///
/// Values are in design units, as a user would write them in font
/// variation settings (`wght=700` for Bold, `wdth=100` for normal width).
#[derive(Debug, Clone, Copy)]
pub struct AxisLocation {
    pub tag: Tag,
    pub value: f32,
}

impl AxisLocation {
    /// Build a pin from a tag string, padding short tags with spaces.
    ///
    /// ```
    /// use font_instancer::AxisLocation;
    /// let bold = AxisLocation::new("wght", 700.0);
    /// ```
    pub fn new(tag: &str, value: f32) -> Self {
        let mut bytes = [b' '; 4];
        for (dst, src) in bytes.iter_mut().zip(tag.as_bytes()) {
            *dst = *src;
        }
        Self {
            tag: Tag::new(&bytes),
            value,
        }
    }
}

impl From<(&str, f32)> for AxisLocation {
    fn from((tag, value): (&str, f32)) -> Self {
        Self::new(tag, value)
    }
}

impl From<(Tag, f32)> for AxisLocation {
    fn from((tag, value): (Tag, f32)) -> Self {
        Self { tag, value }
    }
}
