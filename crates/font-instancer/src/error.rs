use std::result;

use read_fonts::{ReadError, types::Tag};
use write_fonts::{BuilderError, error};

/// Errors produced while instancing a variable font.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("not a variable font (no fvar table)")]
    NotVariableFont,

    #[error("font has no glyf outlines (CFF/CFF2 is not supported)")]
    UnsupportedOutlines,

    #[error("no gvar table")]
    NoGvar,

    #[error("axis '{0}' not present in font")]
    UnknownAxis(Tag),

    #[error("value {value} out of range for axis '{tag}' ({min}..{max})")]
    ValueOutOfRange {
        tag: Tag,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("failed to assemble font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to compile table: {0}")]
    Table(#[from] error::Error),
}

pub type Result<T> = result::Result<T, Error>;
