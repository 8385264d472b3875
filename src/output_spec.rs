//! The fixed table of iOS icon variants derived from the canonical render

use crate::error::{IconError, Result};
use serde::Serialize;
use std::fmt;

/// Device class an icon variant targets
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Idiom {
    Universal,
    Iphone,
    Ipad,
}

impl Idiom {
    /// The manifest spelling of the idiom
    pub fn as_str(self) -> &'static str {
        match self {
            Idiom::Universal => "universal",
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
        }
    }
}

impl fmt::Display for Idiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen scale factor, serialized as `1x` / `2x` / `3x`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    #[serde(rename = "1x")]
    X1,
    #[serde(rename = "2x")]
    X2,
    #[serde(rename = "3x")]
    X3,
}

impl Scale {
    /// Pixels per logical point
    pub fn factor(self) -> u32 {
        match self {
            Scale::X1 => 1,
            Scale::X2 => 2,
            Scale::X3 => 3,
        }
    }

    /// The manifest spelling, also used as the label suffix after `@`
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::X1 => "1x",
            Scale::X2 => "2x",
            Scale::X3 => "3x",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One derived icon file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSpec {
    /// Edge length of the written PNG in pixels
    pub pixel_size: u32,
    /// Logical size with an optional `@Nx` suffix, e.g. `60x60@3x`
    pub label: &'static str,
    /// Device class recorded in the manifest
    pub idiom: Idiom,
    /// `None` for the universal App Store entry
    pub scale: Option<Scale>,
}

const fn spec(
    pixel_size: u32,
    label: &'static str,
    idiom: Idiom,
    scale: Option<Scale>,
) -> OutputSpec {
    OutputSpec {
        pixel_size,
        label,
        idiom,
        scale,
    }
}

/// Every variant written to the asset catalog, in manifest order.
pub const OUTPUT_SPECS: [OutputSpec; 10] = [
    spec(1024, "1024x1024", Idiom::Universal, None),
    spec(180, "60x60@3x", Idiom::Iphone, Some(Scale::X3)),
    spec(120, "60x60@2x", Idiom::Iphone, Some(Scale::X2)),
    spec(167, "83.5x83.5@2x", Idiom::Ipad, Some(Scale::X2)),
    spec(152, "76x76@2x", Idiom::Ipad, Some(Scale::X2)),
    spec(76, "76x76", Idiom::Ipad, Some(Scale::X1)),
    spec(58, "29x29@2x", Idiom::Iphone, Some(Scale::X2)),
    spec(87, "29x29@3x", Idiom::Iphone, Some(Scale::X3)),
    spec(80, "40x40@2x", Idiom::Iphone, Some(Scale::X2)),
    spec(120, "40x40@3x", Idiom::Iphone, Some(Scale::X3)),
];

impl OutputSpec {
    /// File name inside the icon set, `icon_<label>.png`
    pub fn filename(&self) -> String {
        format!("icon_{}.png", self.label)
    }

    /// Logical point size, the label without its scale suffix (`60x60`).
    pub fn logical_size(&self) -> &'static str {
        match self.label.split_once('@') {
            Some((size, _)) => size,
            None => self.label,
        }
    }

    /// Checks the entry is self-consistent: a positive square logical size whose
    /// scale agrees with the label suffix and multiplies out to `pixel_size`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |why: String| IconError::invalid_spec(format!("{}: {why}", self.label));

        if self.pixel_size == 0 {
            return Err(invalid("pixel size must be positive".to_string()));
        }

        let (w, h) = self
            .logical_size()
            .split_once('x')
            .ok_or_else(|| invalid("logical size must look like WxH".to_string()))?;
        let parse = |s: &str| {
            s.parse::<f32>()
                .map_err(|_| invalid(format!("`{s}` is not a number")))
        };
        let (w, h) = (parse(w)?, parse(h)?);
        if w <= 0.0 || h <= 0.0 {
            return Err(invalid("logical size must be positive".to_string()));
        }
        if w != h {
            return Err(invalid(format!("icon must be square, got {w}x{h}")));
        }

        let suffix = self.label.split_once('@').map(|(_, s)| s);
        let factor = match (suffix, self.scale) {
            (None, None) | (None, Some(Scale::X1)) => 1,
            (Some(s), Some(scale)) if s == scale.as_str() => scale.factor(),
            (suffix, scale) => {
                return Err(invalid(format!(
                    "label suffix {suffix:?} disagrees with scale {scale:?}"
                )))
            }
        };

        let expected = w * factor as f32;
        if (expected - self.pixel_size as f32).abs() > 0.5 {
            return Err(invalid(format!(
                "{w} points at {factor}x is {expected}px, not {}px",
                self.pixel_size
            )));
        }
        Ok(())
    }
}

/// Validates a whole table before anything is rendered.
pub fn validate_specs(specs: &[OutputSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(IconError::invalid_spec("no output sizes requested"));
    }
    specs.iter().try_for_each(OutputSpec::validate)
}
