//! Stroke styling for editable paths.

use kurbo::{Cap, Join, Stroke};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    /// CSS `lightblue`.
    pub const fn light_blue() -> Self {
        Self::new(173, 216, 230, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl From<LineCap> for Cap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        }
    }
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl From<LineJoin> for Join {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        }
    }
}

/// Presentation attributes of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Cap style for open ends.
    #[serde(default)]
    pub cap: LineCap,
    /// Join style between segments.
    #[serde(default)]
    pub join: LineJoin,
    /// Alternating dash/gap lengths (None = solid).
    #[serde(default)]
    pub dash: Option<Vec<f64>>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::new(0, 0, 0, 255),
            stroke_width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            dash: None,
        }
    }
}

impl PathStyle {
    /// Style of the committed (authoritative) path.
    pub fn committed() -> Self {
        Self {
            stroke_color: SerializableColor::red(),
            stroke_width: 3.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
            dash: None,
        }
    }

    /// Style of the in-progress preview path.
    pub fn preview() -> Self {
        Self {
            stroke_color: SerializableColor::light_blue(),
            ..Self::default()
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Build the kurbo stroke description for rendering.
    pub fn to_stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.stroke_width)
            .with_caps(self.cap.into())
            .with_join(self.join.into());
        match &self.dash {
            Some(pattern) if !pattern.is_empty() => stroke.with_dashes(0.0, pattern.iter().copied()),
            _ => stroke,
        }
    }
}
