//! SMIL timing and per-animation `<animate>` tags

use std::fmt::{self, Write};

use easel_core::{Animation, Change, Shape, ShapeKind, Tick};

use crate::error::SvgError;

/// Tick to millisecond conversion for one document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    tempo: u32,
    looping: bool,
}

impl Timing {
    /// Fails on a zero tempo
    pub fn new(tempo: u32, looping: bool) -> Result<Self, SvgError> {
        if tempo == 0 {
            return Err(SvgError::InvalidTempo(tempo));
        }
        Ok(Self { tempo, looping })
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// `(tick / tempo) * 1000`, truncating the division
    pub fn millis(&self, tick: Tick) -> u64 {
        u64::from(tick / self.tempo) * 1000
    }

    /// `tick * 1000 / tempo`, scaling before the division
    pub fn scaled_millis(&self, tick: Tick) -> u64 {
        u64::from(tick) * 1000 / u64::from(self.tempo)
    }

    /// `begin` attribute value for an offset in milliseconds
    pub fn begin(&self, ms: u64) -> String {
        if self.looping {
            format!("base.begin+{}ms", ms)
        } else {
            format!("{}ms", ms)
        }
    }
}

/// Attribute names a shape kind uses for position and size
#[derive(Clone, Copy, Debug)]
pub(crate) struct Attributes {
    pub x: &'static str,
    pub y: &'static str,
    pub width: &'static str,
    pub height: &'static str,
}

impl Attributes {
    pub fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Self {
                x: "x",
                y: "y",
                width: "width",
                height: "height",
            },
            ShapeKind::Ellipse => Self {
                x: "cx",
                y: "cy",
                width: "rx",
                height: "ry",
            },
        }
    }
}

/// Rendering of an animation as SMIL `<animate>` tags
pub trait SvgAnimate {
    /// Write the `<animate>` tags that play this animation on `shape`
    ///
    /// `from` values are the shape's evaluated state at the animation's
    /// start tick. Attributes that would not change are left out. An
    /// animation lasting zero milliseconds becomes a `<set>` to its target.
    fn write_animate<W: Write>(&self, out: &mut W, shape: &Shape, timing: &Timing) -> fmt::Result;
}

impl SvgAnimate for Animation {
    fn write_animate<W: Write>(&self, out: &mut W, shape: &Shape, timing: &Timing) -> fmt::Result {
        let duration = self.duration_ms(timing.tempo());
        let from = if self.is_instant() {
            shape.state_entering(self.start())
        } else {
            shape.state_at(self.start())
        };
        let to = self.target_over(&from);
        let names = Attributes::of(shape.kind());
        let tracks: Vec<(&str, String, String)> = match self.change() {
            Change::Move { .. } => vec![
                (names.x, from.x.to_string(), to.x.to_string()),
                (names.y, from.y.to_string(), to.y.to_string()),
            ],
            Change::Resize { .. } => vec![
                (names.width, from.width.to_string(), to.width.to_string()),
                (names.height, from.height.to_string(), to.height.to_string()),
            ],
            Change::Recolor(_) => vec![("fill", from.color.to_string(), to.color.to_string())],
        };

        let begin = timing.begin(self.begin_ms(timing.tempo()));
        for (attribute, from, to) in tracks {
            if from == to {
                continue;
            }
            if duration == 0 {
                writeln!(
                    out,
                    r#"<set attributeType="xml" begin="{}" attributeName="{}" to="{}"/>"#,
                    begin, attribute, to
                )?;
                continue;
            }
            writeln!(
                out,
                r#"<animate attributeType="xml" begin="{}" dur="{}ms" attributeName="{}" from="{}" to="{}" fill="freeze"/>"#,
                begin, duration, attribute, from, to
            )?;
        }
        Ok(())
    }
}
