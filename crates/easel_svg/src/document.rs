//! SVG document assembly

use std::fmt::Write as _;
use std::io;

use easel_core::{Model, Shape, ShapeKind};

use crate::animate::{Attributes, SvgAnimate, Timing};
use crate::error::SvgError;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Document-level export settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SvgOptions {
    /// Viewport width; the canvas width when unset
    pub width: Option<u32>,
    /// Viewport height; the canvas height when unset
    pub height: Option<u32>,
    /// Restart the animation when the last shape finishes
    pub looping: bool,
}

impl SvgOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

/// Render `model` as an SVG document
pub fn render(model: &Model, options: &SvgOptions) -> Result<String, SvgError> {
    let timing = Timing::new(model.tempo(), options.looping)?;
    let bounds = model.bounds();
    let width = options.width.map_or(i64::from(bounds.width()), i64::from);
    let height = options.height.map_or(i64::from(bounds.height()), i64::from);

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg width="{}" height="{}" viewBox="{} {} {} {}" version="1.1" xmlns="{}">"#,
        width,
        height,
        bounds.x(),
        bounds.y(),
        bounds.width(),
        bounds.height(),
        SVG_NAMESPACE
    )?;

    if timing.is_looping() {
        // Every begin is offset from this timer, which restarts itself
        let period = timing.scaled_millis(model.final_tick()).max(1);
        writeln!(out, r#"<rect width="0" height="0" visibility="hidden">"#)?;
        writeln!(
            out,
            r#"<animate id="base" begin="0;base.end" dur="{}ms" attributeName="visibility" from="hidden" to="hidden"/>"#,
            period
        )?;
        writeln!(out, "</rect>")?;
    }

    for shape in model.iter() {
        write_shape(&mut out, shape, &timing)?;
    }
    writeln!(out, "</svg>")?;

    tracing::debug!(
        "SVG: rendered {} shapes at {} ticks/s (looping: {})",
        model.len(),
        timing.tempo(),
        timing.is_looping()
    );
    Ok(out)
}

/// Render `model` and write the document to `out`
pub fn write_svg<W: io::Write>(
    model: &Model,
    options: &SvgOptions,
    mut out: W,
) -> Result<(), SvgError> {
    let document = render(model, options)?;
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn write_shape(out: &mut String, shape: &Shape, timing: &Timing) -> Result<(), SvgError> {
    let tag = match shape.kind() {
        ShapeKind::Rectangle => "rect",
        ShapeKind::Ellipse => "ellipse",
    };
    let names = Attributes::of(shape.kind());
    let origin = shape.origin();

    writeln!(
        out,
        r#"<{} id="{}" {}="{}" {}="{}" {}="{}" {}="{}" fill="{}" visibility="hidden">"#,
        tag,
        escape(shape.name()),
        names.x,
        origin.x,
        names.y,
        origin.y,
        names.width,
        origin.width,
        names.height,
        origin.height,
        origin.color
    )?;
    for (tick, visibility) in [
        (shape.start_time(), "visible"),
        (shape.end_time(), "hidden"),
    ] {
        writeln!(
            out,
            r#"<set attributeType="xml" begin="{}" attributeName="visibility" to="{}"/>"#,
            timing.begin(timing.scaled_millis(tick)),
            visibility
        )?;
    }
    for animation in shape.timeline() {
        animation.write_animate(out, shape, timing)?;
    }
    writeln!(out, "</{}>", tag)?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
