//! Textual view

use std::fmt::{self, Write};

use easel_core::animation::state_fields;
use easel_core::{Model, Shape, ShapeState, Tick};

/// Render a whole model: the canvas line, then every shape in declaration
/// order
pub fn render(model: &Model) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_model(model, &mut out);
    out
}

/// Write a model into any formatter sink
pub fn write_model<W: Write>(model: &Model, out: &mut W) -> fmt::Result {
    writeln!(out, "{}", model.bounds())?;
    for shape in model.iter() {
        write_shape(shape, out)?;
    }
    tracing::debug!("Text: rendered {} shapes", model.len());
    Ok(())
}

/// Render one shape: its `shape` line and its `motion` lines
pub fn render_shape(shape: &Shape) -> String {
    let mut out = String::new();
    let _ = write_shape(shape, &mut out);
    out
}

/// Write one shape into any formatter sink
///
/// A keyframed shape gets one motion per consecutive keyframe pair, led by
/// the first keyframe paired with itself, each keyframe stamped with its end
/// time. A shape driven by registered animations is cut at every animation
/// boundary instead, with one full-state motion per stretch between
/// boundaries and one per jump.
pub fn write_shape<W: Write>(shape: &Shape, out: &mut W) -> fmt::Result {
    writeln!(out, "shape {} {}", shape.name(), shape.kind())?;

    let keyframes = shape.keyframes();
    let Some(first) = keyframes.first() else {
        return write_segments(shape, out);
    };

    let mut previous = first;
    for current in keyframes {
        write_motion(
            out,
            shape.name(),
            (previous.end_time(), &previous.snapshot()),
            (current.end_time(), &current.snapshot()),
        )?;
        previous = current;
    }
    Ok(())
}

fn write_segments<W: Write>(shape: &Shape, out: &mut W) -> fmt::Result {
    let mut ticks: Vec<Tick> = shape
        .timeline()
        .iter()
        .flat_map(|a| [a.start(), a.end()])
        .collect();
    ticks.sort_unstable();
    ticks.dedup();

    let Some(&first) = ticks.first() else {
        return Ok(());
    };
    let mut previous = (first, shape.state_entering(first));
    write_motion(out, shape.name(), (previous.0, &previous.1), (previous.0, &previous.1))?;

    for tick in ticks {
        let entering = shape.state_entering(tick);
        if tick > previous.0 {
            write_motion(out, shape.name(), (previous.0, &previous.1), (tick, &entering))?;
            previous = (tick, entering);
        }
        let landed = shape.state_at(tick);
        if landed != entering {
            write_motion(out, shape.name(), (tick, &entering), (tick, &landed))?;
            previous = (tick, landed);
        }
    }
    Ok(())
}

fn write_motion<W: Write>(
    out: &mut W,
    name: &str,
    from: (Tick, &ShapeState),
    to: (Tick, &ShapeState),
) -> fmt::Result {
    writeln!(
        out,
        "motion {} {} {} {} {}",
        name,
        from.0,
        state_fields(from.1),
        to.0,
        state_fields(to.1)
    )
}
