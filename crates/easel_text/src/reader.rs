//! Declarative script reader
//!
//! Each non-blank line is one directive:
//!
//! ```text
//! canvas   <x> <y> <w> <h>
//! shape    <name> <rectangle|ellipse>
//! motion   <name> <t1> <x1> <y1> <w1> <h1> <r1> <g1> <b1> <t2> <x2> <y2> <w2> <h2> <r2> <g2> <b2>
//! keyframe <name> <t> <x> <y> <w> <h> <r> <g> <b>
//! ```
//!
//! `#` starts a comment. Motion lines are replayed as keyframes so that the
//! textual view reads back into the same keyframe timeline.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use easel_core::{Builder, Model, Snapshot};

use crate::error::ScriptError;

/// Reads scripts into a [`Model`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptReader {
    /// Skip lines the model rejects instead of failing
    lenient: bool,
}

impl ScriptReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// In lenient mode, lines rejected by the model (unknown shapes,
    /// conflicting motions) are logged and skipped. Malformed lines still
    /// fail.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn read_str(&self, script: &str) -> Result<Model, ScriptError> {
        self.read(script.as_bytes())
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Model, ScriptError> {
        let script = fs::read_to_string(path.as_ref())?;
        tracing::debug!("Script: reading {}", path.as_ref().display());
        self.read_str(&script)
    }

    /// Read a script from any buffered source
    pub fn read<R: BufRead>(&self, source: R) -> Result<Model, ScriptError> {
        let mut builder = Builder::new();
        self.replay(source, &mut builder)?;
        Ok(builder.build())
    }

    /// Replay every directive of `source` into `builder`
    pub fn replay<R: BufRead>(&self, source: R, builder: &mut Builder) -> Result<(), ScriptError> {
        for (index, line) in source.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if let Some(directive) = Directive::parse(&line, number)? {
                self.apply(directive, builder, number)?;
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        directive: Directive<'_>,
        builder: &mut Builder,
        line: usize,
    ) -> Result<(), ScriptError> {
        let outcome = match directive {
            Directive::Canvas([x, y, w, h]) => {
                builder.set_bounds(x, y, w, h);
                Ok(())
            }
            Directive::Shape { name, kind } => builder.declare_shape(name, kind).map(|_| ()),
            Directive::Motion { name, from, to } => {
                builder.add_keyframed_motion(name, from, to).map(|_| ())
            }
            Directive::Keyframe { name, at } => builder.add_keyframe(name, at).map(|_| ()),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) if self.lenient => {
                tracing::warn!("Script: skipping line {}: {}", line, err);
                Ok(())
            }
            Err(source) => Err(ScriptError::Model { line, source }),
        }
    }
}

/// Read a script string strictly
pub fn read_script(script: &str) -> Result<Model, ScriptError> {
    ScriptReader::new().read_str(script)
}

/// Read a script file strictly
pub fn read_file(path: impl AsRef<Path>) -> Result<Model, ScriptError> {
    ScriptReader::new().read_file(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Line parsing
// ─────────────────────────────────────────────────────────────────────────────

enum Directive<'a> {
    Canvas([i32; 4]),
    Shape {
        name: &'a str,
        kind: &'a str,
    },
    Motion {
        name: &'a str,
        from: Snapshot,
        to: Snapshot,
    },
    Keyframe {
        name: &'a str,
        at: Snapshot,
    },
}

impl<'a> Directive<'a> {
    /// `None` for blank and comment lines
    fn parse(line: &'a str, number: usize) -> Result<Option<Self>, ScriptError> {
        let content = line.split('#').next().unwrap_or_default();
        let mut words = content.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&'a str> = words.collect();

        let directive = match keyword {
            "canvas" => Directive::Canvas(integers(&rest, number)?),
            "shape" => match rest.as_slice() {
                &[name, kind] => Directive::Shape { name, kind },
                _ => return Err(arity(keyword, "a name and a kind", number)),
            },
            "motion" => match rest.split_first() {
                Some((&name, values)) if values.len() == 16 => {
                    let values: [i32; 16] = integers(values, number)?;
                    Directive::Motion {
                        name,
                        from: snapshot(&values[..8]),
                        to: snapshot(&values[8..]),
                    }
                }
                _ => return Err(arity(keyword, "a name and 16 integers", number)),
            },
            "keyframe" => match rest.split_first() {
                Some((&name, values)) if values.len() == 8 => {
                    let values: [i32; 8] = integers(values, number)?;
                    Directive::Keyframe {
                        name,
                        at: snapshot(&values),
                    }
                }
                _ => return Err(arity(keyword, "a name and 8 integers", number)),
            },
            other => {
                return Err(ScriptError::parse(
                    number,
                    format!("unknown directive '{}'", other),
                ))
            }
        };
        Ok(Some(directive))
    }
}

fn integers<const N: usize>(words: &[&str], line: usize) -> Result<[i32; N], ScriptError> {
    if words.len() != N {
        return Err(ScriptError::parse(
            line,
            format!("expected {} integers, got {}", N, words.len()),
        ));
    }
    let mut values = [0; N];
    for (slot, word) in values.iter_mut().zip(words) {
        *slot = word
            .parse()
            .map_err(|_| ScriptError::parse(line, format!("expected an integer, got '{}'", word)))?;
    }
    Ok(values)
}

fn snapshot(v: &[i32]) -> Snapshot {
    Snapshot::new(v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7])
}

fn arity(keyword: &str, expected: &str, line: usize) -> ScriptError {
    ScriptError::parse(line, format!("'{}' takes {}", keyword, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::render;
    use easel_core::{AnimatorError, Keyframe, Rgb, ShapeKind};

    const SCRIPT: &str = "\
# two shapes
canvas 10 20 300 200

shape R rectangle
shape C ellipse
motion R 1 200 200 50 100 255 0 0   10 200 200 50 100 255 0 0
motion R 10 200 200 50 100 255 0 0  50 300 300 50 100 255 0 0
motion C 6 440 70 120 60 0 0 255    20 440 70 120 60 0 0 255
keyframe C 50 440 250 120 60 0 170 85  # drifts down
";

    fn tuples(model: &Model, name: &str) -> Vec<(u32, u32, i32, i32, u32, u32, Rgb)> {
        model
            .find(name)
            .unwrap()
            .keyframes()
            .iter()
            .map(|k: &Keyframe| {
                (
                    k.start_time(),
                    k.end_time(),
                    k.x(),
                    k.y(),
                    k.width(),
                    k.height(),
                    k.color(),
                )
            })
            .collect()
    }

    #[test]
    fn test_read_script() {
        let model = read_script(SCRIPT).unwrap();
        assert_eq!(model.bounds().to_string(), "canvas 10 20 300 200");
        assert_eq!(model.len(), 2);
        assert!(model.shape(ShapeKind::Ellipse, "C").is_some());

        let r = model.find("R").unwrap();
        let ends: Vec<_> = r.keyframes().iter().map(Keyframe::end_time).collect();
        assert_eq!(ends, vec![1, 10, 50]);
        assert_eq!((r.start_time(), r.end_time()), (1, 50));
        assert_eq!(r.state_at(30).x, 250);

        let c = model.find("C").unwrap();
        assert_eq!(c.keyframes().last().unwrap().color(), Rgb::new(0, 170, 85));
    }

    #[test]
    fn test_round_trip() {
        let model = read_script(SCRIPT).unwrap();
        let text = render(&model);
        let reread = read_script(&text).unwrap();

        assert_eq!(reread.bounds(), model.bounds());
        assert_eq!(reread.shapes(), model.shapes());
        for name in ["R", "C"] {
            assert_eq!(tuples(&reread, name), tuples(&model, name));
        }
        assert_eq!(render(&reread), text);
    }

    #[test]
    fn test_motion_gaps_and_jumps() {
        let script = "\
shape r rectangle
motion r 1 0 0 10 10 0 0 0   10 90 0 10 10 0 0 0
motion r 20 90 0 10 10 0 0 0 30 0 0 10 10 0 0 0
motion r 30 50 50 10 10 0 0 0 40 50 50 10 10 0 0 0
";
        let model = read_script(script).unwrap();
        let r = model.find("r").unwrap();

        assert_eq!(r.state_at(15).x, 90);
        assert_eq!(r.state_at(25).x, 45);
        assert_eq!((r.state_at(30).x, r.state_at(30).y), (50, 50));
        assert_eq!((r.start_time(), r.end_time()), (1, 40));

        let reread = read_script(&render(&model)).unwrap();
        assert_eq!(tuples(&reread, "r"), tuples(&model, "r"));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = read_script("canvas 0 0 10 10\nshape r\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));

        let err = read_script("canvas 0 0 ten 10\n").unwrap_err();
        assert_eq!(err.line(), Some(1));

        let err = read_script("shape r rectangle\nmotion r 1 2 3\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));

        let err = read_script("triangle t\n").unwrap_err();
        assert!(err.to_string().contains("unknown directive"));
    }

    #[test]
    fn test_model_errors_carry_line_numbers() {
        let script = "shape r rectangle\nkeyframe ghost 1 0 0 5 5 0 0 0\n";
        let err = read_script(script).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Model {
                line: 2,
                source: AnimatorError::NotFound(_)
            }
        ));

        let err = read_script("shape r rectangle\nshape r rectangle\n").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Model {
                source: AnimatorError::DuplicateShape { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_lenient_skips_rejected_lines() {
        let script = "shape r rectangle\n\
                      keyframe ghost 1 0 0 5 5 0 0 0\n\
                      keyframe r 1 0 0 0 5 0 0 0\n\
                      keyframe r 4 0 0 5 5 0 0 0\n";
        let model = ScriptReader::new().lenient(true).read_str(script).unwrap();
        assert_eq!(model.find("r").unwrap().keyframes().len(), 1);

        // Malformed lines are never skipped
        let reader = ScriptReader::new().lenient(true);
        assert!(reader.read_str("keyframe r 1 2\n").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file("/nonexistent/easel/script.txt").unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }
}
