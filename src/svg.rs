//! SVG path data import and export.
//!
//! Import covers the moveto/lineto/curveto/quadratic/closepath command set in
//! absolute and relative forms, including implicit repetition and the smooth
//! (`S`/`T`) control-point reflection rules. Elliptical arcs are rejected
//! with a diagnostic: they have no exact cubic form, and silently
//! approximating would break the bit-for-bit determinism the shape contract
//! promises.

use glam::{DVec2, dvec2};
use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest_derive::Parser;

use crate::errors::PathDataError;
use crate::log::debug;
use crate::path::{Path, PathEl};

#[derive(Parser)]
#[grammar = "pathdata.pest"]
struct PathDataParser;

impl Path {
    /// Parse SVG path data (the `d` attribute) into a path.
    pub fn from_svg(data: &str) -> Result<Path, PathDataError> {
        parse_path_data(data)
    }

    /// Serialize as SVG path data.
    pub fn to_svg(&self) -> String {
        write_path_data(self)
    }
}

// ============================================================================
// Export
// ============================================================================

fn write_path_data(path: &Path) -> String {
    let mut out = String::new();
    for el in path.elements() {
        if !out.is_empty() {
            out.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                out.push_str(&format!("M {} {}", fmt_num(p.x), fmt_num(p.y)));
            }
            PathEl::LineTo(p) => {
                out.push_str(&format!("L {} {}", fmt_num(p.x), fmt_num(p.y)));
            }
            PathEl::QuadTo(c, p) => {
                out.push_str(&format!(
                    "Q {} {} {} {}",
                    fmt_num(c.x),
                    fmt_num(c.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                ));
            }
            PathEl::CurveTo(c1, c2, p) => {
                out.push_str(&format!(
                    "C {} {} {} {} {} {}",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                ));
            }
            PathEl::Close => out.push('Z'),
        }
    }
    out
}

/// Format a number matching C's %g format (6 significant figures, trailing
/// zeros trimmed).
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}

// ============================================================================
// Import
// ============================================================================

fn parse_path_data(data: &str) -> Result<Path, PathDataError> {
    let mut parsed = PathDataParser::parse(Rule::pathdata, data).map_err(|e| {
        let span: SourceSpan = match e.location {
            InputLocation::Pos(pos) => (pos, 0).into(),
            InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        PathDataError::Syntax {
            message: e.variant.message().to_string(),
            src: NamedSource::new("path data", data.to_string()),
            span,
        }
    })?;

    let pathdata = parsed.next().expect("grammar yields one pathdata node");
    let mut assembler = Assembler {
        data,
        path: Path::new(),
        current: DVec2::ZERO,
        subpath_start: DVec2::ZERO,
        started: false,
        last_cubic: None,
        last_quad: None,
    };

    for command in pathdata.into_inner() {
        if command.as_rule() != Rule::command {
            continue; // EOI
        }
        let span = to_span(command.as_span());
        let mut inner = command.into_inner();
        let letter = inner
            .next()
            .expect("a command begins with its letter")
            .as_str()
            .chars()
            .next()
            .expect("the letter rule matches one character");
        let mut args = Vec::new();
        for number in inner {
            let number_span = to_span(number.as_span());
            let value: f64 = number.as_str().parse().map_err(|_| PathDataError::Syntax {
                message: "invalid number".to_string(),
                src: NamedSource::new("path data", data.to_string()),
                span: number_span,
            })?;
            args.push(value);
        }
        assembler.command(letter, &args, span)?;
    }

    debug!("parsed {} path elements", assembler.path.len());
    Ok(assembler.path)
}

fn to_span(span: pest::Span<'_>) -> SourceSpan {
    (span.start(), span.end() - span.start()).into()
}

struct Assembler<'a> {
    data: &'a str,
    path: Path,
    current: DVec2,
    subpath_start: DVec2,
    started: bool,
    /// Second control point of the previous segment, when it was a cubic.
    last_cubic: Option<DVec2>,
    /// Control point of the previous segment, when it was a quadratic.
    last_quad: Option<DVec2>,
}

impl Assembler<'_> {
    fn src(&self) -> NamedSource<String> {
        NamedSource::new("path data", self.data.to_string())
    }

    fn resolve(&self, rel: bool, p: DVec2) -> DVec2 {
        if rel { self.current + p } else { p }
    }

    fn require_groups(
        &self,
        command: char,
        args: &[f64],
        stride: usize,
        span: SourceSpan,
    ) -> Result<(), PathDataError> {
        if args.is_empty() || args.len() % stride != 0 {
            return Err(PathDataError::WrongArgumentCount {
                command,
                stride,
                found: args.len(),
                src: self.src(),
                span,
            });
        }
        Ok(())
    }

    fn command(
        &mut self,
        letter: char,
        args: &[f64],
        span: SourceSpan,
    ) -> Result<(), PathDataError> {
        if !self.started && !matches!(letter, 'M' | 'm') {
            return Err(PathDataError::MissingMoveTo {
                src: self.src(),
                span,
            });
        }
        let rel = letter.is_ascii_lowercase();
        match letter.to_ascii_uppercase() {
            'M' => {
                self.require_groups(letter, args, 2, span)?;
                for (i, pair) in args.chunks(2).enumerate() {
                    let target = self.resolve(rel, dvec2(pair[0], pair[1]));
                    if i == 0 {
                        // subsequent pairs are implicit linetos
                        self.path.push(PathEl::MoveTo(target));
                        self.subpath_start = target;
                    } else {
                        self.path.push(PathEl::LineTo(target));
                    }
                    self.current = target;
                }
                self.started = true;
                self.last_cubic = None;
                self.last_quad = None;
            }
            'L' => {
                self.require_groups(letter, args, 2, span)?;
                for pair in args.chunks(2) {
                    let target = self.resolve(rel, dvec2(pair[0], pair[1]));
                    self.path.push(PathEl::LineTo(target));
                    self.current = target;
                }
                self.last_cubic = None;
                self.last_quad = None;
            }
            'H' => {
                self.require_groups(letter, args, 1, span)?;
                for &v in args {
                    let x = if rel { self.current.x + v } else { v };
                    let target = dvec2(x, self.current.y);
                    self.path.push(PathEl::LineTo(target));
                    self.current = target;
                }
                self.last_cubic = None;
                self.last_quad = None;
            }
            'V' => {
                self.require_groups(letter, args, 1, span)?;
                for &v in args {
                    let y = if rel { self.current.y + v } else { v };
                    let target = dvec2(self.current.x, y);
                    self.path.push(PathEl::LineTo(target));
                    self.current = target;
                }
                self.last_cubic = None;
                self.last_quad = None;
            }
            'C' => {
                self.require_groups(letter, args, 6, span)?;
                for chunk in args.chunks(6) {
                    let c1 = self.resolve(rel, dvec2(chunk[0], chunk[1]));
                    let c2 = self.resolve(rel, dvec2(chunk[2], chunk[3]));
                    let target = self.resolve(rel, dvec2(chunk[4], chunk[5]));
                    self.path.push(PathEl::CurveTo(c1, c2, target));
                    self.current = target;
                    self.last_cubic = Some(c2);
                }
                self.last_quad = None;
            }
            'S' => {
                self.require_groups(letter, args, 4, span)?;
                for chunk in args.chunks(4) {
                    let c1 = match self.last_cubic {
                        Some(prev) => self.current * 2.0 - prev,
                        None => self.current,
                    };
                    let c2 = self.resolve(rel, dvec2(chunk[0], chunk[1]));
                    let target = self.resolve(rel, dvec2(chunk[2], chunk[3]));
                    self.path.push(PathEl::CurveTo(c1, c2, target));
                    self.current = target;
                    self.last_cubic = Some(c2);
                }
                self.last_quad = None;
            }
            'Q' => {
                self.require_groups(letter, args, 4, span)?;
                for chunk in args.chunks(4) {
                    let c = self.resolve(rel, dvec2(chunk[0], chunk[1]));
                    let target = self.resolve(rel, dvec2(chunk[2], chunk[3]));
                    self.path.push(PathEl::QuadTo(c, target));
                    self.current = target;
                    self.last_quad = Some(c);
                }
                self.last_cubic = None;
            }
            'T' => {
                self.require_groups(letter, args, 2, span)?;
                for pair in args.chunks(2) {
                    let c = match self.last_quad {
                        Some(prev) => self.current * 2.0 - prev,
                        None => self.current,
                    };
                    let target = self.resolve(rel, dvec2(pair[0], pair[1]));
                    self.path.push(PathEl::QuadTo(c, target));
                    self.current = target;
                    self.last_quad = Some(c);
                }
                self.last_cubic = None;
            }
            'Z' => {
                if !args.is_empty() {
                    return Err(PathDataError::TrailingArguments {
                        command: letter,
                        found: args.len(),
                        src: self.src(),
                        span,
                    });
                }
                self.path.push(PathEl::Close);
                self.current = self.subpath_start;
                self.last_cubic = None;
                self.last_quad = None;
            }
            _ => {
                return Err(PathDataError::UnsupportedCommand {
                    command: letter,
                    src: self.src(),
                    span,
                });
            }
        }
        Ok(())
    }
}
