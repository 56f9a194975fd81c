//! Error types with rich diagnostics using miette
//!
//! The shape subsystem itself is total: every operation is a pure function
//! over well-formed geometric input, and documented misuse (inconsistent
//! winding, degenerate canvases) produces defined output rather than failure.
//! The only fallible surface is SVG path data import.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while parsing SVG path data.
#[derive(Error, Diagnostic, Debug)]
pub enum PathDataError {
    #[error("invalid path data syntax")]
    #[diagnostic(code(contura::pathdata::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("path data must begin with a moveto command")]
    #[diagnostic(
        code(contura::pathdata::missing_moveto),
        help("start the data with `M x y`")
    )]
    MissingMoveTo {
        #[source_code]
        src: NamedSource<String>,
        #[label("first command is here")]
        span: SourceSpan,
    },

    #[error("wrong number of arguments for '{command}'")]
    #[diagnostic(
        code(contura::pathdata::wrong_argument_count),
        help("'{command}' takes coordinates in groups of {stride}")
    )]
    WrongArgumentCount {
        command: char,
        stride: usize,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("{found} arguments here")]
        span: SourceSpan,
    },

    #[error("'{command}' takes no arguments")]
    #[diagnostic(code(contura::pathdata::trailing_arguments))]
    TrailingArguments {
        command: char,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("{found} stray arguments")]
        span: SourceSpan,
    },

    #[error("unsupported command '{command}'")]
    #[diagnostic(
        code(contura::pathdata::unsupported_command),
        help("elliptical arcs have no exact cubic form; flatten them before importing")
    )]
    UnsupportedCommand {
        command: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("arc command here")]
        span: SourceSpan,
    },
}
