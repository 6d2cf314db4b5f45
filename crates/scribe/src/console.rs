//! Console mirror
//!
//! When enabled, every rendered line is also written to stdout tinted by
//! level. Purely a collaborator of the file pipeline: no queueing, no
//! rotation, no state of its own.

use std::io::{self, Write};

use scribe_format::{LineStyle, LogLevel};

const ANSI_RESET: &str = "\u{1b}[0m";

/// Print a rendered line tinted by its level
///
/// Ansi-styled lines already carry their color and are printed as-is.
/// A closed stdout is ignored; it must not fail the logging call.
pub(crate) fn print(line: &str, level: LogLevel, style: LineStyle) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = if style == LineStyle::Ansi {
        writeln!(out, "{line}")
    } else {
        writeln!(out, "{}{line}{ANSI_RESET}", level.ansi_color())
    };
}
