//! User-facing progress and summary output.
//!
//! Diagnostics go through `tracing`; the lines printed here are the run's
//! report (batch progress, totals, per-type counts). Pipelines take a
//! `Reporter` explicitly so tests can capture what would reach stdout.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

use indexmap::IndexMap;

pub struct Reporter<W: Write = Stdout> {
    out: W,
}

impl Reporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Reporter<Vec<u8>> {
    /// In-memory reporter for tests.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    // A closed stdout must not abort a long batch run.
    pub fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn heading(&mut self, title: &str) {
        self.line(format_args!("\n=== {} ===", title));
    }

    /// `title:` followed by one `- key: count` line per entry.
    pub fn counts(&mut self, title: &str, counts: &IndexMap<String, usize>) {
        self.line(format_args!("\n{}:", title));
        for (key, count) in counts {
            self.line(format_args!("- {}: {}", key, count));
        }
    }
}
