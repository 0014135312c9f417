use crate::literal::write_literal;
use lanes_check::{FailurePolicy, FailureReporter};
use lanes_kind::{Lane, NumericValue};
use std::io::{self, Write};

/// Scratch space for one rendered literal.
///
/// Integer and sentinel literals always fit. Floats of large magnitude print
/// every integer digit and overflow it; those are truncated and noted.
pub const LITERAL_CAPACITY: usize = 53;

const INDENT_UNIT: &[u8] = b"  ";

/// Where a block sits among its siblings.
///
/// The writer trusts this tag and never looks ahead: a group must be tagged
/// `First`, then any number of `Middle`, then `Last`. Wrong tags produce
/// unbalanced braces, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Middle,
    Last,
}

impl Position {
    /// Tag for element `index` of a group of `len` siblings.
    ///
    /// Index 0 is always `First`, so a one-element group is never closed.
    #[must_use]
    pub fn for_index(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::First
        } else if index + 1 >= len {
            Self::Last
        } else {
            Self::Middle
        }
    }
}

/// Serializes lane values as nested aggregate-initializer text.
pub struct FixtureWriter<W: Write> {
    out: W,
    reporter: FailureReporter,
}

impl FixtureWriter<io::Stdout> {
    /// Writer on stdout, with capacity notes going to stderr.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), FailureReporter::new(FailurePolicy::NonFatal))
    }
}

impl<W: Write> FixtureWriter<W> {
    #[must_use]
    pub fn new(out: W, reporter: FailureReporter) -> Self {
        Self { out, reporter }
    }

    #[must_use]
    pub fn reporter(&self) -> &FailureReporter {
        &self.reporter
    }

    #[must_use]
    pub fn into_parts(self) -> (W, FailureReporter) {
        (self.out, self.reporter)
    }

    pub fn write_vector<T: Lane>(
        &mut self,
        indent: usize,
        values: &[T],
        pos: Position,
    ) -> io::Result<()> {
        let level = self.open(indent, pos)?;
        self.out.write_all(b"{ ")?;
        let per_line = T::KIND.elements_per_line();
        for (i, value) in values.iter().enumerate() {
            if i != 0 {
                self.out.write_all(b",")?;
                if i % per_line == 0 {
                    self.out.write_all(b"\n")?;
                    self.write_indent(level + 1)?;
                } else {
                    self.out.write_all(b" ")?;
                }
            }
            self.write_value(value.to_value())?;
        }
        self.out.write_all(b" }")?;
        self.close(pos)
    }

    pub fn write_scalar<T: Lane>(&mut self, indent: usize, value: T, pos: Position) -> io::Result<()> {
        self.open(indent, pos)?;
        self.write_value(value.to_value())?;
        self.close(pos)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn open(&mut self, indent: usize, pos: Position) -> io::Result<usize> {
        match pos {
            Position::First => {
                self.write_indent(indent)?;
                self.out.write_all(b"{ ")?;
                Ok(indent + 1)
            }
            Position::Middle | Position::Last => {
                self.write_indent(indent + 1)?;
                Ok(indent + 1)
            }
        }
    }

    fn close(&mut self, pos: Position) -> io::Result<()> {
        match pos {
            Position::First | Position::Middle => self.out.write_all(b",")?,
            Position::Last => self.out.write_all(b" },")?,
        }
        self.out.write_all(b"\n")
    }

    fn write_value(&mut self, value: NumericValue) -> io::Result<()> {
        let mut buf = [0u8; LITERAL_CAPACITY];
        let written = match write_literal(&mut buf, value) {
            Ok(written) => written,
            Err(err) => {
                self.reporter.note(err.to_string());
                err.written
            }
        };
        self.out.write_all(&buf[..written])
    }

    fn write_indent(&mut self, level: usize) -> io::Result<()> {
        for _ in 0..level {
            self.out.write_all(INDENT_UNIT)?;
        }
        Ok(())
    }
}
