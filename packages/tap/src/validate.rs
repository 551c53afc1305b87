//! NDJSON validation: one record per non-blank line.

use std::io::{self, BufRead, Write};

use hiroba_protocol::{
    Envelope, Message, ProtocolError, Room, TypingIndicator, User, UserPresence, WireFormat,
};

use crate::cli::Shape;

/// A line that failed to decode
#[derive(Debug)]
pub struct InvalidRecord {
    /// 1-based line number
    pub line: usize,
    pub error: ProtocolError,
}

/// Outcome of validating one input
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Non-blank lines seen
    pub total: usize,
    pub invalid: Vec<InvalidRecord>,
}

impl ValidationReport {
    pub fn valid(&self) -> usize {
        self.total - self.invalid.len()
    }

    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Write one diagnostic per invalid line followed by a summary line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in &self.invalid {
            writeln!(out, "line {}: {}", record.line, record.error)?;
        }
        writeln!(
            out,
            "{} valid, {} invalid",
            self.valid(),
            self.invalid.len()
        )
    }
}

/// Validate every non-blank line of `reader` as a `T`.
///
/// A line that is not UTF-8 is reported as invalid and does not stop the run.
///
/// # Errors
///
/// Returns an I/O error only if reading from `reader` fails.
pub fn validate_records<T, R>(reader: R) -> io::Result<ValidationReport>
where
    T: WireFormat,
    R: BufRead,
{
    let mut report = ValidationReport::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let result = match String::from_utf8(bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => T::decode(&line).map(|_| ()),
            Err(e) => Err(ProtocolError::InvalidUtf8(e.utf8_error())),
        };
        report.total += 1;

        if let Err(error) = result {
            tracing::debug!("Line {} is invalid: {}", index + 1, error);
            report.invalid.push(InvalidRecord {
                line: index + 1,
                error,
            });
        }
    }

    Ok(report)
}

/// Validate `reader` against the record type selected by `shape`
pub fn validate_shape<R: BufRead>(shape: Shape, reader: R) -> io::Result<ValidationReport> {
    match shape {
        Shape::Envelope => validate_records::<Envelope, _>(reader),
        Shape::Message => validate_records::<Message, _>(reader),
        Shape::Room => validate_records::<Room, _>(reader),
        Shape::Presence => validate_records::<UserPresence, _>(reader),
        Shape::Typing => validate_records::<TypingIndicator, _>(reader),
        Shape::User => validate_records::<User, _>(reader),
    }
}
