//! Table parser: whitespace-separated note tables to [`NoteEvent`] sequences.
//!
//! Generated pattern text is noisy. Prose lines, blank lines and stray
//! markdown routinely end up interleaved with the actual note rows, so the
//! parser works in two tiers:
//!
//! 1. **Guard and filter** - a line is only a candidate row if its leading
//!    token is an integer inside the valid pitch range and it carries at
//!    least as many fields as the schema has columns. Anything else is
//!    dropped silently.
//! 2. **Strict conversion** - once a row passes the guards it is trusted as
//!    data, and a numeric field that fails to convert is a fatal error
//!    rather than more noise to skip.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// A column of the note table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// MIDI pitch, integer.
    Pitch,
    /// Track-local start offset in beats, decimal.
    StartTime,
    /// Note length in beats, decimal.
    Duration,
    /// MIDI velocity, integer. Expected 0-127 but not validated.
    Velocity,
}

impl Column {
    /// Human-readable column name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pitch => "pitch",
            Self::StartTime => "start_time",
            Self::Duration => "duration",
            Self::Velocity => "velocity",
        }
    }
}

/// Ordered column layout of a note table.
///
/// The order defines both how row fields map to [`NoteEvent`] fields and
/// the minimum field count a well-formed row must carry. Must contain each
/// of the four columns exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    order: [Column; Self::COLUMNS],
    index: [usize; Self::COLUMNS],
}

impl Schema {
    /// Number of columns in the schema. Fixed: exactly four.
    pub const COLUMNS: usize = 4;

    /// Create a schema from an explicit column order.
    pub fn new(order: [Column; Self::COLUMNS]) -> Self {
        let mut index = [0usize; Self::COLUMNS];
        for (position, column) in order.iter().enumerate() {
            index[*column as usize] = position;
        }
        Self { order, index }
    }

    /// Field position of the given column within a row.
    pub fn index_of(&self, column: Column) -> usize {
        self.index[column as usize]
    }

    /// The column order, as configured.
    pub fn order(&self) -> &[Column; Self::COLUMNS] {
        &self.order
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new([
            Column::Pitch,
            Column::StartTime,
            Column::Duration,
            Column::Velocity,
        ])
    }
}

/// A single note of a track pattern.
///
/// `start_time` is the offset parsed from the table; during sequencing a
/// local running pointer is derived from it instead of mutating the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI pitch.
    pub pitch: i32,
    /// Track-local start offset in beats.
    pub start_time: f64,
    /// Note length in beats.
    pub duration: f64,
    /// MIDI velocity.
    pub velocity: i32,
}

/// Parse one raw table section into an ordered sequence of note events.
///
/// Lines that fail the row guards are discarded silently; a guarded row
/// with an unparseable numeric field aborts with
/// [`Error::MalformedField`]. An empty section parses to an empty vec,
/// which the caller must treat as a validation failure.
pub fn parse(
    raw: &str,
    schema: &Schema,
    pitch_range: &RangeInclusive<i32>,
) -> Result<Vec<NoteEvent>> {
    let mut events = Vec::new();

    for line in raw.split('\n') {
        let fields: Vec<&str> = line
            .split(['\t', ' '])
            .filter(|field| !field.is_empty())
            .collect();

        // Guard 1: the leading token must be an integer in the pitch range.
        let is_candidate = fields
            .first()
            .and_then(|token| token.parse::<i32>().ok())
            .is_some_and(|pitch| pitch_range.contains(&pitch));
        if !is_candidate {
            if !line.trim().is_empty() {
                log::trace!("[PARSE] Dropping non-row line: {line:?}");
            }
            continue;
        }

        // Guard 2: enough fields for every schema column. Trailing extras
        // are tolerated and ignored by position.
        if fields.len() < Schema::COLUMNS {
            log::trace!("[PARSE] Dropping short row: {line:?}");
            continue;
        }

        events.push(NoteEvent {
            pitch: parse_int(fields[schema.index_of(Column::Pitch)], Column::Pitch)?,
            start_time: parse_float(fields[schema.index_of(Column::StartTime)], Column::StartTime)?,
            duration: parse_float(fields[schema.index_of(Column::Duration)], Column::Duration)?,
            velocity: parse_int(fields[schema.index_of(Column::Velocity)], Column::Velocity)?,
        });
    }

    Ok(events)
}

fn parse_int(token: &str, column: Column) -> Result<i32> {
    token.parse().map_err(|_| Error::MalformedField {
        column: column.name(),
        token: token.to_string(),
    })
}

fn parse_float(token: &str, column: Column) -> Result<f64> {
    token.parse().map_err(|_| Error::MalformedField {
        column: column.name(),
        token: token.to_string(),
    })
}
