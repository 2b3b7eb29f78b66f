//! clipcast core - pattern text to Ableton Live clip commands.
//!
//! This crate turns a text-formatted musical pattern (three whitespace
//! tables of note events: melody, drum, bass) into the ordered OSC command
//! stream that programs note clips in Ableton Live through AbletonOSC.
//!
//! Pipeline, leaves first:
//!
//! - **extract** - locate the three marked sections in the raw text
//! - **parse** - turn each section into ordered [`NoteEvent`] records,
//!   filtering generation noise
//! - **sequence** - compute per-track pattern durations and emit the
//!   two-phase create/fill command stream
//! - **osc** - deliver commands as fire-and-forget UDP datagrams
//!
//! Everything is driven by an explicit [`Config`]; there are no ambient
//! globals, so each stage can be tested against synthetic inputs.

pub mod config;
pub mod error;
pub mod extract;
pub mod osc;
pub mod parse;
pub mod sequence;

// Re-export main types for convenience.
pub use config::{Config, Track, DEFAULT_OSC_ADDR};
pub use error::{Error, Result};
pub use osc::OscClient;
pub use parse::{Column, NoteEvent, Schema};
pub use sequence::{pattern_duration, LiveCommand, CLIP_INDEX, MUTE_OFF};

/// Parse the three note tables out of the pattern text.
///
/// Fails with [`Error::MissingSection`] before parsing when a marker is
/// absent, and with [`Error::EmptyTable`] when a section yields no valid
/// rows. On success the three sequences are non-empty and in track order.
pub fn parse_tables(text: &str, config: &Config) -> Result<[Vec<NoteEvent>; 3]> {
    let sections = extract::extract(text, &config.markers)?;

    let mut tables: [Vec<NoteEvent>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (track, section) in Track::ALL.into_iter().zip(sections) {
        let events = parse::parse(section, &config.schema, &config.pitch_range)?;
        if events.is_empty() {
            return Err(Error::EmptyTable(config.marker(track).to_string()));
        }
        log::info!("[PIPELINE] {track}: {} notes", events.len());
        tables[track.index()] = events;
    }

    Ok(tables)
}

/// Run the whole pipeline: pattern text in, command stream out.
///
/// No commands are produced unless all three tracks validate; a failure
/// anywhere leaves nothing to send.
pub fn build_commands(text: &str, config: &Config) -> Result<Vec<LiveCommand>> {
    let [melody, drum, bass] = parse_tables(text, config)?;
    sequence::sequence(config, &melody, &drum, &bass)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str =
        "Melody\n60 0.0 0.5 100\n64 0.5 0.5 100\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90";

    #[test]
    fn test_round_trip_pattern() {
        let config = Config::default();
        let commands = build_commands(PATTERN, &config).expect("pipeline failed");

        assert_eq!(commands[0], LiveCommand::SetTempo { tempo: 60 });

        let lengths: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                LiveCommand::CreateClip { length, .. } => Some(*length),
                _ => None,
            })
            .collect();
        assert_eq!(lengths, vec![1.0, 1.0, 1.0]);

        let notes: Vec<(i32, i32, f64)> = commands
            .iter()
            .filter_map(|c| match c {
                LiveCommand::AddNote { track, pitch, start, .. } => {
                    Some((*track, *pitch, *start))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            notes,
            vec![
                (0, 60, 0.0),
                (0, 64, 0.5),
                (1, 36, 0.0),
                (2, 40, 0.0),
            ]
        );

        // 1 tempo + 3 * (delete + create) + 4 notes
        assert_eq!(commands.len(), 11);
    }

    #[test]
    fn test_missing_marker_produces_no_commands() {
        let config = Config::default();
        let text = "Melody\n60 0.0 0.5 100\nDrum\n36 0.0 1.0 120";
        assert!(matches!(
            build_commands(text, &config),
            Err(Error::MissingSection(_))
        ));
    }

    #[test]
    fn test_section_with_only_noise_fails_as_empty() {
        let config = Config::default();
        let text = "Melody\nno notes here\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90";
        match build_commands(text, &config) {
            Err(Error::EmptyTable(name)) => assert_eq!(name, "Melody"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_numeric_field_aborts() {
        let config = Config::default();
        let text = "Melody\n60 abc 0.5 100\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90";
        assert!(matches!(
            build_commands(text, &config),
            Err(Error::MalformedField { .. })
        ));
    }

    #[test]
    fn test_marker_echo_before_tables_is_ignored() {
        // Bounded markers resolve to their last occurrence, so restated
        // "Melody"/"Drum" mentions up front do not shift the sections.
        let config = Config::default();
        let text = format!("Here is a Melody table and a Drum table:\n{PATTERN}");
        let commands = build_commands(&text, &config).expect("pipeline failed");
        assert_eq!(commands.len(), 11);
    }
}
