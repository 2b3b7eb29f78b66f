//! Clip sequencer: parsed note tables to an ordered command stream.
//!
//! The receiving application treats clip creation and note insertion as
//! separate, order-sensitive operations: adding notes to a slot whose clip
//! has not been (re)created is undefined. The sequencer therefore emits in
//! two phases, first delete+create for all three slots, then the note fill
//! per slot, and validates every track before emitting anything so a
//! failure can never leave a partial command stream behind.

use crate::config::{Config, Track};
use crate::error::{Error, Result};
use crate::parse::NoteEvent;

/// Clip index within each slot. The pattern always occupies the first clip.
pub const CLIP_INDEX: i32 = 0;

/// Mute flag carried on every emitted note.
pub const MUTE_OFF: i32 = 0;

/// One outbound command for the receiving application.
///
/// Commands are consumed in emission order by a fire-and-forget sender;
/// the stream carries no acknowledgment or sequencing metadata of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveCommand {
    /// Set the song tempo.
    SetTempo { tempo: i32 },
    /// Delete the clip at (track, clip). No-op if the slot is empty.
    DeleteClip { track: i32, clip: i32 },
    /// Create an empty clip of the given length at (track, clip).
    CreateClip { track: i32, clip: i32, length: f64 },
    /// Insert one note into the clip at (track, clip).
    AddNote {
        track: i32,
        clip: i32,
        pitch: i32,
        start: f64,
        duration: f64,
        velocity: i32,
        mute: i32,
    },
}

/// Total time span of a track's note sequence, used to size its clip.
///
/// First event's start offset plus the sum of all durations, rounded to
/// four decimal places. `None` for an empty sequence; by the time the
/// sequencer runs, empty tracks have already failed validation upstream.
pub fn pattern_duration(events: &[NoteEvent]) -> Option<f64> {
    let first = events.first()?;
    let total = events
        .iter()
        .fold(first.start_time, |t, event| t + event.duration);
    Some((total * 10_000.0).round() / 10_000.0)
}

/// Build the full command stream for one pattern.
///
/// Emission order: tempo, then delete+create per slot, then the per-slot
/// note fill with a running start-time pointer. All three pattern
/// durations are computed up front; an empty track aborts before a single
/// command exists.
pub fn sequence(
    config: &Config,
    melody: &[NoteEvent],
    drum: &[NoteEvent],
    bass: &[NoteEvent],
) -> Result<Vec<LiveCommand>> {
    let tracks: [(Track, &[NoteEvent]); 3] = [
        (Track::Melody, melody),
        (Track::Drum, drum),
        (Track::Bass, bass),
    ];

    let mut lengths = [0.0f64; 3];
    for (i, (track, events)) in tracks.iter().enumerate() {
        lengths[i] = pattern_duration(events)
            .ok_or_else(|| Error::EmptyTable(config.marker(*track).to_string()))?;
    }

    let note_count = melody.len() + drum.len() + bass.len();
    let mut commands = Vec::with_capacity(1 + 2 * tracks.len() + note_count);

    commands.push(LiveCommand::SetTempo {
        tempo: config.tempo,
    });

    for ((track, _), length) in tracks.iter().zip(lengths) {
        let slot = config.slot(*track);
        commands.push(LiveCommand::DeleteClip {
            track: slot,
            clip: CLIP_INDEX,
        });
        commands.push(LiveCommand::CreateClip {
            track: slot,
            clip: CLIP_INDEX,
            length,
        });
        log::debug!("[SEQUENCE] Slot {slot}: clip length {length}");
    }

    for (track, events) in tracks {
        let slot = config.slot(track);
        let mut pointer = events.first().map_or(0.0, |event| event.start_time);
        for event in events {
            commands.push(LiveCommand::AddNote {
                track: slot,
                clip: CLIP_INDEX,
                pitch: event.pitch,
                start: pointer,
                duration: event.duration,
                velocity: event.velocity,
                mute: MUTE_OFF,
            });
            pointer += event.duration;
        }
    }

    Ok(commands)
}
