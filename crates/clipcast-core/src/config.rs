//! Run configuration for the pattern-to-clip pipeline.
//!
//! Everything a component needs is passed in explicitly through [`Config`]
//! so that the extractor, parser and sequencer can be unit tested against
//! synthetic inputs without ambient globals.

use std::fmt;
use std::ops::RangeInclusive;

use crate::parse::Schema;

/// Default AbletonOSC endpoint.
pub const DEFAULT_OSC_ADDR: &str = "127.0.0.1:11000";

/// One of the three fixed track roles of a pattern.
///
/// Each role owns one table section of the input text and one clip slot
/// in the receiving application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Melody,
    Drum,
    Bass,
}

impl Track {
    /// All tracks, in section and slot order.
    pub const ALL: [Self; 3] = [Self::Melody, Self::Drum, Self::Bass];

    /// Position of this track in marker and slot arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Melody => 0,
            Self::Drum => 1,
            Self::Bass => 2,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melody => write!(f, "melody"),
            Self::Drum => write!(f, "drum"),
            Self::Bass => write!(f, "bass"),
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Section marker tokens, one per track, in track order.
    pub markers: [String; 3],
    /// Valid MIDI pitch bounds, inclusive. The row guard drops rows whose
    /// leading token falls outside this range.
    pub pitch_range: RangeInclusive<i32>,
    /// Song tempo in BPM.
    pub tempo: i32,
    /// Column layout of the note tables.
    pub schema: Schema,
    /// Clip slot index per track, in track order.
    pub slots: [i32; 3],
    /// OSC endpoint in "host:port" format.
    pub addr: String,
}

impl Config {
    /// Marker token for the given track.
    pub fn marker(&self, track: Track) -> &str {
        &self.markers[track.index()]
    }

    /// Clip slot index for the given track.
    pub fn slot(&self, track: Track) -> i32 {
        self.slots[track.index()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: [
                "Melody".to_string(),
                "Drum".to_string(),
                "Bass".to_string(),
            ],
            pitch_range: 30..=90,
            tempo: 60,
            schema: Schema::default(),
            slots: [0, 1, 2],
            addr: DEFAULT_OSC_ADDR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.markers, ["Melody", "Drum", "Bass"]);
        assert_eq!(config.pitch_range, 30..=90);
        assert_eq!(config.tempo, 60);
        assert_eq!(config.slots, [0, 1, 2]);
        assert_eq!(config.addr, "127.0.0.1:11000");
    }

    #[test]
    fn test_track_lookup() {
        let config = Config::default();
        assert_eq!(config.marker(Track::Drum), "Drum");
        assert_eq!(config.slot(Track::Bass), 2);
        assert_eq!(Track::ALL.map(Track::index), [0, 1, 2]);
    }
}
