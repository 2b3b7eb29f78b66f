//! Table extractor: locates the three marked sections in raw pattern text.
//!
//! Generated text often echoes the marker names before the tables proper
//! (restating the request, describing what follows), so the bounded
//! sections are resolved from the LAST occurrence of each marker: only the
//! final, most complete emission is trusted. The last section has nothing
//! following it and is taken from the FIRST occurrence of its marker
//! instead.

use crate::error::{Error, Result};

/// Extract the three raw table sections from the pattern text.
///
/// All three markers must be present or the whole run fails with
/// [`Error::MissingSection`] before any parsing happens. An unpaired
/// bounded section resolves to an empty substring; the empty-table
/// validation downstream turns that into a failure.
pub fn extract<'a>(text: &'a str, markers: &[String; 3]) -> Result<[&'a str; 3]> {
    for marker in markers {
        if !text.contains(marker.as_str()) {
            return Err(Error::MissingSection(marker.clone()));
        }
    }

    let sections = [
        between(text, &markers[0], &markers[1]),
        between(text, &markers[1], &markers[2]),
        after_first(text, &markers[2]),
    ];

    for (marker, section) in markers.iter().zip(&sections) {
        log::debug!("[EXTRACT] Section '{marker}': {} bytes", section.len());
    }

    Ok(sections)
}

/// Substring strictly between the last occurrence of `start` and the last
/// occurrence of `end` after it. Empty if no `end` follows `start`.
fn between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let Some(s) = text.rfind(start) else {
        return "";
    };
    let s = s + start.len();
    match text[s..].rfind(end) {
        Some(e) => &text[s..s + e],
        None => "",
    }
}

/// Everything after the first occurrence of `marker`. Empty if absent.
fn after_first<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(idx) => &text[idx + marker.len()..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> [String; 3] {
        ["Melody".to_string(), "Drum".to_string(), "Bass".to_string()]
    }

    #[test]
    fn test_extract_three_sections() {
        let text = "Melody\n60 0.0 0.5 100\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90";
        let [melody, drum, bass] = extract(text, &markers()).expect("extract failed");
        assert_eq!(melody, "\n60 0.0 0.5 100\n");
        assert_eq!(drum, "\n36 0.0 1.0 120\n");
        assert_eq!(bass, "\n40 0.0 1.0 90");
    }

    #[test]
    fn test_extract_missing_marker_fails() {
        let text = "Melody\n60 0.0 0.5 100\nDrum\n36 0.0 1.0 120";
        let err = extract(text, &markers()).expect_err("expected error");
        match err {
            Error::MissingSection(name) => assert_eq!(name, "Bass"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_uses_last_marker_occurrence() {
        // The first "Melody"/"Drum" mentions echo the request; only the
        // final emission carries the real tables.
        let text = "name the tables Melody, Drum and Bass.\n\
                    Melody\n50 9.9 9.9 9\n\
                    Melody\n60 0.0 0.5 100\n\
                    Drum\n36 0.0 1.0 120\n\
                    Bass\n40 0.0 1.0 90";
        let [melody, _, _] = extract(text, &markers()).expect("extract failed");
        assert!(melody.contains("60 0.0 0.5 100"));
        assert!(!melody.contains("50 9.9 9.9 9"));
    }

    #[test]
    fn test_extract_last_end_marker_bounds_section() {
        // The end marker is resolved to its last occurrence after the
        // start, so an early "Drum" mention inside the melody body stays
        // in the melody section.
        let text = "Melody\n60 0.0 0.5 100\nDrum\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90";
        let [melody, drum, _] = extract(text, &markers()).expect("extract failed");
        assert_eq!(melody, "\n60 0.0 0.5 100\nDrum\n");
        assert_eq!(drum, "\n36 0.0 1.0 120\n");
    }

    #[test]
    fn test_extract_unpaired_section_is_empty() {
        // All markers present, but the last "Melody" has no "Drum" after
        // it: the melody section resolves empty rather than failing here.
        let text = "Drum comes later\nBass too\nMelody\n60 0.0 0.5 100";
        let [melody, _, _] = extract(text, &markers()).expect("extract failed");
        assert_eq!(melody, "");
    }

    #[test]
    fn test_extract_final_section_from_first_occurrence() {
        // Asymmetric by design: everything after the FIRST "Bass" is bass
        // data, even when the marker repeats.
        let text = "Melody\n60 0.0 0.5 100\nDrum\n36 0.0 1.0 120\nBass\n40 0.0 1.0 90\nBass\n41 0.0 1.0 90";
        let [_, _, bass] = extract(text, &markers()).expect("extract failed");
        assert!(bass.contains("40 0.0 1.0 90"));
        assert!(bass.contains("41 0.0 1.0 90"));
    }
}
