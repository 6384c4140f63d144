//! Line format for stored presets.
//!
//! Each line is `name|src::<path>|dst::<path>`. Parsing follows a lenient
//! policy: a line that cannot be turned into a complete preset yields `None`
//! and the caller drops it. Specifically:
//!
//! - a line with fewer than two `|` fields after the name is dropped;
//! - a `key::value` segment without exactly one `::`, or with a key other
//!   than `src`/`dst`, is ignored;
//! - an entry left without a name, source or destination is dropped.

use std::path::Path;

use mediasort_core::{Preset, ValidationError};

/// Separates the name and the key/value segments of a line.
pub const FIELD_SEPARATOR: &str = "|";
/// Separates a key from its value inside a segment.
pub const KEY_SEPARATOR: &str = "::";

const SOURCE_KEY: &str = "src";
const DESTINATION_KEY: &str = "dst";

/// Parse one stored line.
pub fn parse_line(line: &str) -> Option<Preset> {
    let mut fields = line.split(FIELD_SEPARATOR);
    let name = fields.next()?;
    let segments: Vec<&str> = fields.collect();

    if name.is_empty() || segments.len() < 2 {
        return None;
    }

    let mut source = None;
    let mut destination = None;

    for segment in segments {
        let mut parts = segment.split(KEY_SEPARATOR);
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        match key {
            SOURCE_KEY => source = Some(value),
            DESTINATION_KEY => destination = Some(value),
            _ => {}
        }
    }

    let source = source.filter(|s| !s.is_empty())?;
    let destination = destination.filter(|d| !d.is_empty())?;

    Some(Preset::new(name, source, destination))
}

/// Serialize a preset as one line (without the trailing newline).
pub fn format_line(preset: &Preset) -> String {
    format!(
        "{name}{FIELD_SEPARATOR}{SOURCE_KEY}{KEY_SEPARATOR}{src}{FIELD_SEPARATOR}{DESTINATION_KEY}{KEY_SEPARATOR}{dst}",
        name = preset.name,
        src = preset.source.display(),
        dst = preset.destination.display(),
    )
}

/// Check that a preset survives a write/read cycle.
///
/// Names and paths may not contain either separator.
pub fn check_storable(preset: &Preset) -> Result<(), ValidationError> {
    check_field("name", &preset.name)?;
    check_field("source", &path_text(&preset.source))?;
    check_field("destination", &path_text(&preset.destination))?;
    Ok(())
}

fn check_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    for sequence in [FIELD_SEPARATOR, KEY_SEPARATOR] {
        if value.contains(sequence) {
            return Err(ValidationError::ReservedSequence { field, sequence });
        }
    }
    Ok(())
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_line() {
        let preset = parse_line("card|src::/Volumes/CARD|dst::/home/me/Import").unwrap();
        assert_eq!(preset.name, "card");
        assert_eq!(preset.source, PathBuf::from("/Volumes/CARD"));
        assert_eq!(preset.destination, PathBuf::from("/home/me/Import"));
    }

    #[test]
    fn test_parse_line_any_segment_order() {
        let preset = parse_line("ssd|dst::/b|src::/a").unwrap();
        assert_eq!(preset.source, PathBuf::from("/a"));
        assert_eq!(preset.destination, PathBuf::from("/b"));
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        assert!(parse_line("card").is_none());
        assert!(parse_line("card|src::/a").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_parse_line_empty_name() {
        assert!(parse_line("|src::/a|dst::/b").is_none());
    }

    #[test]
    fn test_parse_line_ignores_bad_segments() {
        // Unknown keys and extra segments are skipped.
        let preset = parse_line("card|src::/a|colour::red|dst::/b").unwrap();
        assert_eq!(preset.source, PathBuf::from("/a"));

        // A segment with two separators is ignored, leaving no source.
        assert!(parse_line("card|src::/a::x|dst::/b").is_none());

        // A segment without a separator is ignored.
        assert!(parse_line("card|/a|dst::/b").is_none());
    }

    #[test]
    fn test_parse_line_empty_value() {
        assert!(parse_line("card|src::|dst::/b").is_none());
    }

    #[test]
    fn test_format_line() {
        let preset = Preset::new("card", "/Volumes/CARD", "/home/me/Import");
        assert_eq!(
            format_line(&preset),
            "card|src::/Volumes/CARD|dst::/home/me/Import"
        );
        assert_eq!(parse_line(&format_line(&preset)), Some(preset));
    }

    #[test]
    fn test_check_storable() {
        assert!(check_storable(&Preset::new("card", "/a", "/b")).is_ok());

        let err = check_storable(&Preset::new("a|b", "/a", "/b")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ReservedSequence {
                field: "name",
                sequence: "|"
            }
        );

        let err = check_storable(&Preset::new("card", "/a::b", "/b")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ReservedSequence {
                field: "source",
                sequence: "::"
            }
        );

        assert!(check_storable(&Preset::new("card", "/a", "/b|c")).is_err());
    }
}
