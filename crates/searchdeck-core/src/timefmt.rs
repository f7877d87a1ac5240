// Timestamp rendering for repository records
use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a record's creation timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// RFC 3339 input is converted to the viewer's local time zone. Naive
/// timestamps (the backend's SQLite `CURRENT_TIMESTAMP` shape) carry no zone,
/// so their wall-clock fields are rendered as-is. Anything unparseable comes
/// back unchanged rather than as an error; a raw string in a table cell
/// beats a blank one.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    for naive_format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, naive_format) {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
    }

    raw.to_string()
}
