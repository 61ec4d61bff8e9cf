// Copyright 2023-5 Seth Pendergrass. See LICENSE.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::{EXIF_DATETIME_FORMAT, TimeZoneMode};

/// Converts an export timestamp (seconds since the Unix epoch) to a date &
/// time. Missing, zero, and out of range timestamps fall back to `now`.
pub fn date_time_from_timestamp(timestamp: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
  timestamp
    .filter(|t| *t != 0)
    .and_then(|t| DateTime::from_timestamp(t, 0))
    .unwrap_or(now)
}

/// Formats `date_time` for EXIF date & time tags (`YYYY:MM:DD HH:MM:SS`).
pub fn to_exif_date_time(date_time: &DateTime<Utc>, time_zone: TimeZoneMode) -> String {
  match time_zone {
    TimeZoneMode::Local => date_time
      .with_timezone(&Local)
      .format(EXIF_DATETIME_FORMAT)
      .to_string(),
    TimeZoneMode::Utc => date_time.format(EXIF_DATETIME_FORMAT).to_string(),
  }
}

/// Repairs text that was stored as UTF-8 bytes but decoded one byte per
/// character (e.g. `CafÃ©` instead of `Café`), which is how the export
/// writes titles.
///
/// Each character is reinterpreted as a Latin-1 byte and the bytes decoded as
/// UTF-8. If any character is outside Latin-1, or the bytes are not valid
/// UTF-8, the repair is not cleanly reversible and `text` is returned
/// unchanged.
pub fn repair_text_encoding(text: &str) -> String {
  text
    .chars()
    .map(|c| u8::try_from(u32::from(c)).ok())
    .collect::<Option<Vec<u8>>>()
    .and_then(|bytes| String::from_utf8(bytes).ok())
    .unwrap_or_else(|| text.to_owned())
}

/// Deserializes a loosely typed export field as text. Numbers and booleans
/// are rendered as text; `null`, arrays and objects become `None`.
pub fn lenient_string<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<String>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  })
}

/// Deserializes a loosely typed export field as an integer. Accepts integers,
/// floats (truncated) and numeric strings; anything else becomes `None`.
pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_to_i64)),
    Value::String(s) => s.trim().parse::<i64>().ok(),
    _ => None,
  })
}

/// Truncates `f` toward zero, or `None` if it isn't finite or doesn't fit.
#[allow(clippy::cast_possible_truncation)]
fn truncate_to_i64(f: f64) -> Option<i64> {
  // 2^63: the smallest magnitude outside `i64`'s positive range.
  const LIMIT: f64 = 9_223_372_036_854_775_808.0;

  let f = f.trunc();
  (f.is_finite() && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}



#[cfg(test)]
mod test_repair_text_encoding {
  use super::*;

  #[test]
  fn repairs_utf8_decoded_as_latin1() {
    assert_eq!(repair_text_encoding("CafÃ©"), "Café");
  }

  #[test]
  fn repairs_emoji() {
    assert_eq!(repair_text_encoding("ð\u{9f}\u{98}\u{80}"), "😀");
  }

  #[test]
  fn leaves_ascii_unchanged() {
    assert_eq!(repair_text_encoding("Sunset at the beach"), "Sunset at the beach");
  }

  #[test]
  fn leaves_text_unchanged_when_bytes_are_not_utf8() {
    // `é` alone is a lone 0xE9 byte, which is not valid UTF-8.
    assert_eq!(repair_text_encoding("café"), "café");
  }

  #[test]
  fn leaves_text_unchanged_when_outside_latin1() {
    assert_eq!(repair_text_encoding("Café 😀"), "Café 😀");
  }
}
