// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Normalization of a single manifest entry, which is either one media file or
//! a grouped post holding several.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::path::resolve_path;
use crate::prim::{
  CameraAttributes,
  ContentCategory,
  NormalizedFile,
  date_time_from_timestamp,
  lenient_i64,
  lenient_string,
  repair_text_encoding,
};

/// One entry as it appears in the manifest. Fields are loosely typed, as the
/// export is not consistent about them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
  #[serde(deserialize_with = "lenient_string")]
  uri:                Option<String>,
  #[serde(deserialize_with = "lenient_i64")]
  creation_timestamp: Option<i64>,
  #[serde(deserialize_with = "lenient_string")]
  title:              Option<String>,
  /// Present (as a list) only for grouped posts.
  media:              Option<Value>,
  media_metadata:     Option<Value>,
}

impl RawEntry {
  fn parse(value: &Value) -> Option<RawEntry> {
    if !value.is_object() {
      log::debug!("Skipping manifest entry that is not an object: {value}");
      return None;
    }

    RawEntry::deserialize(value)
      .inspect_err(|e| log::debug!("Skipping unparsable manifest entry ({e}): {value}"))
      .ok()
  }

  /// Own title with its encoding repaired. Empty titles are treated as absent.
  fn title(&self) -> Option<String> {
    self
      .title
      .as_deref()
      .filter(|t| !t.is_empty())
      .map(repair_text_encoding)
  }

  /// Camera attributes from `media_metadata.photo_metadata.exif_data`. This
  /// may be a single object, or a list of objects each holding some of the
  /// attributes. `None` if no known attribute is present.
  fn attributes(&self) -> Option<CameraAttributes> {
    let exif_data = self
      .media_metadata
      .as_ref()?
      .pointer("/photo_metadata/exif_data")?;

    let attributes = match exif_data {
      Value::Object(_) => CameraAttributes::deserialize(exif_data).ok()?,
      Value::Array(items) => items
        .iter()
        .filter_map(|item| CameraAttributes::deserialize(item).ok())
        .fold(CameraAttributes::default(), |mut merged, attributes| {
          merged.merge(attributes);
          merged
        }),
      _ => return None,
    };

    (!attributes.is_empty()).then_some(attributes)
  }

  /// Builds the normalized file for this entry, using `title` as resolved by
  /// the caller. `None` if the entry's path cannot be resolved.
  fn normalize(
    &self,
    category: ContentCategory,
    title: Option<String>,
    export_root: &Path,
    now: DateTime<Utc>,
  ) -> Option<NormalizedFile> {
    let Some(source_path) = resolve_path(self.uri.as_deref(), export_root) else {
      log::debug!(
        "{category}: Dropping entry with unresolvable URI {:?}.",
        self.uri.as_deref().unwrap_or_default()
      );
      return None;
    };

    Some(NormalizedFile {
      category,
      source_path,
      title,
      created_at: date_time_from_timestamp(self.creation_timestamp, now),
      attributes: self.attributes(),
    })
  }
}

/// Normalizes one manifest entry of `category` into zero or more files.
///
/// For grouped posts (entries with a `media` list), each child uses its own
/// title if non-empty, else the group's title. Children whose path cannot be
/// resolved are dropped. Missing timestamps become `now`. Output order
/// follows the order of children in the group.
pub fn normalize_entry(
  entry: &Value,
  category: ContentCategory,
  export_root: &Path,
  now: DateTime<Utc>,
) -> Vec<NormalizedFile> {
  let Some(entry) = RawEntry::parse(entry) else {
    return Vec::new();
  };
  let parent_title = entry.title();

  match &entry.media {
    // Grouped post.
    Some(Value::Array(children)) => children
      .iter()
      .filter_map(RawEntry::parse)
      .filter_map(|child| {
        let title = child.title().or_else(|| parent_title.clone());
        child.normalize(category, title, export_root, now)
      })
      .collect(),
    Some(media) => {
      log::debug!("{category}: Skipping grouped post whose `media` is not a list: {media}");
      Vec::new()
    }
    // Single item.
    None => entry
      .normalize(category, parent_title, export_root, now)
      .into_iter()
      .collect(),
  }
}
