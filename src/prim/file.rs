// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! The normalized record describing one exported media file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{ContentCategory, lenient_string};

/// Camera, GPS and capture attributes recorded by the export.
///
/// Values are kept as the text the export recorded (numbers are rendered with
/// `serde_json`'s formatting) and handed to `ExifTool` as-is. `None` means
/// unknown, and is never written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CameraAttributes {
  #[serde(deserialize_with = "lenient_string")]
  pub latitude:      Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub longitude:     Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub iso:           Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub lens_make:     Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub lens_model:    Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub scene_type:    Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub aperture:      Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub shutter_speed: Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub focal_length:  Option<String>,
  #[serde(deserialize_with = "lenient_string")]
  pub metering_mode: Option<String>,
}

impl CameraAttributes {
  /// Fills attributes missing from `self` with those from `other`. Values
  /// already present in `self` win.
  pub fn merge(&mut self, other: CameraAttributes) {
    fn fill(slot: &mut Option<String>, value: Option<String>) {
      if slot.is_none() {
        *slot = value;
      }
    }

    fill(&mut self.latitude, other.latitude);
    fill(&mut self.longitude, other.longitude);
    fill(&mut self.iso, other.iso);
    fill(&mut self.lens_make, other.lens_make);
    fill(&mut self.lens_model, other.lens_model);
    fill(&mut self.scene_type, other.scene_type);
    fill(&mut self.aperture, other.aperture);
    fill(&mut self.shutter_speed, other.shutter_speed);
    fill(&mut self.focal_length, other.focal_length);
    fill(&mut self.metering_mode, other.metering_mode);
  }

  pub fn is_empty(&self) -> bool {
    *self == CameraAttributes::default()
  }
}

/// One physical file from the export, with everything needed to migrate it.
///
/// Only created once `source_path` has been resolved; never mutated after.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedFile {
  pub category:    ContentCategory,
  pub source_path: PathBuf,
  /// Own title, or the title of the grouped post this file belongs to.
  pub title:       Option<String>,
  pub created_at:  DateTime<Utc>,
  pub attributes:  Option<CameraAttributes>,
}
