// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Mapping of normalized files to the `ExifTool` tags written into them.
//!
//! Tag names are from `ExifTool`'s tags: <https://exiftool.org/TagNames/>.

use std::collections::BTreeMap;

use crate::{
  config::{CODED_CHARACTER_SET, KEYWORDS, ORIGINATING_PROGRAM, TagOptions},
  prim::{CameraAttributes, NormalizedFile, to_exif_date_time},
};

/// Tag name to value, in a stable order.
pub type Tags = BTreeMap<&'static str, String>;

/// Builds the tags to write for `file`.
///
/// Capture time is always written. GPS position is written only when both
/// latitude and longitude are known. Each other camera attribute is written
/// only when known.
pub fn map_tags(file: &NormalizedFile, options: &TagOptions) -> Tags {
  let mut tags = Tags::new();

  // Composite tag covering DateTimeOriginal, CreateDate and ModifyDate.
  tags.insert(
    "AllDates",
    to_exif_date_time(&file.created_at, options.time_zone),
  );

  if let Some(attributes) = &file.attributes {
    insert_gps(&mut tags, attributes);
    insert_camera(&mut tags, attributes);
  }

  if let Some(title) = file.title.as_deref().filter(|t| !t.is_empty()) {
    tags.insert("IPTC:Keywords", KEYWORDS.to_string());
    tags.insert("IPTC:OriginatingProgram", ORIGINATING_PROGRAM.to_string());
    tags.insert("IPTC:CodedCharacterSet", CODED_CHARACTER_SET.to_string());

    if options.write_captions {
      tags.insert("IPTC:Caption-Abstract", title.to_string());
      tags.insert("XMP-dc:Description", title.to_string());
    }
  }

  tags
}

fn insert_gps(tags: &mut Tags, attributes: &CameraAttributes) {
  let (Some(latitude), Some(longitude)) = (&attributes.latitude, &attributes.longitude) else {
    return;
  };

  tags.insert("GPSLatitude", latitude.clone());
  tags.insert("GPSLongitude", longitude.clone());

  // EXIF stores the hemisphere separately from the (unsigned) coordinates.
  if let (Ok(lat), Ok(lon)) = (
    latitude.trim().parse::<f64>(),
    longitude.trim().parse::<f64>(),
  ) {
    tags.insert(
      "GPSLatitudeRef",
      if lat < 0.0 { "S" } else { "N" }.to_string(),
    );
    tags.insert(
      "GPSLongitudeRef",
      if lon < 0.0 { "W" } else { "E" }.to_string(),
    );
  }
}

fn insert_camera(tags: &mut Tags, attributes: &CameraAttributes) {
  for (tag, value) in [
    ("ISO", &attributes.iso),
    ("LensMake", &attributes.lens_make),
    ("LensModel", &attributes.lens_model),
    ("SceneType", &attributes.scene_type),
    ("ApertureValue", &attributes.aperture),
    ("ShutterSpeedValue", &attributes.shutter_speed),
    ("FocalLength", &attributes.focal_length),
    ("MeteringMode", &attributes.metering_mode),
  ] {
    if let Some(value) = value {
      tags.insert(tag, value.clone());
    }
  }
}
