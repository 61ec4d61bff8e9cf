// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod test_dir;

use std::path::Path;

use chrono::DateTime;
pub use test_dir::*;

pub use crate::{assert_dir, assert_err, test_dir};
use crate::prim::{CameraAttributes, ContentCategory, NormalizedFile};

pub fn type_of<T>(_: T) -> &'static str {
  std::any::type_name::<T>()
}

/// Makes a `NormalizedFile` for `source_path`, created at `timestamp`.
pub fn normalized_file(
  category: ContentCategory,
  source_path: impl AsRef<Path>,
  title: Option<&str>,
  timestamp: i64,
  attributes: Option<CameraAttributes>,
) -> NormalizedFile {
  NormalizedFile {
    category,
    source_path: source_path.as_ref().to_path_buf(),
    title: title.map(str::to_string),
    created_at: DateTime::from_timestamp(timestamp, 0).unwrap(),
    attributes,
  }
}
