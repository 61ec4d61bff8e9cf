// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Run configuration, built once from the command line and passed down to
//! whichever component needs it.

use std::{env, path::PathBuf};

use crate::error::Error;

mod constants;

pub use constants::*;

/// Which clock capture times are rendered in when written to EXIF tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
  /// The computer's time zone, matching what a camera would have recorded.
  #[default]
  Local,
  Utc,
}

/// Options controlling which tags are written for each file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagOptions {
  pub time_zone:      TimeZoneMode,
  /// Also write the title as caption text (`IPTC:Caption-Abstract` and
  /// `XMP-dc:Description`).
  pub write_captions: bool,
}

pub struct RunConfig {
  /// Migrated files land under `output_root/<owner>/<category>/`.
  pub output_root: PathBuf,
  pub verbosity:   u8,
  /// Answer "yes" to both confirmations without prompting.
  pub assume_yes:  bool,
  pub tags:        TagOptions,
}

impl RunConfig {
  /// Builds the configuration, defaulting `output_root` to `result/` under the
  /// current directory.
  pub fn new(
    output_root: Option<PathBuf>,
    verbosity: u8,
    assume_yes: bool,
    tags: TagOptions,
  ) -> Result<RunConfig, Error> {
    let output_root = match output_root {
      Some(path) if path.is_absolute() => path,
      Some(path) => env::current_dir().map_err(Error::CurrentDir)?.join(path),
      None => env::current_dir()
        .map_err(Error::CurrentDir)?
        .join(OUTPUT_DIR),
    };

    Ok(RunConfig {
      output_root,
      verbosity,
      assume_yes,
      tags,
    })
  }
}

#[cfg(test)]
mod test_run_config {
  use std::path::Path;

  use super::*;

  #[test]
  fn defaults_output_root_to_result_under_current_dir() {
    let config = RunConfig::new(None, 0, false, TagOptions::default()).unwrap();

    assert_eq!(config.output_root, env::current_dir().unwrap().join("result"));
  }

  #[test]
  fn keeps_absolute_output_root() {
    let config = RunConfig::new(
      Some(PathBuf::from("/tmp/migrated")),
      1,
      true,
      TagOptions::default(),
    )
    .unwrap();

    assert_eq!(config.output_root, Path::new("/tmp/migrated"));
    assert!(config.assume_yes);
  }

  #[test]
  fn resolves_relative_output_root_against_current_dir() {
    let config = RunConfig::new(
      Some(PathBuf::from("out")),
      0,
      false,
      TagOptions::default(),
    )
    .unwrap();

    assert_eq!(config.output_root, env::current_dir().unwrap().join("out"));
  }
}
