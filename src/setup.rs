// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program setup functions.

use std::{io::Write, path::PathBuf};

use env_logger::Builder;
use log::LevelFilter;

use crate::{error::Error, io};

/// Sets up `env_logger` with the format "LEVEL\tmessage" (e.g. "WARN\tsomething
/// went wrong").
///
/// Log levels:
/// Error: Program errors, and files that failed to migrate.
/// Warn: Skipped manifest sections and `ExifTool` warnings.
/// Info: General program flow and per-file progress.
/// Debug: Dropped manifest entries and detailed file operations.
/// Trace: `ExifTool` output.
pub fn configure_logging(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  Builder::new()
    .filter_level(level)
    .format(|buf, record| {
      let style = buf.default_level_style(record.level());
      writeln!(buf, "{style}{}{style:#}\t{}", record.level(), record.args())
    })
    .init();
}

/// Finds `ExifTool` and checks that it is usable.
pub fn find_exiftool() -> Result<PathBuf, Error> {
  let exiftool = io::locate_exiftool()?;
  io::exiftool_check(&exiftool)?;
  log::debug!("Using ExifTool at {}.", exiftool.display());
  Ok(exiftool)
}
