// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Errors surfaced to the user. Messages follow the "path: What happened."
//! format used throughout the program's logging.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{}: Manifest not found.", .0.display())]
  ManifestNotFound(PathBuf),

  #[error("{}: Failed to read manifest ({err}).", .0.display(), err = .1)]
  ManifestRead(PathBuf, #[source] io::Error),

  #[error("{}: Invalid JSON format ({err}).", .0.display(), err = .1)]
  ManifestJson(PathBuf, #[source] serde_json::Error),

  #[error("{}: Manifest is not a JSON object.", .0.display())]
  ManifestNotObject(PathBuf),

  #[error(
    "{}: Cannot determine export root (expected two directories above the manifest).",
    .0.display()
  )]
  ExportRoot(PathBuf),

  #[error("ExifTool not found in PATH.")]
  ExifToolMissing,

  #[error("{0}")]
  ExifTool(String),

  #[error("{}: Path has no file name.", .0.display())]
  NoFileName(PathBuf),

  #[error("{}: {err}", .0.display(), err = .1)]
  Io(PathBuf, #[source] io::Error),

  #[error("Could not determine current directory ({0}).")]
  CurrentDir(#[source] io::Error),
}
