// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Migrating one export manifest, from reading it through writing the result.

use std::path::Path;

use crate::{
  config::RunConfig,
  error::Error,
  io::ExifToolSession,
  manifest,
  materialize::{self, TagWriter},
  ui::{self, Confirm},
};

/// Whether the run should go on to the next manifest.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
  Continue,
  /// The user declined a confirmation; stop the whole run.
  Halt,
}

/// Migrates the export described by `manifest_path`, writing files with an
/// `ExifTool` session started from `exiftool`.
pub fn migrate(
  config: &RunConfig,
  exiftool: &Path,
  manifest_path: &Path,
  confirm: &mut dyn Confirm,
) -> Result<Flow, Error> {
  migrate_with(config, manifest_path, confirm, || ExifToolSession::start(exiftool))
}

/// As `migrate`, with `start_writer` acquiring the tag writer for the batch.
/// It is only called once both confirmations have been given, and the writer
/// is released when the batch ends.
pub fn migrate_with<W: TagWriter>(
  config: &RunConfig,
  manifest_path: &Path,
  confirm: &mut dyn Confirm,
  start_writer: impl FnOnce() -> Result<W, Error>,
) -> Result<Flow, Error> {
  let export_root = manifest::export_root(manifest_path)?;
  println!("Export found at {}", export_root.display());
  if !confirm.confirm("Is this correct?") {
    return Ok(Flow::Halt);
  }

  let contents = manifest::read_manifest(manifest_path)?;
  let files = manifest::flatten(&contents, &export_root);
  log::info!(
    "{}: Found {} files to process.",
    manifest_path.display(),
    files.len()
  );

  ui::display_preview(&files, &export_root, config.tags.time_zone);
  if !confirm.confirm("Continue?") {
    return Ok(Flow::Halt);
  }

  let dir_owner = config
    .output_root
    .join(manifest::owner_name(&export_root));
  let mut writer = start_writer()?;

  let total = files.len();
  let summary = materialize::materialize(
    &files,
    &dir_owner,
    &config.tags,
    &mut writer,
    |done, file| log::info!("[{done}/{total}] {}", file.source_path.display()),
  );
  if let Err(e) = writer.finish() {
    log::warn!("{}: {e}", dir_owner.display());
  }

  log::info!(
    "{}: {} files copied ({} with metadata), {} failed.",
    dir_owner.display(),
    summary.copied,
    summary.tagged,
    summary.failed
  );

  Ok(Flow::Continue)
}
