// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Copying normalized files into the destination tree and writing their
//! metadata.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{
  config::TagOptions,
  error::Error,
  io,
  prim::NormalizedFile,
  tags::{Tags, map_tags},
};

/// Writes metadata tags into a file in place.
pub trait TagWriter {
  fn write_tags(&mut self, file: &Path, tags: &Tags) -> Result<(), Error>;

  /// Releases the writer once the batch is done.
  fn finish(self) -> Result<(), Error>
  where
    Self: Sized,
  {
    Ok(())
  }
}

/// Counts of what happened over a batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
  /// Files copied into the destination tree.
  pub copied: usize,
  /// Copied files whose metadata was also written.
  pub tagged: usize,
  /// Files that could not be copied, or whose times could not be set.
  pub failed: usize,
}

/// Gets the destination for `file`: `dir_owner/<category>/<file name>`.
pub fn destination_path(dir_owner: &Path, file: &NormalizedFile) -> Option<PathBuf> {
  let file_name = file.source_path.file_name()?;
  Some(dir_owner.join(file.category.as_str()).join(file_name))
}

/// Copies each of `files` under `dir_owner`, writes its tags with `writer`,
/// and sets its access and modification times to its capture time.
///
/// Failures are logged and only affect the file they occur on. If writing tags
/// fails, the copy is kept and its times are still set. `progress` is called
/// once per file, in order, with the number of files done so far.
pub fn materialize(
  files: &[NormalizedFile],
  dir_owner: &Path,
  options: &TagOptions,
  writer: &mut impl TagWriter,
  mut progress: impl FnMut(usize, &NormalizedFile),
) -> Summary {
  let mut summary = Summary::default();

  for (i, file) in files.iter().enumerate() {
    match materialize_file(file, dir_owner, options, writer) {
      Ok(tagged) => {
        summary.copied += 1;
        if tagged {
          summary.tagged += 1;
        }
      }
      Err(e) => {
        log::error!("{e}");
        summary.failed += 1;
      }
    }
    progress(i + 1, file);
  }

  summary
}

/// Materializes a single file. Returns whether its tags were written.
fn materialize_file(
  file: &NormalizedFile,
  dir_owner: &Path,
  options: &TagOptions,
  writer: &mut impl TagWriter,
) -> Result<bool, Error> {
  let file_dst =
    destination_path(dir_owner, file).ok_or_else(|| Error::NoFileName(file.source_path.clone()))?;

  if let Some(dir_dst) = file_dst.parent() {
    fs::create_dir_all(dir_dst).map_err(|e| Error::Io(dir_dst.to_owned(), e))?;
  }

  fs::copy(&file.source_path, &file_dst).map_err(|e| Error::Io(file.source_path.clone(), e))?;
  log::debug!(
    "{}: Copied to {}.",
    file.source_path.display(),
    file_dst.display()
  );

  let tagged = match writer.write_tags(&file_dst, &map_tags(file, options)) {
    Ok(()) => true,
    Err(e) => {
      log::error!(
        "{}: Failed to write metadata, keeping copy as-is.\n{e}",
        file.source_path.display()
      );
      false
    }
  };

  io::set_file_times(&file_dst, &file.created_at)?;

  Ok(tagged)
}
