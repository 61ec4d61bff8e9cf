// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Reading an export's manifest and flattening it into normalized files.

mod entry;
mod path;

use std::{
  fs,
  io::ErrorKind,
  path::{self as std_path, Component, Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub use entry::normalize_entry;

use crate::{
  config::FALLBACK_OWNER,
  error::Error,
  prim::{ContentCategory, NormalizedFile},
};

/// The top-level manifest object, keyed by content category.
pub type Manifest = Map<String, Value>;

/// Gets the export root for `manifest_path`, which is two directories above
/// it (e.g. `export/your_instagram_activity/content/posts_1.json` ->
/// `export/`). `..` components are resolved first, following symlinks when
/// the manifest's directory exists. Does not check that the manifest exists.
pub fn export_root(manifest_path: impl AsRef<Path>) -> Result<PathBuf, Error> {
  let manifest_path = manifest_path.as_ref();
  let absolute = std_path::absolute(manifest_path)
    .map_err(|e| Error::Io(manifest_path.to_owned(), e))?;
  let Some(manifest_dir) = absolute.parent() else {
    return Err(Error::ExportRoot(manifest_path.to_owned()));
  };

  let manifest_dir =
    fs::canonicalize(manifest_dir).unwrap_or_else(|_| normalize_lexically(manifest_dir));

  manifest_dir
    .parent()
    .map(Path::to_path_buf)
    .ok_or_else(|| Error::ExportRoot(manifest_path.to_owned()))
}

/// Drops `.` and applies `..` to `path` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        normalized.pop();
      }
      _ => normalized.push(component),
    }
  }
  normalized
}

/// Name of the export's owner, taken from the export root's directory name.
pub fn owner_name(export_root: &Path) -> String {
  export_root
    .file_name()
    .map_or_else(|| FALLBACK_OWNER.to_string(), |n| n.to_string_lossy().into_owned())
}

/// Reads and parses the manifest at `manifest_path`.
pub fn read_manifest(manifest_path: impl AsRef<Path>) -> Result<Manifest, Error> {
  let manifest_path = manifest_path.as_ref();

  let contents = fs::read(manifest_path).map_err(|e| match e.kind() {
    ErrorKind::NotFound => Error::ManifestNotFound(manifest_path.to_owned()),
    _ => Error::ManifestRead(manifest_path.to_owned(), e),
  })?;

  match serde_json::from_slice::<Value>(&contents) {
    Ok(Value::Object(manifest)) => Ok(manifest),
    Ok(_) => Err(Error::ManifestNotObject(manifest_path.to_owned())),
    Err(e) => Err(Error::ManifestJson(manifest_path.to_owned(), e)),
  }
}

/// Flattens every recognized category in `manifest` into one list of files.
///
/// Categories are read in the order of `ContentCategory::ALL`, and entries in
/// manifest order within each. Entries without a resolvable path are dropped.
pub fn flatten(manifest: &Manifest, export_root: &Path) -> Vec<NormalizedFile> {
  flatten_at(manifest, export_root, Utc::now())
}

/// As `flatten`, with entries missing a timestamp dated `now`.
pub fn flatten_at(
  manifest: &Manifest,
  export_root: &Path,
  now: DateTime<Utc>,
) -> Vec<NormalizedFile> {
  for key in manifest.keys() {
    if ContentCategory::from_key(key).is_none() {
      log::debug!("Ignoring unrecognized manifest key `{key}`.");
    }
  }

  let mut files = Vec::new();

  for category in ContentCategory::ALL {
    let Some(entries) = manifest.get(category.as_str()) else {
      continue;
    };
    let Some(entries) = entries.as_array() else {
      log::warn!("{category}: Expected a list of entries. Skipping.");
      continue;
    };

    let count_before = files.len();
    for entry in entries {
      files.extend(normalize_entry(entry, category, export_root, now));
    }
    log::debug!(
      "{category}: {} files from {} entries.",
      files.len() - count_before,
      entries.len()
    );
  }

  files
}
