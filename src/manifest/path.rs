// Copyright 2023-5 Seth Pendergrass. See LICENSE.

use std::{
  path::{Path, PathBuf},
  sync::LazyLock,
};

use regex::Regex;

/// Matches a URL scheme anywhere in a URI (e.g. `https://`). The export
/// sometimes records remote URLs in place of archive paths.
static REMOTE_URI: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

/// Resolves an entry's `uri` to a path under `export_root`.
///
/// Returns `None` if `uri` is missing, blank, or a remote URL. Any `?...`
/// query suffix is stripped, and a leading `/` is treated as relative to
/// `export_root`. Does not check that the path exists.
pub fn resolve_path(uri: Option<&str>, export_root: &Path) -> Option<PathBuf> {
  let uri = uri?.trim();
  if uri.is_empty() || REMOTE_URI.is_match(uri) {
    return None;
  }

  let uri = uri.split_once('?').map_or(uri, |(path, _query)| path);
  let uri = uri.trim_start_matches('/');
  if uri.is_empty() {
    return None;
  }

  Some(export_root.join(uri))
}

#[cfg(test)]
mod test_resolve_path {
  use super::*;

  #[test]
  fn joins_uri_to_export_root() {
    assert_eq!(
      resolve_path(Some("media/stories/202311/a.jpg"), Path::new("/export")),
      Some(PathBuf::from("/export/media/stories/202311/a.jpg"))
    );
  }

  #[test]
  fn strips_query_suffix() {
    assert_eq!(
      resolve_path(Some("media/a.jpg?stp=dst-jpg&_nc_ht=1"), Path::new("/export")),
      Some(PathBuf::from("/export/media/a.jpg"))
    );
  }

  #[test]
  fn keeps_leading_slash_under_export_root() {
    assert_eq!(
      resolve_path(Some("/media/a.jpg"), Path::new("/export")),
      Some(PathBuf::from("/export/media/a.jpg"))
    );
  }

  #[test]
  fn rejects_missing_uri() {
    assert_eq!(resolve_path(None, Path::new("/export")), None);
  }

  #[test]
  fn rejects_blank_uri() {
    assert_eq!(resolve_path(Some(""), Path::new("/export")), None);
    assert_eq!(resolve_path(Some("   "), Path::new("/export")), None);
  }

  #[test]
  fn rejects_remote_uri() {
    assert_eq!(
      resolve_path(
        Some("https://scontent.cdninstagram.com/v/t51/a.jpg"),
        Path::new("/export")
      ),
      None
    );
    assert_eq!(
      resolve_path(Some("http://example.com/a.jpg"), Path::new("/export")),
      None
    );
  }

  #[test]
  fn rejects_uri_that_is_only_a_query() {
    assert_eq!(resolve_path(Some("?stp=dst"), Path::new("/export")), None);
  }
}
