// Copyright 2023-5 Seth Pendergrass. See LICENSE.

use std::fmt::{self, Display, Formatter};

/// A class of exported content. Each category is a top-level key in the
/// export's manifest, and names the subfolder its files are written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentCategory {
  ArchivedPostMedia,
  Stories,
  ProfilePicture,
  RecentlyDeletedMedia,
}

impl ContentCategory {
  /// All recognized categories, in the order they are read from a manifest.
  pub const ALL: [ContentCategory; 4] = [
    ContentCategory::ArchivedPostMedia,
    ContentCategory::Stories,
    ContentCategory::ProfilePicture,
    ContentCategory::RecentlyDeletedMedia,
  ];

  /// Manifest key, which doubles as the destination subfolder name.
  pub fn as_str(self) -> &'static str {
    match self {
      ContentCategory::ArchivedPostMedia => "ig_archived_post_media",
      ContentCategory::Stories => "ig_stories",
      ContentCategory::ProfilePicture => "ig_profile_picture",
      ContentCategory::RecentlyDeletedMedia => "ig_recently_deleted_media",
    }
  }

  pub fn from_key(key: &str) -> Option<ContentCategory> {
    ContentCategory::ALL.into_iter().find(|c| c.as_str() == key)
  }
}

impl Display for ContentCategory {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
