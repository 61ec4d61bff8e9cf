// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Terminal interaction: confirmations and the preview of files to process.

use std::{
  fmt::Write as _,
  io::{self, BufRead, Write},
  path::Path,
};

use crate::{
  config::TimeZoneMode,
  prim::{NormalizedFile, to_exif_date_time},
};

/// Longest title shown in the preview before it is cut off.
const PREVIEW_TITLE_LEN: usize = 40;

/// Asks the user a yes/no question before a step that writes files.
pub trait Confirm {
  /// Returns `true` to go ahead.
  fn confirm(&mut self, question: &str) -> bool;
}

/// Prompts on stdout and reads the answer from stdin. Anything other than
/// `n` or `no` (case-insensitive) is a yes, including an empty answer. If stdin
/// is closed, the answer is no.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
  fn confirm(&mut self, question: &str) -> bool {
    print!("{question} [Y/n] ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
      Ok(0) | Err(_) => {
        println!();
        false
      }
      Ok(_) => is_yes(&answer),
    }
  }
}

/// Answers yes to everything (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
  fn confirm(&mut self, question: &str) -> bool {
    log::debug!("{question} [Y/n] y (--yes)");
    true
  }
}

fn is_yes(answer: &str) -> bool {
  !matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}

/// Prints the files to process, oldest first.
pub fn display_preview(files: &[NormalizedFile], export_root: &Path, time_zone: TimeZoneMode) {
  print!("{}", render_preview(files, export_root, time_zone));
}

/// Renders a table of `files` sorted by capture time, with paths relative to
/// `export_root` and titles shortened.
pub fn render_preview(
  files: &[NormalizedFile],
  export_root: &Path,
  time_zone: TimeZoneMode,
) -> String {
  let mut sorted = files.iter().collect::<Vec<_>>();
  sorted.sort_by_key(|f| f.created_at);

  let rows = sorted
    .into_iter()
    .map(|f| {
      (
        f.source_path
          .strip_prefix(export_root)
          .unwrap_or(&f.source_path)
          .display()
          .to_string(),
        preview_title(f.title.as_deref()),
        to_exif_date_time(&f.created_at, time_zone),
      )
    })
    .collect::<Vec<_>>();

  let path_width = rows
    .iter()
    .map(|r| r.0.chars().count())
    .chain(["Path".len()])
    .max()
    .unwrap_or_default();
  let title_width = rows
    .iter()
    .map(|r| r.1.chars().count())
    .chain(["Title".len()])
    .max()
    .unwrap_or_default();

  let mut table = format!("Files to process ({}):\n", rows.len());
  let _ = writeln!(table, "{:>path_width$}  {:<title_width$}  Timestamp", "Path", "Title");
  for (path, title, timestamp) in rows {
    let _ = writeln!(table, "{path:>path_width$}  {title:<title_width$}  {timestamp}");
  }

  table
}

/// Title as shown in the preview: `Untitled` if absent, otherwise cut to
/// `PREVIEW_TITLE_LEN` characters and kept on one line.
fn preview_title(title: Option<&str>) -> String {
  let Some(title) = title.filter(|t| !t.is_empty()) else {
    return "Untitled".to_string();
  };

  let title = title.replace(['\r', '\n'], " ");
  if title.chars().count() > PREVIEW_TITLE_LEN {
    format!("{}...", title.chars().take(PREVIEW_TITLE_LEN).collect::<String>())
  } else {
    title
  }
}



#[cfg(test)]
mod test_render_preview {
  use super::*;
  use crate::{prim::ContentCategory, testing::*};

  #[test]
  fn sorts_by_capture_time() {
    let files = [
      normalized_file(
        ContentCategory::Stories,
        "/export/media/new.jpg",
        Some("New"),
        1_700_000_000,
        None,
      ),
      normalized_file(ContentCategory::Stories, "/export/media/old.jpg", None, 1_600_000_000, None),
    ];

    let preview = render_preview(&files, Path::new("/export"), TimeZoneMode::Utc);

    let lines = preview.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Files to process (2):");
    assert!(lines[2].contains("media/old.jpg"));
    assert!(lines[2].contains("Untitled"));
    assert!(lines[2].ends_with("2020:09:13 12:26:40"));
    assert!(lines[3].contains("media/new.jpg"));
    assert!(lines[3].contains("New"));
    assert!(lines[3].ends_with("2023:11:14 22:13:20"));
  }

  #[test]
  fn does_not_reorder_input() {
    let files = [
      normalized_file(ContentCategory::Stories, "/export/b.jpg", None, 2, None),
      normalized_file(ContentCategory::Stories, "/export/a.jpg", None, 1, None),
    ];

    render_preview(&files, Path::new("/export"), TimeZoneMode::Utc);

    assert_eq!(files[0].source_path, Path::new("/export/b.jpg"));
  }
}
