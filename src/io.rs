// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Functions for running `ExifTool` and manipulating files.

use std::{
  ffi::OsStr,
  io::{BufRead, BufReader, Write},
  path::{Path, PathBuf},
  process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio},
};

use chrono::{DateTime, Utc};
use filetime::FileTime;

use crate::{error::Error, materialize::TagWriter, tags::Tags};

/// Minimum supported version of `ExifTool` (for `-stay_open` with `-echo4`).
const EXIFTOOL_MIN_VERSION: (u32, u32) = (10, 0);

/// Locates `ExifTool` on `PATH`.
pub fn locate_exiftool() -> Result<PathBuf, Error> {
  which::which("exiftool").map_err(|_| Error::ExifToolMissing)
}

/// Check that `ExifTool` runs and is new enough.
pub fn exiftool_check(exiftool: impl AsRef<Path>) -> Result<(), Error> {
  version_check(run_exiftool(exiftool, ["-ver"])?, EXIFTOOL_MIN_VERSION).map_err(Error::ExifTool)
}

/// Runs `ExifTool` once with `args`, returning stdout.
pub fn run_exiftool<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(
  exiftool: impl AsRef<Path>,
  args: I,
) -> Result<Vec<u8>, Error> {
  let mut cmd = Command::new(exiftool.as_ref());
  cmd.args(args);

  let output = cmd.output().map_err(|e| {
    Error::ExifTool(format!(
      "ExifTool failed to run.\nArgs:\n{}\nError:\n{e}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
    ))
  })?;

  if !output.status.success() {
    return Err(Error::ExifTool(format!(
      "ExifTool did not run successfully.\nArgs:\n{}\nstderr:\n{}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
      String::from_utf8_lossy(&output.stderr)
    )));
  }

  Ok(output.stdout)
}

/// Sets the access and modification times of `file` to `date_time`.
pub fn set_file_times(file: impl AsRef<Path>, date_time: &DateTime<Utc>) -> Result<(), Error> {
  let file = file.as_ref();
  let time = FileTime::from_unix_time(date_time.timestamp(), date_time.timestamp_subsec_nanos());
  filetime::set_file_times(file, time, time).map_err(|e| Error::Io(file.to_owned(), e))
}

/// Output of one command run within an `ExifToolSession`.
#[derive(Debug, Default)]
pub struct Execution {
  pub stdout: String,
  pub stderr: String,
}

/// A long-running `ExifTool` process (`-stay_open`), reused across commands to
/// avoid paying its startup cost per file. The process is shut down when the
/// session is closed or dropped.
pub struct ExifToolSession {
  child:      Child,
  stdin:      ChildStdin,
  stdout:     BufReader<ChildStdout>,
  stderr:     BufReader<ChildStderr>,
  executions: u32,
  closed:     bool,
}

impl ExifToolSession {
  /// Starts `exiftool`, reading commands from stdin.
  pub fn start(exiftool: impl AsRef<Path>) -> Result<Self, Error> {
    let mut cmd = Command::new(exiftool.as_ref());
    cmd.args(["-stay_open", "True", "-@", "-"]);
    Self::spawn(cmd)
  }

  /// Starts the session from `cmd`, which must already carry the
  /// `-stay_open` arguments.
  fn spawn(mut cmd: Command) -> Result<Self, Error> {
    cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| {
      Error::ExifTool(format!(
        "{}: Failed to start ExifTool ({e}).",
        Path::new(cmd.get_program()).display()
      ))
    })?;

    let (Some(stdin), Some(stdout), Some(stderr)) =
      (child.stdin.take(), child.stdout.take(), child.stderr.take())
    else {
      let _ = child.kill();
      return Err(Error::ExifTool(
        "Failed to connect to ExifTool's standard streams.".to_string(),
      ));
    };

    log::debug!("Started ExifTool session (pid {}).", child.id());

    Ok(Self {
      child,
      stdin,
      stdout: BufReader::new(stdout),
      stderr: BufReader::new(stderr),
      executions: 0,
      closed: false,
    })
  }

  /// Runs one command with `args`, one argument per item, and waits for it to
  /// finish.
  pub fn execute<I: IntoIterator<Item = S>, S: AsRef<str>>(
    &mut self,
    args: I,
  ) -> Result<Execution, Error> {
    if self.closed {
      return Err(Error::ExifTool("ExifTool session is closed.".to_string()));
    }

    self.executions += 1;
    let request = make_request(args, self.executions);
    let marker = ready_marker(self.executions);

    self
      .stdin
      .write_all(request.as_bytes())
      .and_then(|()| self.stdin.flush())
      .map_err(|e| Error::ExifTool(format!("Failed to send command to ExifTool ({e}).")))?;

    // `-execute` reports on stdout, `-echo4` on stderr, both after the
    // command completes.
    let stdout = read_until_marker(&mut self.stdout, &marker)?;
    let stderr = read_until_marker(&mut self.stderr, &marker)?;
    log::trace!("ExifTool output:\n{stdout}{stderr}");

    Ok(Execution { stdout, stderr })
  }

  /// Asks `ExifTool` to exit and waits for it.
  pub fn close(mut self) -> Result<(), Error> {
    self.shut_down()
  }

  fn shut_down(&mut self) -> Result<(), Error> {
    if self.closed {
      return Ok(());
    }
    self.closed = true;

    let _ = self
      .stdin
      .write_all(b"-stay_open\nFalse\n")
      .and_then(|()| self.stdin.flush());
    let status = self
      .child
      .wait()
      .map_err(|e| Error::ExifTool(format!("Failed to wait for ExifTool to exit ({e}).")))?;
    log::debug!("ExifTool session ended ({status}).");

    if status.success() {
      Ok(())
    } else {
      Err(Error::ExifTool(format!("ExifTool exited unsuccessfully ({status}).")))
    }
  }
}

impl Drop for ExifToolSession {
  fn drop(&mut self) {
    if let Err(e) = self.shut_down() {
      log::warn!("{e}");
    }
  }
}

impl TagWriter for ExifToolSession {
  fn write_tags(&mut self, file: &Path, tags: &Tags) -> Result<(), Error> {
    let execution = self.execute(make_write_args(file, tags)?)?;
    check_write(file, &execution)
  }

  fn finish(self) -> Result<(), Error> {
    self.close()
  }
}

/// Builds the arguments to write `tags` into `file`, in place and without
/// keeping a backup.
fn make_write_args(file: &Path, tags: &Tags) -> Result<Vec<String>, Error> {
  let file_str = file
    .to_str()
    .ok_or_else(|| Error::ExifTool(format!("{}: Path is not valid UTF-8.", file.display())))?;

  let mut args = tags
    .iter()
    .map(|(tag, value)| format!("-{tag}={value}"))
    .collect::<Vec<_>>();
  args.push("-overwrite_original".to_string());
  args.push(file_str.to_string());

  Ok(args)
}

/// Builds the stdin text for one `-stay_open` command. Arguments are one per
/// line, so line breaks within an argument become spaces.
fn make_request<I: IntoIterator<Item = S>, S: AsRef<str>>(args: I, execution: u32) -> String {
  let mut request = String::new();
  for arg in args {
    request.push_str(&arg.as_ref().replace(['\r', '\n'], " "));
    request.push('\n');
  }
  request.push_str(&format!("-echo4\n{}\n-execute{execution}\n", ready_marker(execution)));
  request
}

fn ready_marker(execution: u32) -> String {
  format!("{{ready{execution}}}")
}

/// Reads lines from `reader` until one equals `marker`, returning everything
/// before it.
fn read_until_marker(reader: &mut impl BufRead, marker: &str) -> Result<String, Error> {
  let mut output = String::new();
  let mut line = String::new();

  loop {
    line.clear();
    let read = reader
      .read_line(&mut line)
      .map_err(|e| Error::ExifTool(format!("Failed to read ExifTool output ({e}).")))?;
    if read == 0 {
      return Err(Error::ExifTool(format!(
        "ExifTool quit unexpectedly.\nOutput so far:\n{output}"
      )));
    }
    if line.trim_end() == marker {
      return Ok(output);
    }
    output.push_str(&line);
  }
}

/// Interprets the output of writing tags to `file`.
fn check_write(file: &Path, execution: &Execution) -> Result<(), Error> {
  let stderr = execution.stderr.trim();

  let failed = stderr.lines().any(|l| l.starts_with("Error"))
    || !execution.stdout.contains("1 image files updated");
  if failed {
    return Err(Error::ExifTool(format!(
      "{}: Failed to write metadata.\nstdout:\n{}\nstderr:\n{stderr}",
      file.display(),
      execution.stdout.trim(),
    )));
  }

  for warning in stderr.lines().filter(|l| !l.is_empty()) {
    log::warn!("{}: {warning}", file.display());
  }

  Ok(())
}

/// Returns whether `version` is as new or newer than `version_required_min`,
/// where `version` is from `ExifTool`'s stdout.
fn version_check(version: Vec<u8>, version_required_min: (u32, u32)) -> Result<(), String> {
  let version = String::from_utf8_lossy(&version);
  let Some((major, minor)) = version.trim().split_once('.') else {
    return Err(format!("Unexpected ExifTool version string: \"{version}\""));
  };

  let major = major.parse::<u32>();
  let minor = minor.parse::<u32>();
  let (Ok(major), Ok(minor)) = (major, minor) else {
    return Err(format!("Unexpected ExifTool version: {version}"));
  };

  if major > version_required_min.0
    || (major == version_required_min.0 && minor >= version_required_min.1)
  {
    Ok(())
  } else {
    Err(format!(
      "ExifTool version {major}.{minor} is too old (needs {}.{} or newer).",
      version_required_min.0, version_required_min.1
    ))
  }
}

#[cfg(test)]
mod test_check_write {
  use super::*;
  use crate::testing::*;

  fn execution(stdout: &str, stderr: &str) -> Execution {
    Execution {
      stdout: stdout.to_string(),
      stderr: stderr.to_string(),
    }
  }

  #[test]
  fn passes_on_update() {
    let res = check_write(
      Path::new("/result/a.jpg"),
      &execution("    1 image files updated\n", ""),
    );

    assert!(res.is_ok());
  }

  #[test]
  fn passes_with_warning() {
    let res = check_write(
      Path::new("/result/a.jpg"),
      &execution(
        "    1 image files updated\n",
        "Warning: [minor] Fixed incorrect URI for xmlns:MicrosoftPhoto - a.jpg\n",
      ),
    );

    assert!(res.is_ok());
  }

  #[test]
  fn fails_on_error() {
    let res = check_write(
      Path::new("/result/a.mp4"),
      &execution(
        "    0 image files updated\n    1 files weren't updated due to errors\n",
        "Error: Not a valid JPG - /result/a.mp4\n",
      ),
    );

    assert_err!(res.map_err(|e| e.to_string()), "Failed to write metadata");
  }

  #[test]
  fn fails_when_nothing_updated() {
    let res = check_write(
      Path::new("/result/a.jpg"),
      &execution("    0 image files updated\n    1 image files unchanged\n", ""),
    );

    assert!(res.is_err());
  }
}
