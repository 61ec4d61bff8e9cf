// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! A small utility for migrating the metadata recorded in a social media
//! export's JSON manifest into the media files themselves, acting as a wrapper
//! around `ExifTool`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

mod commands;
mod config;
mod error;
mod io;
mod manifest;
mod materialize;
mod prim;
mod setup;
mod tags;
mod ui;

#[cfg(test)]
mod testing;

use commands::Flow;
use config::{RunConfig, TagOptions, TimeZoneMode};
use ui::{AssumeYes, Confirm, TerminalConfirm};

/// Uses an Instagram "content" JSON file to assign EXIF data. The export root
/// is two directories above each JSON file.
#[derive(Parser)]
struct Args {
  /// Paths of JSON files to process.
  manifests: Vec<PathBuf>,

  /// Output directory. Default: `result/` under the current directory.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Write capture times in UTC rather than local time.
  #[arg(long)]
  utc: bool,

  /// Also write titles as captions.
  #[arg(long)]
  captions: bool,

  /// Answer yes to all confirmations.
  #[arg(short, long)]
  yes: bool,

  /// Verbosity level. Max: 2.
  #[arg(short, action = ArgAction::Count)]
  verbose: u8,
}

fn main() {
  let args = Args::parse();

  let tags = TagOptions {
    time_zone:      if args.utc {
      TimeZoneMode::Utc
    } else {
      TimeZoneMode::Local
    },
    write_captions: args.captions,
  };
  let config = match RunConfig::new(args.output, args.verbose, args.yes, tags) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{e}");
      std::process::exit(1);
    }
  };

  setup::configure_logging(config.verbosity);

  let exiftool = match setup::find_exiftool() {
    Ok(path) => path,
    Err(e) => {
      log::error!("{e}");
      std::process::exit(1);
    }
  };

  let mut confirm: Box<dyn Confirm> = if config.assume_yes {
    Box::new(AssumeYes)
  } else {
    Box::new(TerminalConfirm)
  };

  for manifest in &args.manifests {
    match commands::migrate(&config, &exiftool, manifest, confirm.as_mut()) {
      Ok(Flow::Continue) => {}
      Ok(Flow::Halt) => return,
      Err(e) => log::error!("{e}"),
    }
  }
}
