// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Fixed values written into every migrated file, and output layout defaults.

/// Directory created under the current directory to hold migrated files.
pub const OUTPUT_DIR: &str = "result";

/// Owner name used when the export root has no directory name of its own
/// (e.g. the export sits directly at `/`).
pub const FALLBACK_OWNER: &str = "export";

/// `IPTC:Keywords` value marking content as originating from the platform.
pub const KEYWORDS: &str = "Instagram";

/// `IPTC:OriginatingProgram` value.
pub const ORIGINATING_PROGRAM: &str = "Instagram";

/// `IPTC:CodedCharacterSet` value, so readers decode IPTC strings as UTF-8.
pub const CODED_CHARACTER_SET: &str = "utf8";

/// Format used for all EXIF date & time tags.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
