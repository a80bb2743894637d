// src/file.rs

use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, ErrorKind},
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};

use crate::config::consts::{ARTIFACT_EXT, ARTIFACT_PREFIX, ARTIFACT_TIMESTAMP};
use crate::data::VehicleRecord;
use crate::error::{FeedError, Result};
use crate::xml::FeedWriter;

/// `<dir>/vehicle_feed_<YYYYmmdd_HHMMSS>.xml` for `seq` 1,
/// `<dir>/vehicle_feed_<YYYYmmdd_HHMMSS>_<seq>.xml` after that.
pub fn artifact_path<Tz: TimeZone>(dir: &Path, at: &DateTime<Tz>, seq: u32) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format(ARTIFACT_TIMESTAMP).to_string();
    let name = if seq <= 1 {
        join!(ARTIFACT_PREFIX, &stamp, ".", ARTIFACT_EXT)
    } else {
        join!(ARTIFACT_PREFIX, &stamp, "_", &seq.to_string(), ".", ARTIFACT_EXT)
    };
    dir.join(name)
}

/// Write the feed for `records` to a new artifact in `dir`, creating the directory.
/// Never replaces an existing file: an artifact from the same second pushes this
/// one to the next free sequence number.
/// Returns the artifact path and the number of vehicles written.
pub fn write_artifact<Tz: TimeZone>(dir: &Path, at: &DateTime<Tz>, records: &[VehicleRecord]) -> Result<(PathBuf, usize)>
where
    Tz::Offset: std::fmt::Display,
{
    if !dir.as_os_str().is_empty() {
        ensure_directory(dir)?;
    }

    let mut seq = 1;
    loop {
        let path = artifact_path(dir, at, seq);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                seq += 1;
                continue;
            }
            Err(e) => return Err(FeedError::io(&path, e)),
        };

        let io_err = |e| FeedError::io(&path, e);
        let mut feed = FeedWriter::new(BufWriter::new(file)).map_err(io_err)?;
        for record in records {
            feed.add_vehicle(record).map_err(io_err)?;
        }
        let written = feed.finish().map_err(io_err)?;
        return Ok((path, written));
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(FeedError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| FeedError::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn noon() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn artifact_name_is_timestamped() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 30).unwrap().and_utc();
        assert_eq!(
            artifact_path(Path::new("out"), &at, 1),
            Path::new("out").join("vehicle_feed_20240309_070530.xml")
        );
        assert_eq!(
            artifact_path(Path::new("out"), &at, 3),
            Path::new("out").join("vehicle_feed_20240309_070530_3.xml")
        );
        let _ = artifact_path(Path::new("out"), &Utc::now(), 1);
    }

    #[test]
    fn write_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a/b");
        let (path, written) = write_artifact(&out, &noon(), &[VehicleRecord::default()]).unwrap();
        assert_eq!(written, 1);
        assert_eq!(path, out.join("vehicle_feed_20240309_120000.xml"));
        assert!(fs::read_to_string(&path).unwrap().contains("<vehicle>"));
    }

    #[test]
    fn same_second_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let (first, _) = write_artifact(dir.path(), &noon(), &[VehicleRecord::default()]).unwrap();
        let (second, _) = write_artifact(dir.path(), &noon(), &[]).unwrap();
        let (third, _) = write_artifact(dir.path(), &noon(), &[]).unwrap();

        assert_eq!(first.file_name().unwrap(), "vehicle_feed_20240309_120000.xml");
        assert_eq!(second.file_name().unwrap(), "vehicle_feed_20240309_120000_2.xml");
        assert_eq!(third.file_name().unwrap(), "vehicle_feed_20240309_120000_3.xml");
        assert!(fs::read_to_string(&first).unwrap().contains("<vehicle>"));
        assert!(!fs::read_to_string(&second).unwrap().contains("<vehicle>"));
    }

    #[test]
    fn file_in_place_of_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "x").unwrap();
        let err = write_artifact(&blocker, &noon(), &[]).unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }
}
