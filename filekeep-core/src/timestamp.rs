use crate::error::TimestampError;
use chrono::format::ParseErrorKind;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use std::fs::{FileTimes, OpenOptions};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Raw time arguments as the user typed them. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRequest {
    pub created: Option<String>,
    pub modified: Option<String>,
    pub accessed: Option<String>,
}

/// Parsed timestamps; `None` leaves the choice to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampSpec {
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
}

impl TimestampSpec {
    /// Parse every provided string, failing on the first bad one
    pub fn parse(request: &TimeRequest, format: &str) -> Result<Self, TimestampError> {
        let parse_opt = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_time(s, format))
                .transpose()
        };

        Ok(Self {
            created: parse_opt(&request.created)?,
            modified: parse_opt(&request.modified)?,
            accessed: parse_opt(&request.accessed)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.modified.is_none() && self.accessed.is_none()
    }
}

/// Parse `input` with a chrono strftime `format` as local wall-clock time.
///
/// Formats without a time of day resolve to midnight. A wall-clock time that
/// falls in a DST gap is rejected; an ambiguous one takes the earlier instant.
pub fn parse_time(input: &str, format: &str) -> Result<DateTime<Local>, TimestampError> {
    let invalid = |reason: String| TimestampError::InvalidTimeFormat {
        input: input.to_string(),
        format: format.to_string(),
        reason,
    };

    let naive = match NaiveDateTime::parse_from_str(input, format) {
        Ok(naive) => naive,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            NaiveDate::parse_from_str(input, format)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| invalid(e.to_string()))?
        },
        Err(e) => return Err(invalid(e.to_string())),
    };

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| invalid("time does not exist in the local time zone".to_string()))
}

fn to_system_time(time: &DateTime<Local>) -> SystemTime {
    let secs = time.timestamp();
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs.unsigned_abs())
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

fn to_file_time(time: &DateTime<Local>) -> FileTime {
    FileTime::from_unix_time(time.timestamp(), 0)
}

/// What a backend did, for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampOutcome {
    pub backend: String,
    pub warnings: Vec<String>,
}

/// Platform capability for writing file timestamps.
///
/// Backends differ in what an absent value means; see each implementation.
pub trait TimestampBackend {
    fn name(&self) -> &'static str;

    fn apply(&self, path: &Path, spec: &TimestampSpec)
        -> Result<TimestampOutcome, TimestampError>;
}

/// Sets creation, modification and access time together.
///
/// Absent values keep the file's current value. Creation time can only be
/// written on Windows; elsewhere a creation request is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBackend;

impl TimestampBackend for FullBackend {
    fn name(&self) -> &'static str {
        "full"
    }

    fn apply(
        &self,
        path: &Path,
        spec: &TimestampSpec,
    ) -> Result<TimestampOutcome, TimestampError> {
        let write_failed = |source: io::Error| TimestampError::TimestampWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        #[cfg(not(windows))]
        {
            if spec.created.is_some() {
                return Err(write_failed(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "creation time cannot be set on this platform",
                )));
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(write_failed)?;
        let current = file.metadata().map_err(write_failed)?;

        let accessed = match &spec.accessed {
            Some(t) => to_system_time(t),
            None => current.accessed().map_err(write_failed)?,
        };
        let modified = match &spec.modified {
            Some(t) => to_system_time(t),
            None => current.modified().map_err(write_failed)?,
        };

        #[allow(unused_mut)]
        let mut times = FileTimes::new()
            .set_accessed(accessed)
            .set_modified(modified);

        #[cfg(windows)]
        {
            use std::os::windows::fs::FileTimesExt;

            let created = match &spec.created {
                Some(t) => to_system_time(t),
                None => current.created().map_err(write_failed)?,
            };
            times = times.set_created(created);
        }

        file.set_times(times).map_err(write_failed)?;
        debug!(path = %path.display(), "Applied timestamps with full backend");

        Ok(TimestampOutcome {
            backend: self.name().to_string(),
            warnings: Vec::new(),
        })
    }
}

/// Sets modification and access time only.
///
/// A creation time is accepted and ignored with a warning. Absent
/// modification/access values become the current time, not the file's
/// existing value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitedBackend;

impl TimestampBackend for LimitedBackend {
    fn name(&self) -> &'static str {
        "limited"
    }

    fn apply(
        &self,
        path: &Path,
        spec: &TimestampSpec,
    ) -> Result<TimestampOutcome, TimestampError> {
        let mut warnings = Vec::new();
        if spec.created.is_some() {
            let message =
                "creation time cannot be changed on this platform; the value was ignored".to_string();
            warn!(path = %path.display(), "{message}");
            warnings.push(message);
        }

        let now = FileTime::now();
        let atime = spec.accessed.as_ref().map_or(now, to_file_time);
        let mtime = spec.modified.as_ref().map_or(now, to_file_time);

        filetime::set_file_times(path, atime, mtime).map_err(|source| {
            TimestampError::TimestampWriteFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "Applied timestamps with limited backend");

        Ok(TimestampOutcome {
            backend: self.name().to_string(),
            warnings,
        })
    }
}

/// Backend for the running platform
pub fn select_backend() -> Box<dyn TimestampBackend> {
    if cfg!(windows) {
        Box::new(FullBackend)
    } else {
        Box::new(LimitedBackend)
    }
}

/// The target must exist and be a regular file
pub fn check_target(path: &Path) -> Result<(), TimestampError> {
    if !path.exists() {
        return Err(TimestampError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(TimestampError::InvalidTarget(path.to_path_buf()));
    }
    Ok(())
}

/// Validate the target, parse every time string, then hand the parsed
/// values to `backend`. Nothing is written unless all inputs are valid.
pub fn modify_file_times(
    path: &Path,
    request: &TimeRequest,
    format: &str,
    backend: &dyn TimestampBackend,
) -> Result<TimestampOutcome, TimestampError> {
    check_target(path)?;
    let spec = TimestampSpec::parse(request, format)?;
    backend.apply(path, &spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIME_FORMAT;
    use chrono::{Datelike, Timelike};
    use std::fs;
    use tempfile::TempDir;

    fn request(
        created: Option<&str>,
        modified: Option<&str>,
        accessed: Option<&str>,
    ) -> TimeRequest {
        TimeRequest {
            created: created.map(str::to_string),
            modified: modified.map(str::to_string),
            accessed: accessed.map(str::to_string),
        }
    }

    fn file_with_times(dir: &Path, atime: i64, mtime: i64) -> std::path::PathBuf {
        let path = dir.join("target.bin");
        fs::write(&path, b"data").unwrap();
        filetime::set_file_times(
            &path,
            FileTime::from_unix_time(atime, 0),
            FileTime::from_unix_time(mtime, 0),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_parse_time_default_format() {
        let t = parse_time("2023-01-01 20:00:00", DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2023, 1, 1));
        assert_eq!((t.hour(), t.minute(), t.second()), (20, 0, 0));
    }

    #[test]
    fn test_parse_time_custom_format() {
        let t = parse_time("31/12/2020 23:59", "%d/%m/%Y %H:%M").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2020, 12, 31));
        assert_eq!((t.hour(), t.minute(), t.second()), (23, 59, 0));
    }

    #[test]
    fn test_parse_time_date_only_format_is_midnight() {
        let t = parse_time("2021-06-15", "%Y-%m-%d").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
        assert_eq!(t.day(), 15);
    }

    #[test]
    fn test_parse_time_rejects_bad_input() {
        let err = parse_time("2023/01/01", DEFAULT_TIME_FORMAT).unwrap_err();
        match err {
            TimestampError::InvalidTimeFormat { input, format, .. } => {
                assert_eq!(input, "2023/01/01");
                assert_eq!(format, DEFAULT_TIME_FORMAT);
            },
            other => panic!("unexpected error: {other:?}"),
        }

        let message = parse_time("yesterday", DEFAULT_TIME_FORMAT)
            .unwrap_err()
            .to_string();
        assert!(message.contains("yesterday"));
        assert!(message.contains(DEFAULT_TIME_FORMAT));
    }

    #[test]
    fn test_spec_treats_empty_strings_as_absent() {
        let spec = TimestampSpec::parse(&request(Some(""), Some("  "), None), DEFAULT_TIME_FORMAT)
            .unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_spec_fails_on_any_bad_value() {
        let result = TimestampSpec::parse(
            &request(None, Some("2023-01-01 20:00:00"), Some("bogus")),
            DEFAULT_TIME_FORMAT,
        );
        assert!(matches!(
            result,
            Err(TimestampError::InvalidTimeFormat { ref input, .. }) if input == "bogus"
        ));
    }

    #[test]
    fn test_check_target() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(check_target(&missing), Err(TimestampError::NotFound(_))));
        assert!(matches!(
            check_target(temp_dir.path()),
            Err(TimestampError::InvalidTarget(_))
        ));

        let file = temp_dir.path().join("ok.txt");
        fs::write(&file, "").unwrap();
        assert!(check_target(&file).is_ok());
    }

    #[test]
    fn test_limited_backend_sets_given_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let spec = TimestampSpec::parse(
            &request(None, Some("2023-01-01 20:00:00"), Some("2022-05-05 05:05:05")),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();

        let outcome = LimitedBackend.apply(&path, &spec).unwrap();
        assert_eq!(outcome.backend, "limited");
        assert!(outcome.warnings.is_empty());

        let meta = fs::metadata(&path).unwrap();
        assert_eq!(
            FileTime::from_last_modification_time(&meta).unix_seconds(),
            spec.modified.unwrap().timestamp()
        );
        assert_eq!(
            FileTime::from_last_access_time(&meta).unix_seconds(),
            spec.accessed.unwrap().timestamp()
        );
    }

    #[test]
    fn test_limited_backend_defaults_missing_values_to_now() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let spec = TimestampSpec::parse(
            &request(None, Some("2023-01-01 20:00:00"), None),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();
        let before = FileTime::now().unix_seconds();

        LimitedBackend.apply(&path, &spec).unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert!(FileTime::from_last_access_time(&meta).unix_seconds() >= before - 1);
    }

    #[test]
    fn test_limited_backend_warns_about_creation_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let spec = TimestampSpec::parse(
            &request(Some("2023-01-01 20:00:00"), None, None),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();

        let outcome = LimitedBackend.apply(&path, &spec).unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("creation time"));
    }

    #[test]
    fn test_full_backend_keeps_existing_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let before = fs::metadata(&path).unwrap();
        let spec = TimestampSpec::parse(
            &request(None, Some("2023-01-01 20:00:00"), None),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();

        let outcome = FullBackend.apply(&path, &spec).unwrap();
        assert_eq!(outcome.backend, "full");

        let after = fs::metadata(&path).unwrap();
        assert_eq!(after.accessed().unwrap(), before.accessed().unwrap());
        assert_eq!(
            FileTime::from_last_modification_time(&after).unix_seconds(),
            spec.modified.unwrap().timestamp()
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_full_backend_rejects_creation_time_off_windows() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let before = fs::metadata(&path).unwrap();
        let spec = TimestampSpec::parse(
            &request(Some("2023-01-01 20:00:00"), None, None),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();

        let err = FullBackend.apply(&path, &spec).unwrap_err();
        assert!(matches!(err, TimestampError::TimestampWriteFailed { .. }));

        let after = fs::metadata(&path).unwrap();
        assert_eq!(after.modified().unwrap(), before.modified().unwrap());
    }

    #[cfg(windows)]
    #[test]
    fn test_full_backend_creation_time_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let before = fs::metadata(&path).unwrap();
        let spec = TimestampSpec::parse(
            &request(Some("2023-01-01 20:00:00"), None, None),
            DEFAULT_TIME_FORMAT,
        )
        .unwrap();

        FullBackend.apply(&path, &spec).unwrap();

        let after = fs::metadata(&path).unwrap();
        assert_eq!(after.created().unwrap(), to_system_time(&spec.created.unwrap()));
        assert_eq!(after.modified().unwrap(), before.modified().unwrap());
        assert_eq!(after.accessed().unwrap(), before.accessed().unwrap());
    }

    #[test]
    fn test_modify_file_times_validates_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = file_with_times(temp_dir.path(), 1_000_000, 2_000_000);
        let before = fs::metadata(&path).unwrap();

        let err = modify_file_times(
            &path,
            &request(None, Some("2023-01-01 20:00:00"), Some("not a time")),
            DEFAULT_TIME_FORMAT,
            &LimitedBackend,
        )
        .unwrap_err();
        assert!(matches!(err, TimestampError::InvalidTimeFormat { .. }));

        let after = fs::metadata(&path).unwrap();
        assert_eq!(after.modified().unwrap(), before.modified().unwrap());
        assert_eq!(after.accessed().unwrap(), before.accessed().unwrap());
    }

    #[test]
    fn test_select_backend_matches_platform() {
        let expected = if cfg!(windows) { "full" } else { "limited" };
        assert_eq!(select_backend().name(), expected);
    }
}
