//! Daily backup scheduling.
//!
//! The trigger time comes from the stored settings (`backup_time`, `HH:MM`
//! local). Settings are read once at startup, as the original service did;
//! changing the schedule takes effect on daemon restart.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use sqlx::AnyPool;
use tracing::{error, info};

use steward_shared::models::settings::Settings;

use crate::backup::{perform_backup, BackupConfig};

/// Hour and minute used when the stored backup time cannot be parsed.
pub const DEFAULT_BACKUP_TIME: (u32, u32) = (2, 0);

/// Parses an `HH:MM` string into hour and minute. Returns `None` for
/// anything out of range or malformed.
pub fn parse_backup_time(value: &str) -> Option<(u32, u32)> {
    let (h, m) = value.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((hours, minutes))
}

/// Time remaining until the next daily occurrence of `hours:minutes`.
///
/// If the trigger time today has already passed (or is exactly now), the
/// next run is tomorrow.
pub fn duration_until_next(now: NaiveDateTime, hours: u32, minutes: u32) -> Duration {
    let trigger = NaiveTime::from_hms_opt(hours, minutes, 0).expect("validated time");
    let mut next = now.date().and_time(trigger);
    if next <= now {
        next += Duration::days(1);
    }
    next - now
}

/// Runs the daily backup loop until the process is stopped.
///
/// Reads `backup_enabled`/`backup_time` from settings. When backups are
/// disabled the scheduler idles forever (manual backups through the API
/// remain available). An unparseable time falls back to 02:00.
pub async fn run_scheduler(pool: &AnyPool, config: &BackupConfig) -> anyhow::Result<()> {
    let settings = Settings::load(pool).await?;

    if !settings.backup_enabled {
        config.log("Automatic backups are disabled (manual backups only)");
        std::future::pending::<()>().await;
        unreachable!();
    }

    let (hours, minutes) = match parse_backup_time(&settings.backup_time) {
        Some(time) => time,
        None => {
            config.log(&format!(
                "Invalid backup time '{}', using default 02:00",
                settings.backup_time
            ));
            DEFAULT_BACKUP_TIME
        }
    };
    config.log(&format!(
        "Scheduling daily backup at {hours:02}:{minutes:02}"
    ));

    loop {
        let wait = duration_until_next(chrono::Local::now().naive_local(), hours, minutes);
        info!(
            "Next backup in {}h{:02}m",
            wait.num_hours(),
            wait.num_minutes() % 60
        );
        tokio::time::sleep(wait.to_std().unwrap_or(std::time::Duration::from_secs(60))).await;

        config.log("Running scheduled backup");
        if let Err(e) = perform_backup(config).await {
            error!("Scheduled backup failed: {e:#}");
            config.log(&format!("Scheduled backup failed: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_backup_time("02:00"), Some((2, 0)));
        assert_eq!(parse_backup_time("23:59"), Some((23, 59)));
        assert_eq!(parse_backup_time("0:5"), Some((0, 5)));
    }

    #[test]
    fn test_parse_rejects_invalid_times() {
        assert_eq!(parse_backup_time("24:00"), None);
        assert_eq!(parse_backup_time("12:60"), None);
        assert_eq!(parse_backup_time("noon"), None);
        assert_eq!(parse_backup_time("12"), None);
        assert_eq!(parse_backup_time(""), None);
    }

    #[test]
    fn test_next_run_later_today() {
        let wait = duration_until_next(at(1, 0, 0), 2, 0);
        assert_eq!(wait, Duration::hours(1));
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let wait = duration_until_next(at(2, 0, 1), 2, 0);
        assert_eq!(wait, Duration::hours(24) - Duration::seconds(1));
    }

    #[test]
    fn test_trigger_exactly_now_waits_a_day() {
        let wait = duration_until_next(at(2, 0, 0), 2, 0);
        assert_eq!(wait, Duration::days(1));
    }
}
