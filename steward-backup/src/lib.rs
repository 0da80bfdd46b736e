//! # Steward Backup
//!
//! Point-in-time snapshots of whichever database engine is active, plus the
//! daily scheduler that drives them.
//!
//! - SQLite: copy the database file and its WAL/SHM side files.
//! - MySQL: shell out to `mysqldump`; on failure, leave a placeholder file
//!   documenting the reason instead of failing silently.
//!
//! Snapshots land in the backup directory as `backup-<engine>-<timestamp>`
//! artifacts; after every run the newest seven are kept and the rest are
//! deleted. Every action appends a timestamped line to `logs/backup.log`.
//!
//! Backups are not coordinated with in-flight writes; a copy taken mid-write
//! can be torn. Accepted operational risk for this system.

pub mod backup;
pub mod scheduler;
