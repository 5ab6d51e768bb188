mod table;

pub use table::{Column, ForeignKey, SqlType, Table};

use crate::error::{DatabaseRole, MigrationError};
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// How long a statement waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

/// Opens an existing database file. Never creates one.
///
/// The connection stays in SQLite's autocommit mode: no transaction is ever
/// opened, so each statement commits as soon as it runs.
pub fn open_existing<P: AsRef<Path>>(path: P, mode: AccessMode) -> Result<Connection> {
    let path = path.as_ref();
    let flags = match mode {
        AccessMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
        AccessMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
    } | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let conn = Connection::open_with_flags(path, flags)
        .with_context(|| format!("Failed to open database at {:?}", path))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    debug!("Opened {:?} ({:?})", path, mode);
    Ok(conn)
}

/// Checks that every table the migration relies on exposes the columns it
/// needs.
pub fn validate_tables(conn: &Connection, role: DatabaseRole, tables: &[Table]) -> Result<()> {
    let mut problems = Vec::new();
    for table in tables {
        let missing = table.missing_columns(conn)?;
        if missing.len() == table.columns.len() {
            problems.push(format!("table {} is missing", table.name));
        } else if !missing.is_empty() {
            problems.push(format!(
                "table {} lacks column(s) {}",
                table.name,
                missing.join(", ")
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MigrationError::SchemaMismatch {
            database: role,
            detail: problems.join("; "),
        }
        .into())
    }
}
