//! Slot storage backed by a sqlite database
use super::SlotStore;
use crate::Error;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

static DATABASE_NAME: &str = "waypoint-tracker.db";

/// Key value slots stored in a single sqlite table
pub struct SqliteSlotStore {
    conn: Connection,
}

impl SqliteSlotStore {
    /// Open (and create if needed) the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Connected to local database located at: {:?}", path.as_ref());
        Self::from_connection(conn)
    }

    /// Open a private database that lives only as long as this instance
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        create_schema(&conn)?;
        Ok(SqliteSlotStore { conn })
    }
}

impl SlotStore for SqliteSlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self
            .conn
            .query_row(
                "select value from slots where name = ?1",
                params![key],
                |r| r.get::<usize, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.conn.execute(
            "insert or replace into slots (name, value) values (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.conn
            .execute("delete from slots where name = ?1", params![key])?;
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), Error> {
        let tx = self.conn.transaction()?;
        for &(key, value) in entries {
            tx.execute(
                "insert or replace into slots (name, value) values (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Create the slots table if it doesn't already exist
fn create_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute(
        "create table if not exists slots (
            name   text primary key,
            value  text not null
        )",
        params![],
    )?;
    Ok(())
}

/// Default database location inside the user's data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(PathBuf::new)
        .join(DATABASE_NAME)
}
