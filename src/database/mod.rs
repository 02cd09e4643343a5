use anyhow::Result;
use log::debug;
use queries::*;
use rusqlite::{Connection, params, params_from_iter};
use std::{
    fs,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

mod queries;
mod rows;
mod tables;

pub use rows::LibraryRows;

use crate::{
    Config,
    domain::{TrackId, TrackRow},
    queue::{QueueService, RowStore},
};

pub struct Database {
    conn: Connection,
    // Bumped on every library write; row sets read before a bump go stale
    generation: Arc<AtomicU64>,
}

impl Database {
    pub fn open(config: &Config) -> Result<Self> {
        let db_path = config.database_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Self::open_at(db_path)
    }

    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!("Opened library at {}", path.as_ref().display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let mut db = Database {
            conn,
            generation: Arc::new(AtomicU64::new(0)),
        };
        db.create_tables()?;

        Ok(db)
    }

    fn create_tables(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(tables::CREATE_TABLES)?;
        tx.commit()?;

        Ok(())
    }

    fn invalidate_rows(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    // ====================
    //   TRACK OPERATIONS
    // ====================

    pub fn insert_tracks(&mut self, tracks: &[TrackRow]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_TRACK)?;
            for track in tracks {
                stmt.execute(params![track.id, &track.title, &track.artist, &track.album])?;
            }
        }
        tx.commit()?;
        self.invalidate_rows();

        Ok(())
    }

    /// Deletes library rows. Queue entries naming them are left in place.
    pub fn delete_tracks(&mut self, ids: &[TrackId]) -> Result<usize> {
        let mut deleted = 0;

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(DELETE_TRACK)?;
            for id in ids {
                deleted += stmt.execute([id])?;
            }
        }
        tx.commit()?;
        self.invalidate_rows();

        Ok(deleted)
    }

    // ====================
    //   QUEUE OPERATIONS
    // ====================

    pub fn enqueue(&mut self, ids: &[TrackId]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(ENQUEUE)?;
            for id in ids {
                stmt.execute([id])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    pub fn clear_queue(&mut self) -> Result<()> {
        self.conn.execute(CLEAR_QUEUE, [])?;
        Ok(())
    }
}

impl QueueService for Database {
    fn get_order(&mut self) -> Result<Vec<TrackId>> {
        let order = self
            .conn
            .prepare_cached(GET_QUEUE)?
            .query_map([], |row| row.get("track_id"))?
            .collect::<Result<Vec<TrackId>, _>>()?;

        Ok(order)
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<usize> {
        if start > end {
            return Ok(0);
        }

        let count = (end - start + 1) as i64;
        let removed = self
            .conn
            .execute(REMOVE_QUEUE_RANGE, params![start as i64, count])?;

        Ok(removed)
    }
}

impl RowStore for Database {
    type Rows = LibraryRows;

    fn query_rows(&mut self, ids: &[TrackId]) -> Result<LibraryRows> {
        let generation = Arc::clone(&self.generation);

        if ids.is_empty() {
            return Ok(LibraryRows::new(Vec::new(), generation));
        }

        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        // Sorted chunks concatenate into a sorted result
        let mut rows = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_BOUND_IDS) {
            let mut stmt = self.conn.prepare_cached(&select_rows(chunk.len()))?;
            let found = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok(TrackRow {
                    id: row.get("id")?,
                    title: row.get("title")?,
                    artist: row.get("artist")?,
                    album: row.get("album")?,
                })
            })?;
            for row in found {
                rows.push(row?);
            }
        }

        Ok(LibraryRows::new(rows, generation))
    }
}
