pub const INSERT_TRACK: &str = "
    INSERT OR REPLACE INTO tracks (
        id,
        title,
        artist,
        album
    ) VALUES (?1, ?2, ?3, ?4)
";

pub const DELETE_TRACK: &str = "
    DELETE FROM tracks WHERE id = ?
";

pub const GET_QUEUE: &str = "
    SELECT track_id FROM queue
    ORDER BY id ASC
";

pub const ENQUEUE: &str = "
    INSERT INTO queue (track_id) VALUES (?)
";

pub const CLEAR_QUEUE: &str = "
    DELETE FROM queue
";

// Positions are implicit in insertion order, so a range is an
// OFFSET/LIMIT window over the ordered queue
pub const REMOVE_QUEUE_RANGE: &str = "
    DELETE FROM queue WHERE id IN (
        SELECT id FROM queue
        ORDER BY id ASC
        LIMIT ?2 OFFSET ?1
    )
";

// SQLite's default bound-parameter limit before 3.32
pub const MAX_BOUND_IDS: usize = 999;

pub fn select_rows(count: usize) -> String {
    let placeholders = vec!["?"; count].join(", ");
    format!(
        "
    SELECT id, title, artist, album
    FROM tracks
    WHERE id IN ({placeholders})
    ORDER BY id ASC
"
    )
}
