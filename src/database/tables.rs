// No foreign key from queue to tracks: library rows may vanish while the
// queue still names them.
pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS tracks(
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        artist TEXT NOT NULL DEFAULT '',
        album TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS queue(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        track_id INTEGER NOT NULL
    );
";
