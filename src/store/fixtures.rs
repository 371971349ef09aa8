//! Small Hawaii-shaped dataset shared by store and handler tests.

use std::path::PathBuf;

use rusqlite::Connection;
use tempfile::TempDir;

pub const STATION_SCHEMA: &str = r#"
CREATE TABLE station (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
);
"#;

pub const MEASUREMENT_SCHEMA: &str = r#"
CREATE TABLE measurement (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
);
"#;

/// Three stations; USC00519281 is the most active, while the latest date
/// (2017-08-23) belongs to USC00519397.
const ROWS: &str = r#"
INSERT INTO station (id, station, name, latitude, longitude, elevation) VALUES
    (1, 'USC00519397', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0),
    (2, 'USC00513117', 'KANEOHE 838.1, HI US', 21.4234, -157.8015, 14.6),
    (3, 'USC00519281', 'WAIHEE 837.5, HI US', 21.45167, -157.84889, 32.9);

INSERT INTO measurement (id, station, date, prcp, tobs) VALUES
    (1, 'USC00519281', '2016-08-22', 0.40, 76),
    (2, 'USC00519281', '2016-08-23', 1.79, 77),
    (3, 'USC00519281', '2016-08-24', 2.15, 77),
    (4, 'USC00519281', '2017-01-01', 0.00, 62),
    (5, 'USC00519281', '2017-08-18', 0.06, 79),
    (6, 'USC00519397', '2016-08-23', 0.00, 81),
    (7, 'USC00519397', '2017-01-01', 0.00, 66),
    (8, 'USC00519397', '2017-08-23', 0.00, 81),
    (9, 'USC00513117', '2017-01-01', NULL, 70),
    (10, 'USC00513117', '2017-08-18', 0.02, 80);
"#;

pub fn seed(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(STATION_SCHEMA)?;
    conn.execute_batch(MEASUREMENT_SCHEMA)?;
    conn.execute_batch(ROWS)
}

/// Write the seeded dataset to a file inside a fresh temporary directory
pub fn seeded_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    let conn = Connection::open(&path).unwrap();
    seed(&conn).unwrap();
    drop(conn);
    (dir, path)
}
