//! SQL run against the `measurement` and `station` tables.
//!
//! Every function takes a borrowed connection and issues plain aggregate or
//! filter queries; callers own the connection's lifetime.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::error::{StoreError, StoreResult};
use super::models::{DailyNormal, PrecipitationByDate, Station, TobsReading};
use crate::dates;
use crate::logger;

/// Tables the service reads from
pub const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Fail unless every table in [`REQUIRED_TABLES`] exists
pub fn verify_schema(conn: &Connection, path: &Path) -> StoreResult<()> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
    )?;
    for table in REQUIRED_TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            return Err(StoreError::MissingTable {
                path: path.to_path_buf(),
                table,
            });
        }
    }
    Ok(())
}

/// Cheapest possible round trip, used by the readiness probe
pub fn ping(conn: &Connection) -> StoreResult<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

pub fn precipitation(conn: &Connection) -> StoreResult<PrecipitationByDate> {
    let mut stmt = conn.prepare("SELECT date, prcp FROM measurement ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
    })?;

    let mut by_date = PrecipitationByDate::new();
    for row in rows {
        let (date, prcp) = row?;
        by_date.insert(date, prcp);
    }
    Ok(by_date)
}

pub fn stations(conn: &Connection) -> StoreResult<Vec<Station>> {
    let mut stmt = conn.prepare("SELECT id, station, name FROM station ORDER BY rowid")?;
    let stations = stmt
        .query_map([], |row| {
            Ok(Station {
                id: row.get(0)?,
                station: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stations)
}

/// Station with the most observation rows; ties go to the smallest identifier
pub fn most_active_station(conn: &Connection) -> StoreResult<Option<String>> {
    let station = conn
        .query_row(
            r#"
            SELECT station
            FROM measurement
            WHERE station IS NOT NULL
            GROUP BY station
            ORDER BY COUNT(station) DESC, station ASC
            LIMIT 1
            "#,
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(station)
}

/// Latest observation date across every station
pub fn latest_date(conn: &Connection) -> StoreResult<Option<String>> {
    let date = conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
    Ok(date)
}

/// Readings of one station with `after < date <= until`, in storage order
pub fn tobs_between(
    conn: &Connection,
    station: &str,
    after: &str,
    until: &str,
) -> StoreResult<Vec<TobsReading>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT date, tobs
        FROM measurement
        WHERE station = ?1 AND date > ?2 AND date <= ?3
        ORDER BY rowid
        "#,
    )?;
    let readings = stmt
        .query_map(params![station, after, until], |row| {
            Ok(TobsReading(row.get(0)?, row.get(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(readings)
}

/// Temperature readings of the most active station over the final year of data
pub fn most_active_tobs(conn: &Connection) -> StoreResult<Vec<TobsReading>> {
    let Some(station) = most_active_station(conn)? else {
        return Ok(Vec::new());
    };
    let Some(last) = latest_date(conn)? else {
        return Ok(Vec::new());
    };
    let Some((after, until)) = dates::year_window(&last) else {
        logger::log_warning(&format!(
            "Latest observation date '{last}' is not YYYY-MM-DD, returning no readings"
        ));
        return Ok(Vec::new());
    };
    tobs_between(conn, &station, &after, &until)
}

/// Min/avg/max temperature per date, from `start` and optionally up to `end`.
///
/// Bounds are canonical `YYYY-MM-DD` strings and are compared against the
/// stored dates as text.
pub fn daily_normals(
    conn: &Connection,
    start: &str,
    end: Option<&str>,
) -> StoreResult<Vec<DailyNormal>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT date, MIN(tobs), AVG(tobs), MAX(tobs)
        FROM measurement
        WHERE strftime('%Y-%m-%d', date) >= ?1
          AND (?2 IS NULL OR strftime('%Y-%m-%d', date) <= ?2)
        GROUP BY date
        ORDER BY date
        "#,
    )?;
    let normals = stmt
        .query_map(params![start, end], |row| {
            Ok(DailyNormal {
                date: row.get(0)?,
                t_min: row.get(1)?,
                t_avg: row.get(2)?,
                t_max: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        fixtures::seed(&conn).unwrap();
        conn
    }

    #[test]
    fn test_verify_schema_accepts_seeded_db() {
        let conn = seeded();
        verify_schema(&conn, Path::new(":memory:")).unwrap();
    }

    #[test]
    fn test_verify_schema_reports_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(fixtures::STATION_SCHEMA).unwrap();
        let err = verify_schema(&conn, Path::new(":memory:")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingTable {
                table: "measurement",
                ..
            }
        ));
    }

    #[test]
    fn test_precipitation_later_rows_overwrite() {
        let by_date = precipitation(&seeded()).unwrap();
        // 2016-08-23 appears for two stations, the later row holds 0.0
        assert_eq!(by_date.get("2016-08-23"), Some(&Some(0.0)));
        // 2017-01-01 ends on a NULL reading
        assert_eq!(by_date.get("2017-01-01"), Some(&None));
        assert_eq!(by_date.get("2016-08-22"), Some(&Some(0.4)));
        assert_eq!(by_date.len(), 6);
    }

    #[test]
    fn test_stations_in_storage_order() {
        let stations = stations(&seeded()).unwrap();
        let codes: Vec<_> = stations.iter().map(|s| s.station.as_deref()).collect();
        assert_eq!(
            codes,
            [Some("USC00519397"), Some("USC00513117"), Some("USC00519281")]
        );
        assert_eq!(stations[0].id, 1);
        assert_eq!(stations[0].name.as_deref(), Some("WAIKIKI 717.2, HI US"));
    }

    #[test]
    fn test_stations_with_missing_columns() {
        let conn = seeded();
        conn.execute(
            "INSERT INTO station (id, station, name) VALUES (4, 'USC00517948', NULL)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO station (id) VALUES (5)", []).unwrap();

        let stations = stations(&conn).unwrap();
        assert_eq!(stations.len(), 5);
        assert_eq!(stations[3].station.as_deref(), Some("USC00517948"));
        assert!(stations[3].name.is_none());
        assert!(stations[4].station.is_none());
        assert_eq!(
            serde_json::to_value(&stations[3]).unwrap(),
            serde_json::json!({"id": 4, "station": "USC00517948", "name": null})
        );
    }

    #[test]
    fn test_most_active_station() {
        let conn = seeded();
        assert_eq!(
            most_active_station(&conn).unwrap().as_deref(),
            Some("USC00519281")
        );
        assert_eq!(latest_date(&conn).unwrap().as_deref(), Some("2017-08-23"));
    }

    #[test]
    fn test_most_active_station_tie_prefers_smallest_code() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(fixtures::MEASUREMENT_SCHEMA).unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO measurement (station, date, prcp, tobs) VALUES
                ('USC00519397', '2017-01-01', 0.0, 70),
                ('USC00513117', '2017-01-01', 0.0, 71),
                ('USC00519397', '2017-01-02', 0.0, 72),
                ('USC00513117', '2017-01-02', 0.0, 73);
            "#,
        )
        .unwrap();
        assert_eq!(
            most_active_station(&conn).unwrap().as_deref(),
            Some("USC00513117")
        );
    }

    #[test]
    fn test_most_active_tobs_window_ends_at_dataset_max() {
        // The dataset's last date belongs to a less active station
        let readings = most_active_tobs(&seeded()).unwrap();
        assert_eq!(
            readings,
            vec![
                TobsReading("2016-08-24".to_string(), Some(77.0)),
                TobsReading("2017-01-01".to_string(), Some(62.0)),
                TobsReading("2017-08-18".to_string(), Some(79.0)),
            ]
        );
    }

    #[test]
    fn test_most_active_tobs_empty_dataset() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(fixtures::MEASUREMENT_SCHEMA).unwrap();
        assert!(most_active_tobs(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_daily_normals_from_start() {
        let normals = daily_normals(&seeded(), "2017-01-01", None).unwrap();
        let dates: Vec<_> = normals.iter().map(|n| n.date.as_str()).collect();
        assert_eq!(dates, ["2017-01-01", "2017-08-18", "2017-08-23"]);

        assert_eq!(normals[0].t_min, Some(62.0));
        assert_eq!(normals[0].t_avg, Some(66.0));
        assert_eq!(normals[0].t_max, Some(70.0));
        assert_eq!(normals[1].t_avg, Some(79.5));
    }

    #[test]
    fn test_daily_normals_single_day_range_matches_start_filter() {
        let conn = seeded();
        let ranged = daily_normals(&conn, "2017-08-23", Some("2017-08-23")).unwrap();
        let from = daily_normals(&conn, "2017-08-23", None).unwrap();
        assert_eq!(ranged, from);
        assert_eq!(ranged.len(), 1);
    }

    #[test]
    fn test_daily_normals_inverted_range_is_empty() {
        let normals = daily_normals(&seeded(), "2017-08-23", Some("2016-01-01")).unwrap();
        assert!(normals.is_empty());
    }

    #[test]
    fn test_daily_normals_inclusive_bounds() {
        let normals = daily_normals(&seeded(), "2016-08-23", Some("2016-08-24")).unwrap();
        let dates: Vec<_> = normals.iter().map(|n| n.date.as_str()).collect();
        assert_eq!(dates, ["2016-08-23", "2016-08-24"]);
        assert_eq!(normals[0].t_min, Some(77.0));
        assert_eq!(normals[0].t_max, Some(81.0));
    }
}
