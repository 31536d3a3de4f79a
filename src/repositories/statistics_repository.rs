// src/repositories/statistics_repository.rs
//
// Statistics snapshot persistence. One row per kind; saving replaces.

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::vehicle_repository::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::statistics::{StatisticsKind, StatisticsSnapshot};
use crate::error::{AppError, AppResult};

pub trait StatisticsRepository: Send + Sync {
    fn save_snapshot(&self, snapshot: &StatisticsSnapshot) -> AppResult<()>;
    fn get_by_kind(&self, kind: &StatisticsKind) -> AppResult<Option<StatisticsSnapshot>>;
    fn list_all(&self) -> AppResult<Vec<StatisticsSnapshot>>;
    fn delete_all(&self) -> AppResult<()>;
}

pub struct SqliteStatisticsRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteStatisticsRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_snapshot(row: &Row) -> Result<StatisticsSnapshot, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let kind_raw: String = row.get("kind")?;
        let kind = if kind_raw == "global" {
            StatisticsKind::Global
        } else if let Some(vehicle_id_str) = kind_raw.strip_prefix("per_vehicle:") {
            let vehicle_id = Uuid::parse_str(vehicle_id_str)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            StatisticsKind::PerVehicle { vehicle_id }
        } else {
            return Err(rusqlite::Error::InvalidQuery);
        };

        let value_json: String = row.get("value")?;
        let value = serde_json::from_str(&value_json)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(StatisticsSnapshot {
            id,
            kind,
            value,
            generated_at: parse_timestamp(&row.get::<_, String>("generated_at")?)?,
        })
    }
}

impl StatisticsRepository for SqliteStatisticsRepository {
    fn save_snapshot(&self, snapshot: &StatisticsSnapshot) -> AppResult<()> {
        let conn = self.pool.get()?;
        let value_json = serde_json::to_string(&snapshot.value)?;

        // REPLACE also covers the UNIQUE(kind) constraint
        conn.execute(
            "INSERT OR REPLACE INTO statistics_snapshots (id, kind, value, generated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                snapshot.id.to_string(),
                snapshot.kind.to_string(),
                value_json,
                snapshot.generated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_by_kind(&self, kind: &StatisticsKind) -> AppResult<Option<StatisticsSnapshot>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, kind, value, generated_at
             FROM statistics_snapshots WHERE kind = ?1",
        )?;

        match stmt.query_row(params![kind.to_string()], Self::row_to_snapshot) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<StatisticsSnapshot>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, kind, value, generated_at
             FROM statistics_snapshots
             ORDER BY generated_at DESC",
        )?;

        let snapshots: Vec<StatisticsSnapshot> = stmt
            .query_map([], Self::row_to_snapshot)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }

    fn delete_all(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM statistics_snapshots", [])?;
        Ok(())
    }
}
