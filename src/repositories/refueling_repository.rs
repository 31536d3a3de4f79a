// src/repositories/refueling_repository.rs
//
// Refueling persistence
//
// `list_by_vehicle` is THE upstream query of the balancer: it returns one
// vehicle's records ordered by mileage ascending (time as tie-breaker).
// Synthetic balancer entries are never persisted here - they have no id.

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::vehicle_repository::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::refueling::Refueling;
use crate::error::{AppError, AppResult};

pub trait RefuelingRepository: Send + Sync {
    fn save(&self, refueling: &Refueling) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Refueling>>;
    /// All records for a vehicle, ordered by mileage ascending
    fn list_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Refueling>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn count_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u32>;
}

pub struct SqliteRefuelingRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRefuelingRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_refueling(row: &Row) -> Result<Refueling, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let vehicle_id_str: String = row.get("vehicle_id")?;
        let vehicle_id = Uuid::parse_str(&vehicle_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let partial: i64 = row.get("partial")?;

        Ok(Refueling {
            id,
            vehicle_id,
            time: parse_timestamp(&row.get::<_, String>("time")?)?,
            mileage: row.get("mileage")?,
            volume: row.get("volume")?,
            price: row.get("price")?,
            partial: partial != 0,
            note: row.get("note")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
            updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
        })
    }
}

impl RefuelingRepository for SqliteRefuelingRepository {
    fn save(&self, refueling: &Refueling) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO refuelings (
                id, vehicle_id, time, mileage, volume, price, partial, note,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                refueling.id.to_string(),
                refueling.vehicle_id.to_string(),
                refueling.time.to_rfc3339(),
                refueling.mileage,
                refueling.volume,
                refueling.price,
                refueling.partial as i64,
                refueling.note,
                refueling.created_at.to_rfc3339(),
                refueling.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Refueling>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, vehicle_id, time, mileage, volume, price, partial, note,
                    created_at, updated_at
             FROM refuelings WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_refueling) {
            Ok(refueling) => Ok(Some(refueling)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Refueling>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, vehicle_id, time, mileage, volume, price, partial, note,
                    created_at, updated_at
             FROM refuelings
             WHERE vehicle_id = ?1
             ORDER BY mileage ASC, time ASC",
        )?;

        let refuelings: Vec<Refueling> = stmt
            .query_map(params![vehicle_id.to_string()], Self::row_to_refueling)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(refuelings)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM refuelings WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn count_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u32> {
        let conn = self.pool.get()?;

        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM refuelings WHERE vehicle_id = ?1",
            params![vehicle_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::Vehicle;
    use crate::repositories::test_support::test_pool;
    use crate::repositories::vehicle_repository::{SqliteVehicleRepository, VehicleRepository};
    use chrono::{Duration, Utc};

    fn saved_vehicle(pool: Arc<ConnectionPool>) -> Vehicle {
        let vehicle = Vehicle::new("Golf".to_string(), "#2196F3".to_string());
        SqliteVehicleRepository::new(pool)
            .save(&vehicle)
            .expect("save vehicle");
        vehicle
    }

    #[test]
    fn test_round_trip_preserves_fields() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let vehicle = saved_vehicle(pool.clone());
        let repo = SqliteRefuelingRepository::new(pool);

        let mut refueling = Refueling::new(vehicle.id, Utc::now(), 1200, 41.5, 63.25);
        refueling.partial = true;
        refueling.note = "motorway trip".to_string();
        repo.save(&refueling)?;

        let loaded = repo.get_by_id(refueling.id)?.expect("refueling missing");
        assert_eq!(loaded.vehicle_id, vehicle.id);
        assert_eq!(loaded.mileage, 1200);
        assert!(loaded.partial);
        assert_eq!(loaded.note, "motorway trip");
        assert!((loaded.volume - 41.5).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_list_by_vehicle_orders_by_mileage() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let vehicle = saved_vehicle(pool.clone());
        let repo = SqliteRefuelingRepository::new(pool);

        let t0 = Utc::now();
        for (offset, mileage) in [(0i64, 900i64), (1, 300), (2, 600)] {
            repo.save(&Refueling::new(
                vehicle.id,
                t0 + Duration::days(offset),
                mileage,
                30.0,
                45.0,
            ))?;
        }

        let mileages: Vec<i64> = repo
            .list_by_vehicle(vehicle.id)?
            .into_iter()
            .map(|r| r.mileage)
            .collect();
        assert_eq!(mileages, vec![300, 600, 900]);
        assert_eq!(repo.count_by_vehicle(vehicle.id)?, 3);
        Ok(())
    }

    #[test]
    fn test_deleting_vehicle_cascades() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let vehicle = saved_vehicle(pool.clone());
        let vehicle_repo = SqliteVehicleRepository::new(pool.clone());
        let repo = SqliteRefuelingRepository::new(pool);

        repo.save(&Refueling::new(vehicle.id, Utc::now(), 100, 30.0, 45.0))?;
        vehicle_repo.delete(vehicle.id)?;

        assert!(repo.list_by_vehicle(vehicle.id)?.is_empty());
        Ok(())
    }
}
