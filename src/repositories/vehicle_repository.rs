// src/repositories/vehicle_repository.rs
//
// Vehicle persistence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::vehicle::Vehicle;
use crate::error::{AppError, AppResult};

pub trait VehicleRepository: Send + Sync {
    fn save(&self, vehicle: &Vehicle) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    fn list_all(&self) -> AppResult<Vec<Vehicle>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteVehicleRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteVehicleRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Vehicle - returns rusqlite::Error for query_map compatibility
    fn row_to_vehicle(row: &Row) -> Result<Vehicle, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at = parse_timestamp(&row.get::<_, String>("created_at")?)?;
        let updated_at = parse_timestamp(&row.get::<_, String>("updated_at")?)?;

        Ok(Vehicle {
            id,
            name: row.get("name")?,
            color: row.get("color")?,
            initial_mileage: row.get("initial_mileage")?,
            created_at,
            updated_at,
        })
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl VehicleRepository for SqliteVehicleRepository {
    fn save(&self, vehicle: &Vehicle) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO vehicles (
                id, name, color, initial_mileage, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                vehicle.id.to_string(),
                vehicle.name,
                vehicle.color,
                vehicle.initial_mileage,
                vehicle.created_at.to_rfc3339(),
                vehicle.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, color, initial_mileage, created_at, updated_at
             FROM vehicles WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_vehicle) {
            Ok(vehicle) => Ok(Some(vehicle)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, color, initial_mileage, created_at, updated_at
             FROM vehicles
             ORDER BY name",
        )?;

        let vehicles: Vec<Vehicle> = stmt
            .query_map([], Self::row_to_vehicle)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vehicles)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM vehicles WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = ?1)",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;

    #[test]
    fn test_save_and_load_round_trip() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let repo = SqliteVehicleRepository::new(pool);

        let vehicle = Vehicle::new("Family car".to_string(), "#FF5722".to_string());
        repo.save(&vehicle)?;

        let loaded = repo.get_by_id(vehicle.id)?.expect("vehicle missing");
        assert_eq!(loaded.name, "Family car");
        assert_eq!(loaded.color, "#FF5722");
        assert_eq!(loaded.initial_mileage, 0);
        assert!(repo.exists(vehicle.id)?);
        Ok(())
    }

    #[test]
    fn test_list_is_ordered_by_name() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let repo = SqliteVehicleRepository::new(pool);

        repo.save(&Vehicle::new("Zoe".to_string(), "#111111".to_string()))?;
        repo.save(&Vehicle::new("Astra".to_string(), "#222222".to_string()))?;

        let names: Vec<String> = repo.list_all()?.into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["Astra".to_string(), "Zoe".to_string()]);
        Ok(())
    }

    #[test]
    fn test_delete_missing_vehicle_is_not_found() {
        let (_dir, pool) = test_pool();
        let repo = SqliteVehicleRepository::new(pool);

        let result = repo.delete(Uuid::new_v4());
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
