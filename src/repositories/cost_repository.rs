// src/repositories/cost_repository.rs
//
// Other-cost persistence

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::vehicle_repository::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::cost::{OtherCost, RecurrenceInterval};
use crate::error::{AppError, AppResult};

pub trait CostRepository: Send + Sync {
    fn save(&self, cost: &OtherCost) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<OtherCost>>;
    /// All costs for a vehicle, ordered by time ascending
    fn list_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<OtherCost>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn count_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u32>;
}

pub struct SqliteCostRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCostRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_cost(row: &Row) -> Result<OtherCost, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let vehicle_id_str: String = row.get("vehicle_id")?;
        let vehicle_id = Uuid::parse_str(&vehicle_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let interval_str: String = row.get("recurrence_interval")?;
        let recurrence_interval: RecurrenceInterval = interval_str
            .parse()
            .map_err(|_| rusqlite::Error::InvalidQuery)?;

        Ok(OtherCost {
            id,
            vehicle_id,
            title: row.get("title")?,
            time: parse_timestamp(&row.get::<_, String>("time")?)?,
            mileage: row.get("mileage")?,
            price: row.get("price")?,
            recurrence_interval,
            note: row.get("note")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
            updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
        })
    }
}

impl CostRepository for SqliteCostRepository {
    fn save(&self, cost: &OtherCost) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO other_costs (
                id, vehicle_id, title, time, mileage, price, recurrence_interval,
                note, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                cost.id.to_string(),
                cost.vehicle_id.to_string(),
                cost.title,
                cost.time.to_rfc3339(),
                cost.mileage,
                cost.price,
                cost.recurrence_interval.to_string(),
                cost.note,
                cost.created_at.to_rfc3339(),
                cost.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<OtherCost>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, vehicle_id, title, time, mileage, price, recurrence_interval,
                    note, created_at, updated_at
             FROM other_costs WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_cost) {
            Ok(cost) => Ok(Some(cost)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<OtherCost>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, vehicle_id, title, time, mileage, price, recurrence_interval,
                    note, created_at, updated_at
             FROM other_costs
             WHERE vehicle_id = ?1
             ORDER BY time ASC",
        )?;

        let costs: Vec<OtherCost> = stmt
            .query_map(params![vehicle_id.to_string()], Self::row_to_cost)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(costs)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM other_costs WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn count_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u32> {
        let conn = self.pool.get()?;

        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM other_costs WHERE vehicle_id = ?1",
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
    use chrono::Utc;

    #[test]
    fn test_round_trip_preserves_recurrence() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let vehicle = Vehicle::new("Golf".to_string(), "#2196F3".to_string());
        SqliteVehicleRepository::new(pool.clone()).save(&vehicle)?;
        let repo = SqliteCostRepository::new(pool);

        let mut cost = OtherCost::new(vehicle.id, "Insurance".to_string(), Utc::now(), 54.3);
        cost.recurrence_interval = RecurrenceInterval::Monthly;
        cost.mileage = Some(12000);
        repo.save(&cost)?;

        let loaded = repo.get_by_id(cost.id)?.expect("cost missing");
        assert_eq!(loaded.title, "Insurance");
        assert_eq!(loaded.recurrence_interval, RecurrenceInterval::Monthly);
        assert_eq!(loaded.mileage, Some(12000));
        assert_eq!(repo.count_by_vehicle(vehicle.id)?, 1);
        Ok(())
    }

    #[test]
    fn test_missing_cost_is_none() -> anyhow::Result<()> {
        let (_dir, pool) = test_pool();
        let repo = SqliteCostRepository::new(pool);
        assert!(repo.get_by_id(Uuid::new_v4())?.is_none());
        Ok(())
    }
}
