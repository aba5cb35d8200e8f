//! # Vehicle Repository
//!
//! Database operations for delivery vehicles. Vehicles are a small lookup
//! table: the order form offers them when pickup is required.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentdesk_core::Vehicle;

/// Repository for vehicle database operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    /// Lists all vehicles.
    pub async fn list(&self) -> DbResult<Vec<Vehicle>> {
        let vehicles: Vec<Vehicle> = sqlx::query_as(
            r#"
            SELECT id, number, vehicle_type, created_at
            FROM vehicles
            ORDER BY number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Gets a vehicle by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vehicle>> {
        let vehicle: Option<Vehicle> = sqlx::query_as(
            r#"
            SELECT id, number, vehicle_type, created_at
            FROM vehicles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Registers a new vehicle. Vehicle numbers are unique.
    pub async fn create(
        &self,
        number: &str,
        vehicle_type: Option<&str>,
    ) -> DbResult<Vehicle> {
        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            number: number.to_string(),
            vehicle_type: vehicle_type.map(String::from),
            created_at: Utc::now(),
        };

        debug!(id = %vehicle.id, number = %vehicle.number, "Inserting vehicle");

        sqlx::query(
            r#"
            INSERT INTO vehicles (id, number, vehicle_type, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.number)
        .bind(&vehicle.vehicle_type)
        .bind(vehicle.created_at)
        .execute(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Deletes a vehicle. Orders that referenced it keep running with a
    /// NULL vehicle_id.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
