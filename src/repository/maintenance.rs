//! Maintenance log repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{equipment::EquipmentStatus, maintenance::MaintenanceLog},
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a log entry and mark the equipment Active, cleaned on
    /// `maintenance_date`. Both writes commit together or not at all.
    pub async fn record(
        &self,
        equipment_id: i64,
        maintenance_date: NaiveDate,
        performed_by: &str,
        notes: Option<&str>,
    ) -> AppResult<MaintenanceLog> {
        let mut tx = self.pool.begin().await?;

        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(equipment_id)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Err(AppError::not_found("Equipment", equipment_id));
        }

        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            WITH inserted AS (
                INSERT INTO maintenance_logs (equipment_id, maintenance_date, notes, performed_by)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT i.id, i.equipment_id, e.name AS equipment_name, i.maintenance_date,
                   i.notes, i.performed_by, i.created_at
            FROM inserted i
            JOIN equipment e ON e.id = i.equipment_id
            "#,
        )
        .bind(equipment_id)
        .bind(maintenance_date)
        .bind(notes)
        .bind(performed_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE equipment
            SET status = $2, last_cleaned_date = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(equipment_id)
        .bind(EquipmentStatus::Active.as_str())
        .bind(maintenance_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(log)
    }

    /// Maintenance history of one equipment, newest first
    pub async fn list_for_equipment(&self, equipment_id: i64) -> AppResult<Vec<MaintenanceLog>> {
        let rows = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            SELECT m.id, m.equipment_id, e.name AS equipment_name, m.maintenance_date,
                   m.notes, m.performed_by, m.created_at
            FROM maintenance_logs m
            JOIN equipment e ON e.id = m.equipment_id
            WHERE m.equipment_id = $1
            ORDER BY m.maintenance_date DESC, m.created_at DESC, m.id DESC
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
