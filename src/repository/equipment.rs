//! Equipment repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentStatus, ListParams},
};

const SELECT_EQUIPMENT: &str = r#"
    SELECT e.id, e.name, e.type_id, t.name AS type_name, e.status,
           e.last_cleaned_date, e.created_at, e.updated_at
    FROM equipment e
    JOIN equipment_types t ON t.id = e.type_id
"#;

const COUNT_EQUIPMENT: &str = r#"
    SELECT COUNT(*)
    FROM equipment e
    JOIN equipment_types t ON t.id = e.type_id
"#;

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &ListParams) {
    builder.push(" WHERE 1=1");
    if let Some(term) = params.search_term() {
        builder
            .push(" AND e.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(term)));
    }
    if let Some(status) = params.status {
        builder.push(" AND e.status = ").push_bind(status.as_str());
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// One page of equipment matching the filters, plus the unpaged total
    pub async fn list(&self, params: &ListParams) -> AppResult<(Vec<Equipment>, i64)> {
        let size = i64::from(params.effective_size());
        let offset = i64::from(params.page) * size;

        let mut count = QueryBuilder::new(COUNT_EQUIPMENT);
        push_filters(&mut count, params);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::new(SELECT_EQUIPMENT);
        push_filters(&mut query, params);
        // Column and direction come from closed enums, never from user text
        let direction = params.sort_dir.as_sql();
        query.push(format!(
            " ORDER BY {} {} NULLS LAST, e.id {}",
            params.sort_by.column(),
            direction,
            direction
        ));
        query.push(" LIMIT ").push_bind(size);
        query.push(" OFFSET ").push_bind(offset);

        let rows = query
            .build_query_as::<Equipment>()
            .fetch_all(&self.pool)
            .await?;
        Ok((rows, total))
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(&format!("{} WHERE e.id = $1", SELECT_EQUIPMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Equipment", id))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(
        &self,
        name: &str,
        type_id: i64,
        status: EquipmentStatus,
        last_cleaned_date: Option<NaiveDate>,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            WITH inserted AS (
                INSERT INTO equipment (name, type_id, status, last_cleaned_date)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT i.id, i.name, i.type_id, t.name AS type_name, i.status,
                   i.last_cleaned_date, i.created_at, i.updated_at
            FROM inserted i
            JOIN equipment_types t ON t.id = i.type_id
            "#,
        )
        .bind(name)
        .bind(type_id)
        .bind(status.as_str())
        .bind(last_cleaned_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every editable field of an equipment record
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        type_id: i64,
        status: EquipmentStatus,
        last_cleaned_date: Option<NaiveDate>,
    ) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            WITH updated AS (
                UPDATE equipment
                SET name = $2, type_id = $3, status = $4, last_cleaned_date = $5,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.name, u.type_id, t.name AS type_name, u.status,
                   u.last_cleaned_date, u.created_at, u.updated_at
            FROM updated u
            JOIN equipment_types t ON t.id = u.type_id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(type_id)
        .bind(status.as_str())
        .bind(last_cleaned_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Equipment", id))
    }

    /// Delete equipment; its maintenance logs cascade
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Equipment", id));
        }
        Ok(())
    }
}
