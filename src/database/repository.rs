use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use crate::database::manager::DatabaseError;

/// A row type backed by a single table with an integer `id` primary key.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
}

/// Generic id-based access shared by users, posts and comments
pub struct Repository<'a, T> {
    pool: &'a SqlitePool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T: Record> Repository<'a, T> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All rows in insertion order
    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Delete by id; dependent rows go with it through `ON DELETE CASCADE`.
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DatabaseError::classify)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
        let (count,): (i64,) = sqlx::query_as(&sql)
            .fetch_one(self.pool)
            .await
            .map_err(DatabaseError::classify)?;
        Ok(count)
    }
}
