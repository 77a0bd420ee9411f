/// Postgres JSONB 기반 문서 저장소
/// 컬렉션 하나당 테이블 하나: (id TEXT PRIMARY KEY, doc JSONB NOT NULL)
// region:    --- Imports
use super::{DocumentStore, ScanCondition, TableConfig};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Postgres Store
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    /// 커넥션 풀 생성
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!(
            "{:<12} --> 데이터베이스 연결 성공 (max_connections={})",
            "Store", max_connections
        );
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 테이블 이름 검증 후 인용 부호 처리
    fn table(collection: &str) -> Result<String, StoreError> {
        let config = TableConfig::new(collection, 1)?;
        Ok(format!("\"{}\"", config.name()))
    }

    /// 스캔 쿼리 생성. 조건마다 (필드, 값) 파라미터 두 개, 마지막이 LIMIT
    /// jsonb `=`는 정확히 같은 값만 통과시키므로 배열/객체 부분 일치가 없다.
    fn scan_sql(table: &str, condition_count: usize) -> String {
        let filter = if condition_count == 0 {
            "TRUE".to_string()
        } else {
            (0..condition_count)
                .map(|i| format!("doc -> ${}::text = ${}::jsonb", 2 * i + 1, 2 * i + 2))
                .collect::<Vec<_>>()
                .join(" AND ")
        };
        format!(
            "SELECT doc FROM {} WHERE {} LIMIT ${}",
            table,
            filter,
            2 * condition_count + 1
        )
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        let table = Self::table(collection)?;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
            table
        ))
        .execute(&*self.pool)
        .await?;
        info!("{:<12} --> 컬렉션 준비 완료: {}", "Store", collection);
        Ok(())
    }

    async fn scan(
        &self,
        collection: &str,
        conditions: &[ScanCondition],
        limit: usize,
    ) -> Result<Vec<Value>, StoreError> {
        let table = Self::table(collection)?;
        let sql = Self::scan_sql(&table, conditions.len());
        let mut query = sqlx::query_scalar::<_, Value>(&sql);
        for condition in conditions {
            query = query
                .bind(condition.field.as_str())
                .bind(&condition.value);
        }
        let docs = query
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&*self.pool)
            .await?;
        Ok(docs)
    }

    async fn load(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let table = Self::table(collection)?;
        let doc = sqlx::query_scalar::<_, Value>(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            table
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(doc)
    }

    async fn save(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        let table = Self::table(collection)?;
        sqlx::query(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
            table
        ))
        .bind(id)
        .bind(doc)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let table = Self::table(collection)?;
        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}
// endregion: --- Postgres Store

// endregion: --- Tests
