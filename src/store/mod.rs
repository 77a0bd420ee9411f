/// 문서 저장소 추상화
/// 1. DocumentStore: 컬렉션 이름으로 접근하는 JSON 문서 저장소
/// 2. Table<T>: 엔티티 타입과 컬렉션 설정을 묶은 타입 지정 클라이언트
// region:    --- Imports
use crate::error::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
// endregion: --- Imports

// region:    --- Scan Condition
/// 스캔 필터 조건. 동등 비교만 지원하며 여러 조건은 AND로 묶인다.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCondition {
    pub field: String,
    pub value: Value,
}

impl ScanCondition {
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// 문서가 조건을 만족하는지 검사
    pub fn matches(&self, doc: &Value) -> bool {
        doc.get(&self.field)
            .is_some_and(|stored| json_equal(stored, &self.value))
    }
}

/// jsonb 동등 비교와 같은 규칙. 숫자는 정수/실수 표기와 관계없이 값으로 비교한다.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}
// endregion: --- Scan Condition

// region:    --- Document Store Trait
/// 컬렉션 단위 문서 저장소. 모든 연산은 저장소에 대한 요청 한 번이다.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 컬렉션이 없으면 생성
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError>;

    /// 조건에 맞는 문서를 최대 limit개까지 조회 (첫 페이지만)
    async fn scan(
        &self,
        collection: &str,
        conditions: &[ScanCondition],
        limit: usize,
    ) -> Result<Vec<Value>, StoreError>;

    /// 기본 키 조회. 없으면 None
    async fn load(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// 기본 키 기준 덮어쓰기
    async fn save(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError>;

    /// 삭제. 없는 문서를 삭제해도 오류가 아니다.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
// endregion: --- Document Store Trait

// region:    --- Table Config
/// 컬렉션 설정. 각 Table 인스턴스에 생성 시점에 전달된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    name: String,
    page_size: usize,
}

impl TableConfig {
    /// 컬렉션 이름은 SQL 식별자로 그대로 쓰이므로 [A-Za-z_][A-Za-z0-9_]* 만 허용
    pub fn new(name: impl Into<String>, page_size: usize) -> Result<Self, StoreError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid || page_size == 0 {
            return Err(StoreError::InvalidCollection(name));
        }
        Ok(Self { name, page_size })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
// endregion: --- Table Config

// region:    --- Entity
/// 저장소에 보관되는 엔티티
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// 로그에 쓰는 이름
    const KIND: &'static str;

    fn id(&self) -> &str;
}
// endregion: --- Entity

// region:    --- Table
/// 엔티티 타입별 저장소 클라이언트
pub struct Table<T> {
    store: Arc<dyn DocumentStore>,
    config: TableConfig,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn new(store: Arc<dyn DocumentStore>, config: TableConfig) -> Self {
        Self {
            store,
            config,
            _entity: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// 컬렉션 준비
    pub async fn ensure(&self) -> Result<(), StoreError> {
        self.store.ensure_collection(self.config.name()).await
    }

    /// 전체 조회 (첫 페이지만)
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.scan_equal(&[]).await
    }

    /// 기본 키 조회
    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        debug!("{:<12} --> load {}/{}", "Store", self.config.name(), id);
        match self.store.load(self.config.name(), id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// 동등 조건 스캔
    pub async fn scan_equal(&self, conditions: &[ScanCondition]) -> Result<Vec<T>, StoreError> {
        debug!(
            "{:<12} --> scan {} conditions={:?}",
            "Store",
            self.config.name(),
            conditions
        );
        self.store
            .scan(self.config.name(), conditions, self.config.page_size())
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    /// 저장 (같은 id가 있으면 덮어씀)
    pub async fn put(&self, entity: &T) -> Result<(), StoreError> {
        debug!(
            "{:<12} --> save {} {} into {}",
            "Store",
            T::KIND,
            entity.id(),
            self.config.name()
        );
        let doc = serde_json::to_value(entity)?;
        self.store.save(self.config.name(), entity.id(), doc).await
    }

    /// 삭제
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(self.config.name(), id).await
    }
}
// endregion: --- Table

// endregion: --- Tests
