#![allow(dead_code)]

use async_trait::async_trait;
use marketplace_service::config::AppConfig;
use marketplace_service::error::StoreError;
use marketplace_service::notification::{FcmMessage, NotificationDispatcher, Notifier};
use marketplace_service::routes::create_router;
use marketplace_service::state::AppState;
use marketplace_service::store::{DocumentStore, MemoryStore, ScanCondition};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// 전송 내용을 기록하는 알림 전송기
pub struct RecordingNotifier {
    result: bool,
    pub sent: Mutex<Vec<FcmMessage>>,
}

impl RecordingNotifier {
    pub fn new(result: bool) -> Arc<Self> {
        Arc::new(Self {
            result,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub async fn messages(&self) -> Vec<FcmMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &FcmMessage) -> bool {
        self.sent.lock().await.push(message.clone());
        self.result
    }
}

/// 모든 요청이 실패하는 저장소
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn ensure_collection(&self, _collection: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn scan(
        &self,
        collection: &str,
        _conditions: &[ScanCondition],
        _limit: usize,
    ) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }

    async fn load(&self, collection: &str, _id: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }

    async fn save(&self, collection: &str, _id: &str, _doc: Value) -> Result<(), StoreError> {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }

    async fn delete(&self, collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

pub struct TestApp {
    pub base_url: String,
    pub notifier: Arc<RecordingNotifier>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn memory_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "STORE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .expect("메모리 설정 로드 실패")
}

/// 메모리 저장소로 서버 실행
pub async fn spawn_app(notify_result: bool) -> TestApp {
    spawn_with_store(Arc::new(MemoryStore::new()), notify_result).await
}

/// 지정한 저장소로 서버 실행
pub async fn spawn_with_store(store: Arc<dyn DocumentStore>, notify_result: bool) -> TestApp {
    let notifier = RecordingNotifier::new(notify_result);
    let config = memory_config();
    let state = AppState::new(
        store,
        &config,
        NotificationDispatcher::inline(notifier.clone()),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("리스너 생성 실패");
    let addr = listener.local_addr().expect("주소 조회 실패");
    tokio::spawn(async move {
        axum::serve(listener, create_router(state).into_make_service())
            .await
            .expect("서버 실행 실패");
    });

    TestApp {
        base_url: format!("http://{}", addr),
        notifier,
        client: reqwest::Client::new(),
    }
}
