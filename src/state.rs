// region:    --- Imports
use crate::config::{AppConfig, NotifyMode, StoreBackend};
use crate::error::StoreError;
use crate::models::{Bid, Product, User};
use crate::notification::{DisabledNotifier, FcmClient, NotificationDispatcher, Notifier};
use crate::store::{DocumentStore, MemoryStore, PostgresStore, Table};
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- App State
/// 핸들러가 공유하는 상태. 요청 간 가변 상태는 없다.
#[derive(Clone)]
pub struct AppState {
    pub products: Table<Product>,
    pub bids: Table<Bid>,
    pub users: Table<User>,
    pub notifications: NotificationDispatcher,
}

impl AppState {
    /// 저장소와 알림 전달기로 상태 구성
    pub fn new(
        store: Arc<dyn DocumentStore>,
        config: &AppConfig,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            products: Table::new(Arc::clone(&store), config.products.clone()),
            bids: Table::new(Arc::clone(&store), config.bids.clone()),
            users: Table::new(store, config.users.clone()),
            notifications,
        }
    }

    /// 설정으로부터 전체 상태 구성 (저장소 연결, 컬렉션 준비, 알림 설정)
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn DocumentStore> = match &config.store {
            StoreBackend::Postgres {
                url,
                max_connections,
            } => Arc::new(PostgresStore::connect(url, *max_connections).await?),
            StoreBackend::Memory => {
                warn!("{:<12} --> 메모리 저장소 사용: 재시작 시 데이터 유실", "Main");
                Arc::new(MemoryStore::new())
            }
        };

        let notifier: Arc<dyn Notifier> = match &config.fcm.server_key {
            Some(key) => Arc::new(FcmClient::new(config.fcm.endpoint.clone(), key.clone())),
            None => {
                warn!("{:<12} --> FCM_SERVER_KEY 미설정: 푸시 알림 비활성화", "Main");
                Arc::new(DisabledNotifier)
            }
        };
        let notifications = match config.fcm.mode {
            NotifyMode::Inline => NotificationDispatcher::inline(notifier),
            NotifyMode::Queued { capacity } => NotificationDispatcher::queued(notifier, capacity),
        };

        let state = Self::new(store, config, notifications);
        state.products.ensure().await?;
        state.bids.ensure().await?;
        state.users.ensure().await?;
        info!(
            "{:<12} --> 컬렉션: {}, {}, {}",
            "Main",
            state.products.name(),
            state.bids.name(),
            state.users.name()
        );
        Ok(state)
    }
}
// endregion: --- App State
