/// 환경 변수 기반 서비스 설정
/// 시작 시 한 번만 읽고, 이후에는 명시적으로 각 구성 요소에 전달한다.
// region:    --- Imports
use crate::error::ConfigError;
use crate::store::TableConfig;
use std::net::SocketAddr;
// endregion: --- Imports

// region:    --- Constants
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SCAN_PAGE_SIZE: usize = 1000;
const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";
const DEFAULT_QUEUE_CAPACITY: usize = 256;

pub const PRODUCT_TABLE_ENV: &str = "ProductTable";
pub const BID_TABLE_ENV: &str = "BidTable";
pub const USER_TABLE_ENV: &str = "UserTable";
// endregion: --- Constants

// region:    --- Config Types
/// 문서 저장소 백엔드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { url: String, max_connections: u32 },
    Memory,
}

/// 알림 전달 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMode {
    /// 응답 전에 전송 완료를 기다린다
    Inline,
    /// 백그라운드 워커에 넘기고 바로 응답한다
    Queued { capacity: usize },
}

/// 푸시 알림 설정
#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub endpoint: String,
    /// 없으면 알림 전송을 건너뛴다
    pub server_key: Option<String>,
    pub mode: NotifyMode,
}

/// 서비스 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub store: StoreBackend,
    pub products: TableConfig,
    pub bids: TableConfig,
    pub users: TableConfig,
    pub fcm: FcmConfig,
}
// endregion: --- Config Types

// region:    --- Loading
impl AppConfig {
    /// 프로세스 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 로드 (테스트에서 환경 변수를 건드리지 않기 위함)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_addr = get("HTTP_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid("HTTP_ADDR", e.to_string()))?;

        let store = match get("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    get("DATABASE_MAX_CONNECTIONS"),
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid(
                    "STORE_BACKEND",
                    format!("unknown backend '{}'", other),
                ))
            }
        };

        let page_size = parse_or(get("SCAN_PAGE_SIZE"), "SCAN_PAGE_SIZE", DEFAULT_SCAN_PAGE_SIZE)?;
        let table = |env: &'static str, default: &str| {
            let name = get(env).unwrap_or_else(|| default.to_string());
            TableConfig::new(name, page_size).map_err(|e| ConfigError::Invalid(env, e.to_string()))
        };

        let mode = match get("NOTIFY_MODE").as_deref().unwrap_or("inline") {
            "inline" => NotifyMode::Inline,
            "queued" => NotifyMode::Queued {
                capacity: parse_or(
                    get("NOTIFY_QUEUE_CAPACITY"),
                    "NOTIFY_QUEUE_CAPACITY",
                    DEFAULT_QUEUE_CAPACITY,
                )?,
            },
            other => {
                return Err(ConfigError::Invalid(
                    "NOTIFY_MODE",
                    format!("unknown mode '{}'", other),
                ))
            }
        };

        Ok(Self {
            http_addr,
            store,
            products: table(PRODUCT_TABLE_ENV, "products")?,
            bids: table(BID_TABLE_ENV, "bids")?,
            users: table(USER_TABLE_ENV, "users")?,
            fcm: FcmConfig {
                endpoint: get("FCM_ENDPOINT").unwrap_or_else(|| DEFAULT_FCM_ENDPOINT.to_string()),
                server_key: get("FCM_SERVER_KEY"),
                mode,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid(key, e.to_string())),
        None => Ok(default),
    }
}
// endregion: --- Loading

// endregion: --- Tests
