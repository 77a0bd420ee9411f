/// 푸시 알림
/// 1. 메시지 구성 (FcmMessage)
/// 2. 전송 (Notifier / FcmClient)
/// 3. 전달 방식 (NotificationDispatcher: 즉시 또는 큐)
// region:    --- Imports
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

mod dispatcher;
mod fcm;

pub use dispatcher::NotificationDispatcher;
pub use fcm::FcmClient;
// endregion: --- Imports

// region:    --- Message
/// 알림 대상: 토픽 또는 단일 토큰, 혹은 디바이스 토큰 목록
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Single(String),
    Devices(Vec<String>),
}

impl Target {
    /// 토픽 대상 ("/topics/<name>")
    pub fn topic(name: &str) -> Self {
        Target::Single(format!("/topics/{}", name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

/// 푸시 서버로 보내는 메시지 봉투
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FcmMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_ids: Option<Vec<String>>,
    pub notification: FcmNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl FcmMessage {
    /// 메시지 생성. 대상이 비어 있으면 None
    pub fn build(
        target: Target,
        title: &str,
        body: &str,
        icon: &str,
        data: Option<Value>,
    ) -> Option<Self> {
        let (to, registration_ids) = match target {
            Target::Single(to) if !to.trim().is_empty() => (Some(to), None),
            Target::Devices(tokens) if !tokens.is_empty() => (None, Some(tokens)),
            _ => return None,
        };
        Some(Self {
            to,
            registration_ids,
            notification: FcmNotification {
                title: title.to_string(),
                body: body.to_string(),
                icon: icon.to_string(),
            },
            data,
        })
    }

    /// 로그용 대상 설명
    pub fn recipient(&self) -> String {
        match (&self.to, &self.registration_ids) {
            (Some(to), _) => to.clone(),
            (None, Some(ids)) => format!("{} devices", ids.len()),
            (None, None) => "nobody".to_string(),
        }
    }
}
// endregion: --- Message

// region:    --- Notifier
/// 알림 전송기. 실패는 호출자에게 오류로 전파하지 않고 false로 알린다.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &FcmMessage) -> bool;
}

/// 서버 키가 설정되지 않았을 때 사용하는 전송기
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, message: &FcmMessage) -> bool {
        info!(
            "{:<12} --> 푸시 알림 비활성화: {} 전송 생략",
            "Notify",
            message.recipient()
        );
        false
    }
}
// endregion: --- Notifier

// endregion: --- Tests
