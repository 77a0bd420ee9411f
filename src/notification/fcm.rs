// region:    --- Imports
use super::{FcmMessage, Notifier};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Fcm Client
/// FCM 레거시 HTTP 엔드포인트 전송기
#[derive(Clone)]
pub struct FcmClient {
    client: Client,
    endpoint: String,
    server_key: String,
}

impl FcmClient {
    pub fn new(endpoint: impl Into<String>, server_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            server_key: server_key.into(),
        }
    }
}

#[async_trait]
impl Notifier for FcmClient {
    /// 2xx 응답이면 true. 전송 오류는 여기서 삼킨다.
    async fn send(&self, message: &FcmMessage) -> bool {
        info!(
            "{:<12} --> 푸시 알림 전송: to={}",
            "Notify",
            message.recipient()
        );
        let result = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("key={}", self.server_key))
            .json(message)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "{:<12} --> 푸시 알림 거부됨: status={}",
                    "Notify",
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("{:<12} --> 푸시 알림 전송 오류: {:?}", "Notify", e);
                false
            }
        }
    }
}
// endregion: --- Fcm Client
