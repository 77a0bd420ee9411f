// region:    --- Imports
use super::{FcmMessage, Notifier, Target};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};
// endregion: --- Imports

// region:    --- Dispatcher
#[derive(Clone)]
enum Delivery {
    Inline(Arc<dyn Notifier>),
    Queued(mpsc::Sender<FcmMessage>),
}

/// 알림 전달기. 어느 방식이든 호출자는 실패를 보지 않는다.
#[derive(Clone)]
pub struct NotificationDispatcher {
    delivery: Delivery,
}

impl NotificationDispatcher {
    /// 요청 안에서 전송 완료까지 기다리는 방식
    pub fn inline(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            delivery: Delivery::Inline(notifier),
        }
    }

    /// 백그라운드 워커가 큐를 비우는 방식. tokio 런타임 안에서 호출해야 한다.
    pub fn queued(notifier: Arc<dyn Notifier>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<FcmMessage>(capacity.max(1));
        tokio::spawn(async move {
            info!("{:<12} --> 알림 워커 시작", "Notify");
            while let Some(message) = rx.recv().await {
                let sent = notifier.send(&message).await;
                debug!(
                    "{:<12} --> 큐 알림 처리: to={}, sent={}",
                    "Notify",
                    message.recipient(),
                    sent
                );
            }
            info!("{:<12} --> 알림 워커 종료", "Notify");
        });
        Self {
            delivery: Delivery::Queued(tx),
        }
    }

    /// 알림 전송. 즉시 방식은 전송 성공 여부, 큐 방식은 큐 적재 여부를 돌려준다.
    pub async fn notify(
        &self,
        target: Target,
        title: &str,
        body: &str,
        icon: &str,
        data: Option<Value>,
    ) -> bool {
        let Some(message) = FcmMessage::build(target, title, body, icon, data) else {
            warn!("{:<12} --> 알림 대상이 비어 있어 전송하지 않음", "Notify");
            return false;
        };

        match &self.delivery {
            Delivery::Inline(notifier) => notifier.send(&message).await,
            Delivery::Queued(tx) => match tx.try_send(message) {
                Ok(()) => true,
                Err(TrySendError::Full(message)) => {
                    warn!(
                        "{:<12} --> 알림 큐가 가득 차 버림: to={}",
                        "Notify",
                        message.recipient()
                    );
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    warn!("{:<12} --> 알림 워커가 종료됨", "Notify");
                    false
                }
            },
        }
    }
}
// endregion: --- Dispatcher

// endregion: --- Tests
