mod common;

use common::spawn_app;
use marketplace_service::handlers::product::{ADDED_MESSAGE, UPDATED_MESSAGE};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn toy_robot() -> Value {
    json!({
        "Name": "Robot",
        "Code": "TOY-001",
        "Price": 19.99,
        "StarRating": 4.5,
        "Description": "Walks and talks",
        "ImageUrl": "http://img/robot.png",
        "Category": "toys",
        "Tags": ["robot", "kids"],
        "ReleaseTimestamp": "2020-01-02T03:04:05Z"
    })
}

/// 상품 등록 후 조회
#[tokio::test]
async fn test_create_then_get_product() {
    let app = spawn_app(true).await;

    let response = app
        .client
        .post(app.url("/products"))
        .json(&toy_robot())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();

    let id = created["Id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(created["CreatedTimestamp"].is_string());

    // 서버가 채우는 필드를 제외하면 요청과 같다
    let mut expected = toy_robot();
    expected["Id"] = created["Id"].clone();
    expected["CreatedTimestamp"] = created["CreatedTimestamp"].clone();
    assert_eq!(created, expected);

    let fetched: Value = app
        .client
        .get(app.url(&format!("/products/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

/// 상품 등록 시 카테고리 토픽으로 알림
#[tokio::test]
async fn test_create_product_notifies_category_topic() {
    let app = spawn_app(true).await;

    let created: Value = app
        .client
        .post(app.url("/products"))
        .json(&toy_robot())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let messages = app.notifier.messages().await;
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.to.as_deref(), Some("/topics/toys"));
    assert_eq!(message.notification.title, "Robot");
    assert_eq!(message.notification.body, ADDED_MESSAGE);
    assert_eq!(message.notification.icon, "http://img/robot.png");
    assert_eq!(message.data.as_ref(), Some(&created));
}

/// 알림 실패는 응답에 영향을 주지 않는다
#[tokio::test]
async fn test_notification_failure_is_invisible() {
    let app = spawn_app(false).await;

    let response = app
        .client
        .post(app.url("/products"))
        .json(&toy_robot())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.notifier.messages().await.len(), 1);
}

/// 수정 시 본문의 Id는 경로 값으로 대체된다
#[tokio::test]
async fn test_update_forces_route_id() {
    let app = spawn_app(true).await;

    let mut body = toy_robot();
    body["Id"] = json!("someone-else");
    body["Name"] = json!("Robot v2");
    body["CreatedTimestamp"] = json!("2019-05-05T00:00:00Z");

    let response = app
        .client
        .put(app.url("/products/p1"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["Id"], json!("p1"));
    assert_eq!(updated["Name"], json!("Robot v2"));
    // 수정은 전체 덮어쓰기라 CreatedTimestamp도 본문 값 그대로
    assert_eq!(updated["CreatedTimestamp"], json!("2019-05-05T00:00:00Z"));

    let fetched: Value = app
        .client
        .get(app.url("/products/p1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, updated);

    let response = app
        .client
        .get(app.url("/products/someone-else"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// 수정 알림은 같은 토픽 형식, 페이로드 없음
#[tokio::test]
async fn test_update_product_notifies_without_payload() {
    let app = spawn_app(true).await;

    app.client
        .put(app.url("/products/p1"))
        .json(&toy_robot())
        .send()
        .await
        .unwrap();

    let messages = app.notifier.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].to.as_deref(), Some("/topics/toys"));
    assert_eq!(messages[0].notification.body, UPDATED_MESSAGE);
    assert!(messages[0].data.is_none());
}

/// 삭제 후 조회는 404
#[tokio::test]
async fn test_delete_product() {
    let app = spawn_app(true).await;

    let created: Value = app
        .client
        .post(app.url("/products"))
        .json(&toy_robot())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = app.url(&format!("/products/{}", created["Id"].as_str().unwrap()));

    let response = app.client.delete(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let products: Vec<Value> = app
        .client
        .get(app.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(products.is_empty());

    let response = app
        .client
        .delete(app.url("/products/never-existed"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// 상품 목록
#[tokio::test]
async fn test_list_products() {
    let app = spawn_app(true).await;

    let products: Vec<Value> = app
        .client
        .get(app.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(products.is_empty());

    for _ in 0..3 {
        app.client
            .post(app.url("/products"))
            .json(&toy_robot())
            .send()
            .await
            .unwrap();
    }

    let response = app.client.get(app.url("/products")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    let products: Vec<Value> = response.json().await.unwrap();
    assert_eq!(products.len(), 3);
}

/// 브라우저 preflight 요청 허용
#[tokio::test]
async fn test_cors_preflight() {
    let app = spawn_app(true).await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/products"))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

/// 상태 확인
#[tokio::test]
async fn test_health() {
    let app = spawn_app(true).await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
