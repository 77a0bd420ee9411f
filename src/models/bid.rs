use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델. ProductId, UserId는 참조만 하며 존재 여부는 검사하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Bid {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    #[serde(rename = "amount")]
    pub amount: f64,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl Entity for Bid {
    const KIND: &'static str = "Bid";

    fn id(&self) -> &str {
        &self.id
    }
}
