use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    pub price: f64,
    pub star_rating: f64,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub release_timestamp: Option<DateTime<Utc>>,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }
}
