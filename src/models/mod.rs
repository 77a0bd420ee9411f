mod bid;
mod product;
mod user;

pub use bid::Bid;
pub use product::Product;
pub use user::{User, UserInput, UserProfile};

/// 새 엔티티 식별자
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
