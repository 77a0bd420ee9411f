use crate::store::Entity;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 사용자 저장 모델. 비밀번호는 Argon2 해시로만 보관한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub password_hash: String,
    pub name: String,
    pub fcm_token: String,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    /// 비밀번호 검증. 해시 형식이 잘못된 경우도 불일치로 본다.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

// 생성/수정 요청 본문
#[derive(Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserInput {
    pub user_name: String,
    pub password: String,
    pub name: String,
    pub fcm_token: String,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl UserInput {
    /// 비밀번호를 해시해서 저장 모델로 변환
    pub fn into_user(self, id: String) -> Result<User, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(self.password.as_bytes(), &salt)?
            .to_string();

        Ok(User {
            id,
            user_name: self.user_name,
            password_hash,
            name: self.name,
            fcm_token: self.fcm_token,
            created_timestamp: self.created_timestamp,
        })
    }
}

// 응답 모델. 비밀번호 관련 정보는 내보내지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub name: String,
    pub fcm_token: String,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            name: user.name,
            fcm_token: user.fcm_token,
            created_timestamp: user.created_timestamp,
        }
    }
}
