use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const USERNAME_MAX_LEN: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,

    pub email: String,
    pub first_name: String,
    pub last_name: String,

    pub is_superuser: bool,

    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn new(register: RegisterUser) -> Result<Self, String> {
        let username = register.username.trim().to_string();
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(format!("Username must be at most {} characters", USERNAME_MAX_LEN));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            return Err("Username may only contain letters, digits and @/./+/-/_".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            email: register.email.trim().to_string(),
            first_name: register.first_name,
            last_name: register.last_name,
            is_superuser: false,
            date_joined: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
        }
    }

    #[test]
    fn test_new_user_is_not_superuser() {
        let user = User::new(register(" ada.l ")).unwrap();
        assert_eq!(user.username, "ada.l");
        assert!(!user.is_superuser);
    }

    #[test]
    fn test_new_user_rejects_invalid_usernames() {
        assert!(User::new(register("")).is_err());
        assert!(User::new(register("ada lovelace")).is_err());
        assert!(User::new(register(&"a".repeat(USERNAME_MAX_LEN + 1))).is_err());
    }
}
