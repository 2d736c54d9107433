use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MOBILE_MAX_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,

    pub mobile: Option<String>,

    /// Storage path or URL of the picture.
    pub profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub mobile: Option<String>,
    pub profile_picture: Option<String>,
}

impl UpdateProfile {
    /// Normalizes blank optional fields to `None` and checks lengths.
    pub fn validate(mut self) -> Result<Self, String> {
        self.email = self.email.trim().to_string();
        if self.email.is_empty() || !self.email.contains('@') {
            return Err("Enter a valid email address".to_string());
        }

        self.mobile = self
            .mobile
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        if let Some(mobile) = &self.mobile {
            if mobile.chars().count() > MOBILE_MAX_LEN {
                return Err(format!("Mobile must be at most {} characters", MOBILE_MAX_LEN));
            }
        }

        self.profile_picture = self.profile_picture.filter(|p| !p.trim().is_empty());

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(email: &str, mobile: Option<&str>) -> UpdateProfile {
        UpdateProfile {
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            mobile: mobile.map(str::to_string),
            profile_picture: Some(String::new()),
        }
    }

    #[test]
    fn test_validate_normalizes_blank_fields() {
        let valid = update(" ada@example.com ", Some("  ")).validate().unwrap();

        assert_eq!(valid.email, "ada@example.com");
        assert!(valid.mobile.is_none());
        assert!(valid.profile_picture.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(update("not-an-email", None).validate().is_err());
        assert!(update("ada@example.com", Some("+44 7700 900 123 45")).validate().is_err());
    }
}
