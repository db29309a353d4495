use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    /// Restricted non-admins may only log out.
    pub fn is_locked(&self) -> bool {
        self.is_restricted && !self.is_admin
    }

    /// Admin routes address users by backend id, falling back to the phone.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.phone)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub phone: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub referral_code: Option<&'a str>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WalletBalance {
    #[serde(default)]
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_user() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","phone":"9876543210","name":"Asha","isAdmin":false,"isRestricted":true,"walletBalance":250.5}"#,
        )
        .unwrap();

        assert_eq!(user.key(), "u1");
        assert!(user.is_locked());
        assert_eq!(user.wallet_balance, 250.5);
    }

    #[test]
    fn admins_are_never_locked() {
        let user: User = serde_json::from_str(
            r#"{"phone":"9876543210","isAdmin":true,"isRestricted":true}"#,
        )
        .unwrap();

        assert!(!user.is_locked());
        assert_eq!(user.key(), "9876543210");
    }
}
