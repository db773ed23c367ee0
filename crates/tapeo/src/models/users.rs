use serde::Deserialize;

use tapeo_core::auth::{email_to_name, Role};

/// Request payload for creating a user account.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl CreateUser {
    /// Display name: the explicit one, or derived from the email.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => email_to_name(&self.email),
        }
    }

    pub fn role(&self) -> Role {
        self.role.unwrap_or(Role::Editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_the_email() {
        let request: CreateUser = serde_json::from_value(serde_json::json!({
            "email": "ana.romero@example.com",
            "password": "secreta-123",
        }))
        .unwrap();

        assert_eq!(request.display_name(), email_to_name("ana.romero@example.com"));
        assert_eq!(request.role(), Role::Editor);
    }

    #[test]
    fn explicit_role_and_name_win() {
        let request: CreateUser = serde_json::from_value(serde_json::json!({
            "email": "ana@example.com",
            "password": "secreta-123",
            "name": "Ana Romero",
            "role": "ADMIN",
        }))
        .unwrap();

        assert_eq!(request.display_name(), "Ana Romero");
        assert_eq!(request.role(), Role::Admin);
    }
}
