use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credenciales no válidas")]
    InvalidCredentials,

    #[error("Ya existe un usuario con este email")]
    EmailTaken,

    #[error("El email no es válido")]
    InvalidEmail,

    #[error("La contraseña debe tener al menos 8 caracteres")]
    WeakPassword,

    #[error("No se puede eliminar el último administrador")]
    LastAdmin,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("session not found")]
    SessionNotFound,

    #[error("session expired")]
    SessionExpired,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// HTTP status the API reports for this error. User mistakes map to
    /// 400/401/404, infrastructure failures to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::EmailTaken => 400,
            Self::InvalidEmail => 400,
            Self::WeakPassword => 400,
            Self::LastAdmin => 400,
            Self::UserNotFound => 404,
            Self::SessionNotFound => 401,
            Self::SessionExpired => 401,
            Self::Hashing(_) => 500,
            Self::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_spanish() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Credenciales no válidas"
        );
        assert_eq!(
            AuthError::LastAdmin.to_string(),
            "No se puede eliminar el último administrador"
        );
        assert_eq!(
            AuthError::EmailTaken.to_string(),
            "Ya existe un usuario con este email"
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::LastAdmin.status_code(), 400);
        assert_eq!(AuthError::UserNotFound.status_code(), 404);
        assert_eq!(AuthError::Storage("x".into()).status_code(), 500);
    }
}
