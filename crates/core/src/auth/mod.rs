mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{calculate_expiry, email_to_name, generate_session_id, is_session_expired};
pub use traits::{NotificationRepository, Result, SessionRepository, UserRepository};
pub use types::{Notification, NotificationKind, Role, Session, SessionId, User};
pub use validation::{
    is_acceptable_password, is_valid_email, validate_return_to, MIN_PASSWORD_LENGTH,
};
