//! User CLI commands.

use clap::{Parser, Subcommand, ValueEnum};
use tapeo_core::auth::Role as CoreRole;
use uuid::Uuid;

/// User provisioning commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// CLI role for user creation (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Role {
    Admin,
    Editor,
    Member,
}

impl From<Role> for CoreRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => CoreRole::Admin,
            Role::Editor => CoreRole::Editor,
            Role::Member => CoreRole::Member,
        }
    }
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List all users.
    List,
    /// Create a new user.
    Create {
        /// User email.
        #[arg(long)]
        email: String,
        /// Initial password.
        #[arg(long)]
        password: String,
        /// Display name; derived from the email when omitted.
        #[arg(long)]
        name: Option<String>,
        /// Role; the allowlist may still promote to admin.
        #[arg(long, value_enum)]
        role: Option<Role>,
    },
    /// Get user by ID.
    Get {
        /// User ID.
        id: Uuid,
    },
    /// Delete user by ID.
    Delete {
        /// User ID.
        id: Uuid,
    },
}
