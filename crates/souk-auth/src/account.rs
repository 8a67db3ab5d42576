//! Account types.

use serde::{Deserialize, Serialize};
use souk_commerce::ids::AccountId;
use std::str::FromStr;

/// Account role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator with back-office access.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Avatar change requested on a profile edit.
///
/// Decided at the request boundary: `Present` only when the form actually
/// carried a file, so an edit without an upload never clears the stored
/// avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AvatarUpload {
    /// A file was uploaded and stored at `path`.
    Present {
        /// Path of the stored image.
        path: String,
    },
    /// No file in the submission; keep the current avatar.
    #[default]
    None,
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Email address (unique).
    pub email: String,
    /// Display username (unique).
    pub username: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
    /// Shipping address, back-filled from the first order if absent.
    pub address: Option<String>,
    /// Stored avatar image path.
    pub avatar_path: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Account {
    /// Create a new customer account.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = souk_commerce::current_timestamp();
        Self {
            id: AccountId::generate(),
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            role: Role::Customer,
            address: None,
            avatar_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Promote to admin.
    pub fn promote(&mut self) {
        self.role = Role::Admin;
        self.touch();
    }

    /// Back-fill the shipping address if none is stored yet.
    ///
    /// Returns true when the address was written.
    pub fn backfill_address(&mut self, address: &str) -> bool {
        if self.address.is_some() {
            return false;
        }
        self.address = Some(address.to_string());
        self.touch();
        true
    }

    /// Apply a profile edit: username, address, and avatar per the upload
    /// variant.
    pub fn apply_profile_edit(
        &mut self,
        username: impl Into<String>,
        address: impl Into<String>,
        avatar: AvatarUpload,
    ) {
        self.username = username.into();
        self.address = Some(address.into());
        if let AvatarUpload::Present { path } = avatar {
            self.avatar_path = Some(path);
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = souk_commerce::current_timestamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("a@example.com", "aya", "$argon2$x");
        assert_eq!(account.role, Role::Customer);
        assert!(!account.is_admin());
        assert!(account.address.is_none());
        assert!(account.avatar_path.is_none());
    }

    #[test]
    fn test_address_backfill_only_when_missing() {
        let mut account = Account::new("a@example.com", "aya", "$argon2$x");
        assert!(account.backfill_address("12 Palm Street, Dubai"));
        assert!(!account.backfill_address("somewhere else"));
        assert_eq!(account.address.as_deref(), Some("12 Palm Street, Dubai"));
    }

    #[test]
    fn test_profile_edit_keeps_avatar_without_upload() {
        let mut account = Account::new("a@example.com", "aya", "$argon2$x");
        account.avatar_path = Some("uploads/aya.png".to_string());

        account.apply_profile_edit("aya2", "new address", AvatarUpload::None);
        assert_eq!(account.username, "aya2");
        assert_eq!(account.avatar_path.as_deref(), Some("uploads/aya.png"));

        account.apply_profile_edit(
            "aya2",
            "new address",
            AvatarUpload::Present {
                path: "uploads/aya2.png".to_string(),
            },
        );
        assert_eq!(account.avatar_path.as_deref(), Some("uploads/aya2.png"));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::Customer.as_str(), "customer");
        assert!("root".parse::<Role>().is_err());
    }
}
