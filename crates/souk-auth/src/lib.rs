//! Accounts, sessions and credential handling for Souk.
//!
//! Provides the account model with its authorization role, argon2 password
//! hashing, server-side sessions carrying the working cart, and the flash
//! message queue.

mod account;
mod error;
mod flash;
mod password;
mod session;

pub use account::{Account, AvatarUpload, Role};
pub use error::AuthError;
pub use flash::{Flash, FlashLevel};
pub use password::{hash_password, validate_password, verify_password, MIN_PASSWORD_LEN};
pub use session::{Session, SessionId};
