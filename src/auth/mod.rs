//! Authentication module for the minigame service
//!
//! Password hashing, login status codes and e-mail confirmation tokens.

pub mod password;
mod login;
mod service;
mod token;

pub use login::LoginStatus;
pub use service::{AuthService, ConfirmOutcome};
pub use token::{Claims, ConfirmationTokens};
