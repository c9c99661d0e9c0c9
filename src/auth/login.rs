use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of a login attempt. The web layer forwards `code()` to clients,
/// so the codes must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    WrongPassword,
    NotFound,
    NotConfirmed,
}

impl LoginStatus {
    pub fn code(self) -> &'static str {
        match self {
            LoginStatus::Success => "000",
            LoginStatus::WrongPassword => "002",
            LoginStatus::NotFound => "003",
            LoginStatus::NotConfirmed => "004",
        }
    }

    pub fn is_success(self) -> bool {
        self == LoginStatus::Success
    }
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for LoginStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
