use serde::{Deserialize, Serialize};

use gatehouse_core::UserId;

/// Identity of an authenticated caller.
///
/// Never carries secret material; the password digest is dropped at the
/// credential verifier boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub login: String,
    pub email: String,
}
