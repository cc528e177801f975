//! User/role link record.

use super::Snowflake;
use serde::{Deserialize, Serialize};

/// Link between a user and a role they hold. The pair is the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: Snowflake,
    pub role_id: Snowflake,
}
