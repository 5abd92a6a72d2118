use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Proof that someone signed in. Holding one is the only access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub id: String,
    pub email: String,
    pub signed_in_at: NaiveDateTime,
}
