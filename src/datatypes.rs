use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message submitted through the public contact form.
///
/// `id` and `created_at` are assigned once at insertion and never change.
/// `is_read` only ever transitions from `false` to `true`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn status_label(&self) -> &'static str {
        if self.is_read {
            "Read"
        } else {
            "Unread"
        }
    }
}

/// The fields a visitor fills in on the contact form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}
