//! Success bodies shared by feature modules.

use serde::{Deserialize, Serialize};

/// `{"message": "..."}` confirmation body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
