use super::UserId;
use serde::{Deserialize, Serialize};

/// Public profile projection of a user, as seen through the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub profile_pic_url: Option<String>,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            profile_pic_url: None,
        }
    }

    pub fn with_profile_pic(mut self, url: impl Into<String>) -> Self {
        self.profile_pic_url = Some(url.into());
        self
    }
}
