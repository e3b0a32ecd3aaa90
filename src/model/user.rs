use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Login name of a storefront user. Carts and orders are owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(pub String);

impl From<&str> for UserName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for UserName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl UserName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
