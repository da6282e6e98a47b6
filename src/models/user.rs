use serde::{Deserialize, Serialize};

/// A user is nothing more than an id; every query is scoped by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}
