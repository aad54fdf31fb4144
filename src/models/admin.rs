use serde::{Deserialize, Serialize};

/// The single administrator the mock sign-in hands out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

impl Default for AdminUser {
    fn default() -> Self {
        Self {
            id: "admin-001".to_string(),
            name: "Admin User".to_string(),
            email: "admin@sandhoratailor.com".to_string(),
            picture: "https://via.placeholder.com/150".to_string(),
        }
    }
}
