use serde::{Deserialize, Serialize};

/// Full lecturer row, including the password hash. Never serialized as-is.
#[derive(Debug, Clone)]
pub struct Lecturer {
    pub id: String,         // ⇔ lecturers.id (human-chosen, e.g. "JACOB01")
    pub title: String,      // ⇔ lecturers.title ("Dr", "Prof", ...)
    pub name: String,       // ⇔ lecturers.name
    pub email: String,      // ⇔ lecturers.email (UNIQUE)
    pub phone: String,      // ⇔ lecturers.phone (10 digits)
    pub department: String, // ⇔ lecturers.department
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: String, // ⇔ lecturers.created_at (TEXT, ISO8601)
}

/// The public identity returned by login.
#[derive(Debug, Serialize)]
pub struct LecturerInfo {
    pub id: String,
    pub title: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<&Lecturer> for LecturerInfo {
    fn from(l: &Lecturer) -> Self {
        Self {
            id: l.id.clone(),
            title: l.title.clone(),
            name: l.name.clone(),
            is_admin: l.is_admin,
        }
    }
}

/// Admin list view: everything except the password hash.
#[derive(Debug, Serialize)]
pub struct LecturerRow {
    pub id: String,
    pub title: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub is_admin: bool,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LecturerInfo,
}
