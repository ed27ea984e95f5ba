use mongodb::bson::Document;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "instructor" => Ok(Role::Instructor),
            "student" => Ok(Role::Student),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        };
        f.write_str(name)
    }
}

/// The slice of a user document the role gates need. The rest of the
/// document is opaque to the service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    pub role: Option<String>,
}

impl UserRecord {
    /// Reads a stored user without a typed decode: a `role` that is not a
    /// string (a number, an array) counts as no role at all.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            email: doc.get_str("email").unwrap_or_default().to_string(),
            role: doc.get_str("role").ok().map(str::to_string),
        }
    }

    /// `None` when the stored role is absent or not one we know.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}
