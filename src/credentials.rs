use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_CREDENTIALS: &str = include_str!("../data/credentials.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

/// A pre-provisioned user. The role is implied by the list that holds the
/// entry in the credentials file and is stamped on when a session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub code: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

/// A credential record resolved to its role; this is what a session holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub record: CredentialRecord,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialTable {
    #[serde(default)]
    teachers: Vec<CredentialRecord>,
    #[serde(default)]
    students: Vec<CredentialRecord>,
}

/// Trim and uppercase; the login box uppercases as the user types.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl CredentialTable {
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(BUNDLED_CREDENTIALS)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let table: CredentialTable = serde_json::from_str(text)?;
        table.warn_on_shared_codes();
        Ok(table)
    }

    pub fn teachers(&self) -> &[CredentialRecord] {
        &self.teachers
    }

    pub fn students(&self) -> &[CredentialRecord] {
        &self.students
    }

    /// Teacher list first, then students; first match wins.
    pub fn lookup(&self, code: &str) -> Option<User> {
        let wanted = normalize_code(code);
        if wanted.is_empty() {
            return None;
        }
        let hit = |list: &[CredentialRecord]| {
            list.iter()
                .find(|r| normalize_code(&r.code) == wanted)
                .cloned()
        };
        if let Some(record) = hit(&self.teachers) {
            return Some(User {
                record,
                role: Role::Teacher,
            });
        }
        hit(&self.students).map(|record| User {
            record,
            role: Role::Student,
        })
    }

    fn warn_on_shared_codes(&self) {
        let teacher_codes: HashSet<String> =
            self.teachers.iter().map(|r| normalize_code(&r.code)).collect();
        let shared = self
            .students
            .iter()
            .filter(|r| teacher_codes.contains(&normalize_code(&r.code)))
            .count();
        if shared > 0 {
            tracing::warn!(
                shared,
                "credential codes appear in both teacher and student lists; teacher entries take precedence"
            );
        }
    }
}
