//! Student entity and its validated field set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ENTITY_NAME: &str = "student";

/// A student as exchanged over HTTP. `id` is `None` until the record is stored.
///
/// Equality is identity: two students are equal only when both carry the same id.
/// A student without an id is equal to nothing, itself included, so there is no `Eq`.
/// There is no same-reference shortcut: `s == s` is false while `s.id` is `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Student {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Student {
    pub fn firstname(mut self, firstname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self
    }

    pub fn lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a stored record from its id and validated fields.
    pub fn stored(id: u64, fields: StudentFields) -> Self {
        Student {
            id: Some(id),
            firstname: Some(fields.firstname),
            lastname: Some(fields.lastname),
            email: Some(fields.email),
        }
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// The required fields of a student after presence validation. Storage only accepts this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentFields {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_follows_id() {
        let mut s1 = Student::default().with_id(1);
        let mut s2 = Student::default().with_id(1);
        assert_eq!(s1, s2);
        s2.id = Some(2);
        assert_ne!(s1, s2);
        s1.id = None;
        assert_ne!(s1, s2);
    }

    #[test]
    fn no_id_is_never_equal() {
        let s = Student::default().firstname("A").lastname("B").email("C");
        assert_ne!(s, s.clone());
        let same = &s;
        assert!(!same.eq(&s));
    }

    #[test]
    fn fields_are_ignored_for_equality() {
        let a = Student::default().with_id(3).firstname("A");
        let b = Student::default().with_id(3).firstname("B");
        assert_eq!(a, b);
    }

    #[test]
    fn json_shape() {
        let s = Student::stored(
            5,
            StudentFields {
                firstname: "Ada".into(),
                lastname: "Lovelace".into(),
                email: "ada@example.com".into(),
            },
        );
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 5, "firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com"})
        );

        let unsaved: Student = serde_json::from_str(r#"{"firstname":"A","lastname":null}"#).unwrap();
        assert_eq!(unsaved.id, None);
        assert_eq!(unsaved.firstname.as_deref(), Some("A"));
        assert_eq!(unsaved.lastname, None);
        assert_eq!(unsaved.email, None);
    }
}
