//! Request validation: required student fields must be present and non-null.

use crate::error::AppError;
use crate::model::{Student, StudentFields};

pub struct RequestValidator;

impl RequestValidator {
    /// Check all required fields at once and return the validated triple.
    /// Every missing field is reported, in declaration order.
    pub fn validate(student: &Student) -> Result<StudentFields, AppError> {
        let mut missing = Vec::new();
        if student.firstname.is_none() {
            missing.push("firstname");
        }
        if student.lastname.is_none() {
            missing.push("lastname");
        }
        if student.email.is_none() {
            missing.push("email");
        }

        match (&student.firstname, &student.lastname, &student.email) {
            (Some(firstname), Some(lastname), Some(email)) => Ok(StudentFields {
                firstname: firstname.clone(),
                lastname: lastname.clone(),
                email: email.clone(),
            }),
            _ => Err(AppError::Validation {
                message: format!("{} must not be null", missing.join(", ")),
                fields: missing,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Student {
        Student::default()
            .firstname("AAAAAAAAAA")
            .lastname("AAAAAAAAAA")
            .email("AAAAAAAAAA")
    }

    #[test]
    fn accepts_complete_student() {
        let fields = RequestValidator::validate(&complete()).unwrap();
        assert_eq!(fields.firstname, "AAAAAAAAAA");
    }

    #[test]
    fn empty_strings_are_present() {
        let s = Student::default().firstname("").lastname("").email("");
        assert!(RequestValidator::validate(&s).is_ok());
    }

    #[test]
    fn email_format_is_not_checked() {
        let s = complete().email("not an email");
        assert!(RequestValidator::validate(&s).is_ok());
    }

    #[test]
    fn each_missing_field_is_reported() {
        for field in ["firstname", "lastname", "email"] {
            let mut s = complete();
            match field {
                "firstname" => s.firstname = None,
                "lastname" => s.lastname = None,
                _ => s.email = None,
            }
            match RequestValidator::validate(&s) {
                Err(AppError::Validation { fields, .. }) => assert_eq!(fields, vec![field]),
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn reports_all_missing_fields_together() {
        let s = Student::default().lastname("x");
        match RequestValidator::validate(&s) {
            Err(AppError::Validation { fields, message }) => {
                assert_eq!(fields, vec!["firstname", "email"]);
                assert_eq!(message, "firstname, email must not be null");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
