//! StudentService and request validation.

mod student;
mod validation;
pub use student::StudentService;
pub use validation::RequestValidator;
