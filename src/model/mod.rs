//! Student entity and sort orders.

mod sort;
mod student;
pub use sort::{Direction, Order, Sort, StudentProperty};
pub use student::{Student, StudentFields, ENTITY_NAME};
