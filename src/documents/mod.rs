//! Course document schema shared with the external index

mod course;

pub use course::{fields, CourseDocument};
