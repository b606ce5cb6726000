pub mod answers;
pub mod grading;
pub mod properties;
pub mod registry;
pub mod statistics;
