pub mod build;
pub mod sanitize;
pub mod task;
