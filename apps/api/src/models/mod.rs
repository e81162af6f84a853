pub mod employee;
pub mod scoring;
pub mod vacancy;
