pub mod build;
pub mod package;
