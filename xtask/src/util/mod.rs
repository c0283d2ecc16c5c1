pub mod fs;
pub mod repo;
pub mod tools_env;
