pub mod codec;
pub mod json_file_repo;
pub mod memory_repo;
