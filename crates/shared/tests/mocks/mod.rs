pub mod backend;
pub mod logs;
pub mod workspace;
