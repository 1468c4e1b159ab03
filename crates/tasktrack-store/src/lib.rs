pub mod error;
pub mod layout;
pub mod lockfile;
pub mod pool_store;
pub mod repository;
pub mod task_store;
