pub mod error;
pub mod id;
pub mod id_pool;
pub mod task;
