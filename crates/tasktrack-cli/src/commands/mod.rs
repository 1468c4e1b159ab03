pub mod create;
pub mod list;
pub mod mark;
pub mod reindex;
pub mod show;
