pub mod graph;
pub mod summary;
