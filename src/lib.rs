pub mod db;
pub mod models;
pub mod normalize;
pub mod overview;
pub mod payload;
pub mod storage;
pub mod summary;
pub mod types;
pub mod utils;
