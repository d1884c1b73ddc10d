pub mod db;
pub mod pg;
