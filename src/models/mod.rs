pub mod common;
pub mod match_record;
pub mod player;
