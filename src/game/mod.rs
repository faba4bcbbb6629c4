pub mod match_validator;
pub mod roster;
pub mod stats_calculator;
