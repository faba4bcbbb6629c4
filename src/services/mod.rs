pub mod match_service;
pub mod player_service;

pub use match_service::MatchService;
pub use player_service::PlayerService;
