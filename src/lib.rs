pub mod app;
pub mod config;
pub mod error;
pub mod repository;

pub mod dto {
    pub mod league_dto;
    pub mod player_dto;
    pub mod request_team_dto;
    pub mod score_dto;
    pub mod team_dto;
    pub mod user_dto;
}

pub mod routes {
    pub mod errors;
    pub mod leagues;
    pub mod players;
    pub mod scores;
    pub mod teams;
}

pub mod services {
    pub mod league_aggregator;
    pub mod placement;
    pub mod roster;
    pub mod roster_manager;
    pub mod score_calculator;
    pub mod scoring;
    pub mod seed;
}
