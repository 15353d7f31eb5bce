use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub owner_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPlayer {
    pub player_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapPlayers {
    pub bench_player_id: i64,
    pub field_player_id: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct RankingQuery {
    pub jornada: Option<i64>,
}
