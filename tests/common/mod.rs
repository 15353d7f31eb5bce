#![allow(dead_code)]

use fantasy_champ_backend::app::AppState;
use fantasy_champ_backend::dto::player_dto::{Money, Player, Position};
use fantasy_champ_backend::repository::SqliteStore;
use tempfile::TempDir;

pub struct Harness {
    _dir: TempDir,
    pub store: SqliteStore,
    pub state: AppState,
}

pub async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("fantasy.db").display());
    let store = SqliteStore::connect(&url, 4).await.unwrap();
    store.migrate().await.unwrap();
    let state = AppState::new(store.clone(), 2);
    Harness { _dir: dir, store, state }
}

/// Fifteen players of one club in the squad split, GK first, every one at `credits`.
pub async fn squad(store: &SqliteStore, club: &str, credits: f64) -> Vec<Player> {
    let club_id = store.insert_club(club).await.unwrap();
    let mut players = Vec::new();
    for position in Position::ALL {
        for n in 0..position.ceiling() {
            let name = format!("{club} {position} {n}");
            players.push(
                store
                    .insert_player(&name, position, Money::from_credits(credits), club_id)
                    .await
                    .unwrap(),
            );
        }
    }
    players
}

pub async fn owner(store: &SqliteStore, first_name: &str) -> i64 {
    store.insert_user(first_name, "Tester", false).await.unwrap()
}
