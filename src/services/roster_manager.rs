use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};

use crate::dto::player_dto::Player;
use crate::dto::team_dto::{RosterView, Team, TeamLimits, INITIAL_BUDGET};
use crate::error::{FantasyError, FantasyResult};
use crate::repository::{PlayerCatalog, TeamRepository};
use crate::services::roster::{RosterCommit, TeamRoster};

fn log_failure(op: &str, team_id: i64, e: &FantasyError) {
    if e.is_retryable() {
        error!("{} on team {} failed: {}", op, team_id, e);
    } else {
        warn!("{} on team {} refused: {}", op, team_id, e);
    }
}

/// One mutex per team, shared by everything that reads a roster and writes
/// something derived from it.
#[derive(Clone, Default)]
pub struct TeamLocks {
    inner: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl TeamLocks {
    pub async fn lock(&self, team_id: i64) -> OwnedMutexGuard<()> {
        let lock = self.inner.entry(team_id).or_default().value().clone();
        lock.lock_owned().await
    }
}

/// Entry point for every roster mutation. Mutations of one team are
/// serialized on that team's lock from load to commit.
pub struct RosterManager {
    teams: Arc<dyn TeamRepository>,
    catalog: Arc<dyn PlayerCatalog>,
    locks: TeamLocks,
}

impl RosterManager {
    pub fn new(teams: Arc<dyn TeamRepository>, catalog: Arc<dyn PlayerCatalog>, locks: TeamLocks) -> Self {
        Self { teams, catalog, locks }
    }

    async fn load(&self, team_id: i64) -> FantasyResult<TeamRoster> {
        self.teams
            .load_roster(team_id)
            .await?
            .ok_or(FantasyError::NotFound { entity: "team", id: team_id })
    }

    async fn player(&self, player_id: i64) -> FantasyResult<Player> {
        self.catalog
            .get_player(player_id)
            .await?
            .ok_or(FantasyError::NotFound { entity: "player", id: player_id })
    }

    async fn commit(&self, mut roster: TeamRoster, commit: RosterCommit) -> FantasyResult<TeamRoster> {
        self.teams.commit(&commit).await?;
        roster.apply(&commit);
        Ok(roster)
    }

    pub async fn create_team(&self, name: &str, owner_id: i64) -> FantasyResult<Team> {
        info!("Creating a team {} for owner {}", name, owner_id);

        let name = name.trim();
        if name.is_empty() {
            let e = FantasyError::ConstraintViolation("team name must not be blank".to_string());
            warn!("Team creation refused: {}", e);
            return Err(e);
        }

        let result = async {
            let Some(owner) = self.teams.find_user(owner_id).await? else {
                return Err(FantasyError::NotFound { entity: "user", id: owner_id });
            };
            if self.teams.find_team_by_owner(owner_id).await?.is_some() {
                return Err(FantasyError::AlreadyExists { owner_id });
            }
            let team = self.teams.create_team(name, owner_id, INITIAL_BUDGET).await?;
            info!("Created team {} ({}) for {}", team.id, team.name, owner.display_name());
            Ok(team)
        }
        .await;

        match &result {
            Err(e) if e.is_retryable() => error!("Failed to create team: {}", e),
            Err(e) => warn!("Team creation refused: {}", e),
            Ok(_) => {}
        }
        result
    }

    pub async fn add_player(&self, team_id: i64, player_id: i64) -> FantasyResult<TeamRoster> {
        info!("Adding player {} to team {}", player_id, team_id);

        let _guard = self.locks.lock(team_id).await;

        let result = async {
            let roster = self.load(team_id).await?;
            let player = self.player(player_id).await?;
            let taken_by = self.teams.team_holding(player_id).await?;
            let commit = roster.plan_add(&player, taken_by)?;
            self.commit(roster, commit).await
        }
        .await;

        if let Err(e) = &result {
            log_failure("add player", team_id, e);
        }
        result
    }

    pub async fn remove_player(&self, team_id: i64, player_id: i64) -> FantasyResult<TeamRoster> {
        info!("Removing player {} from team {}", player_id, team_id);

        let _guard = self.locks.lock(team_id).await;

        let result = async {
            let roster = self.load(team_id).await?;
            let commit = roster.plan_remove(player_id)?;
            self.commit(roster, commit).await
        }
        .await;

        if let Err(e) = &result {
            log_failure("remove player", team_id, e);
        }
        result
    }

    pub async fn swap_bench_field(
        &self,
        team_id: i64,
        bench_player_id: i64,
        field_player_id: i64,
    ) -> FantasyResult<TeamRoster> {
        info!("Swapping bench {} with field {} on team {}", bench_player_id, field_player_id, team_id);

        let _guard = self.locks.lock(team_id).await;

        let result = async {
            let roster = self.load(team_id).await?;
            let commit = roster.plan_swap(bench_player_id, field_player_id)?;
            self.commit(roster, commit).await
        }
        .await;

        if let Err(e) = &result {
            log_failure("swap", team_id, e);
        }
        result
    }

    pub async fn query_limits(&self, team_id: i64) -> FantasyResult<TeamLimits> {
        info!("Fetching limits of team {}", team_id);
        Ok(self.load(team_id).await?.limits())
    }

    pub async fn get_roster(&self, team_id: i64) -> FantasyResult<RosterView> {
        info!("Fetching roster of team {}", team_id);
        Ok(self.load(team_id).await?.into_view())
    }

    pub async fn get_team_by_owner(&self, owner_id: i64) -> FantasyResult<Team> {
        info!("Fetching team of owner {}", owner_id);
        self.teams
            .find_team_by_owner(owner_id)
            .await?
            .ok_or(FantasyError::NotFound { entity: "team of user", id: owner_id })
    }
}
