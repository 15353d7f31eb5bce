use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::{Id, JoinSet};
use tracing::{error, info, warn};

use crate::dto::score_dto::{Jornada, PlayerScore, SweepFailure, SweepReport, TeamScore};
use crate::error::{FantasyError, FantasyResult};
use crate::repository::{MatchStatsFeed, PlayerCatalog, ScoreRepository, TeamJornadaResult, TeamRepository};
use crate::services::roster_manager::TeamLocks;
use crate::services::scoring;

/// The jornada whose dates contain `today`, else the latest one.
pub fn current_jornada(jornadas: &[Jornada], today: NaiveDate) -> Option<&Jornada> {
    jornadas
        .iter()
        .find(|j| j.contains(today))
        .or_else(|| jornadas.iter().max_by_key(|j| j.id))
}

/// Derives player and team scores from the stats feed and persists them.
/// Every write overwrites; running it twice changes nothing. A team score is
/// computed under the same team lock roster mutations take, so it never
/// lands after a newer lineup was committed.
#[derive(Clone)]
pub struct ScoreCalculator {
    teams: Arc<dyn TeamRepository>,
    catalog: Arc<dyn PlayerCatalog>,
    stats: Arc<dyn MatchStatsFeed>,
    scores: Arc<dyn ScoreRepository>,
    locks: TeamLocks,
    concurrency: usize,
}

impl ScoreCalculator {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        catalog: Arc<dyn PlayerCatalog>,
        stats: Arc<dyn MatchStatsFeed>,
        scores: Arc<dyn ScoreRepository>,
        locks: TeamLocks,
        concurrency: usize,
    ) -> Self {
        Self { teams, catalog, stats, scores, locks, concurrency: concurrency.max(1) }
    }

    async fn jornada(&self, jornada_id: i64) -> FantasyResult<Jornada> {
        self.scores
            .list_jornadas()
            .await?
            .into_iter()
            .find(|j| j.id == jornada_id)
            .ok_or(FantasyError::NotFound { entity: "jornada", id: jornada_id })
    }

    pub async fn recompute_player(&self, player_id: i64, jornada_id: i64) -> FantasyResult<PlayerScore> {
        info!("Recomputing player {} for jornada {}", player_id, jornada_id);

        self.jornada(jornada_id).await?;
        let player = self
            .catalog
            .get_player(player_id)
            .await?
            .ok_or(FantasyError::NotFound { entity: "player", id: player_id })?;

        let points = match self.stats.get_stats(player_id, jornada_id).await? {
            Some(stat) => scoring::player_points(&stat, player.position),
            None => 0,
        };
        let score = PlayerScore { player_id, jornada_id, points };
        self.scores.save_player_score(&score).await?;
        Ok(score)
    }

    pub async fn recompute_team(&self, team_id: i64, jornada_id: i64) -> FantasyResult<TeamScore> {
        info!("Recomputing team {} for jornada {}", team_id, jornada_id);

        self.jornada(jornada_id).await?;
        self.recompute_team_unchecked(team_id, jornada_id).await
    }

    async fn recompute_team_unchecked(&self, team_id: i64, jornada_id: i64) -> FantasyResult<TeamScore> {
        let _guard = self.locks.lock(team_id).await;
        let roster = self
            .teams
            .load_roster(team_id)
            .await?
            .ok_or(FantasyError::NotFound { entity: "team", id: team_id })?;

        let mut player_scores = Vec::new();
        for entry in roster.entries.iter().filter(|e| e.on_field) {
            let points = match self.stats.get_stats(entry.player.id, jornada_id).await? {
                Some(stat) => scoring::player_points(&stat, entry.player.position),
                None => 0,
            };
            player_scores.push(PlayerScore { player_id: entry.player.id, jornada_id, points });
        }

        let by_player: HashMap<i64, i64> = player_scores.iter().map(|s| (s.player_id, s.points)).collect();
        let points = scoring::team_points(&roster.on_field_ids(), &by_player);

        self.scores
            .save_team_jornada(&TeamJornadaResult { team_id, jornada_id, points, player_scores })
            .await
    }

    async fn sweep_team(&self, team_id: i64, jornadas: &[Jornada]) -> (usize, Vec<SweepFailure>) {
        let mut recomputed = 0;
        let mut failures = Vec::new();
        for jornada in jornadas {
            match self.recompute_team_unchecked(team_id, jornada.id).await {
                Ok(_) => recomputed += 1,
                Err(e) => {
                    error!("Recompute of team {} jornada {} failed: {}", team_id, jornada.id, e);
                    failures.push(SweepFailure { team_id, jornada_id: jornada.id, error: e.to_string() });
                }
            }
        }
        (recomputed, failures)
    }

    /**
     * Recomputes every team for every jornada, at most `concurrency` teams at
     * a time. Each (team, jornada) commits on its own, so an interrupted
     * sweep is resumed by running it again.
     */
    pub async fn recompute_all(&self) -> FantasyResult<SweepReport> {
        let jornadas: Arc<[Jornada]> = self.scores.list_jornadas().await?.into();
        let team_ids = self.teams.list_team_ids().await?;
        info!("Recomputing {} teams over {} jornadas", team_ids.len(), jornadas.len());

        let mut report = SweepReport { teams: team_ids.len(), ..Default::default() };
        let mut pending = team_ids.into_iter();
        let mut running = JoinSet::new();
        let mut team_of: HashMap<Id, i64> = HashMap::new();

        loop {
            while running.len() < self.concurrency {
                let Some(team_id) = pending.next() else { break };
                let calculator = self.clone();
                let jornadas = Arc::clone(&jornadas);
                let handle = running.spawn(async move { calculator.sweep_team(team_id, &jornadas).await });
                team_of.insert(handle.id(), team_id);
            }

            match running.join_next_with_id().await {
                Some(Ok((_, (recomputed, failures)))) => {
                    report.recomputed += recomputed;
                    report.failures.extend(failures);
                }
                Some(Err(e)) => {
                    let Some(team_id) = team_of.get(&e.id()).copied() else {
                        error!("Sweep task aborted: {}", e);
                        continue;
                    };
                    error!("Sweep of team {} aborted: {}", team_id, e);
                    report.failures.extend(jornadas.iter().map(|j| SweepFailure {
                        team_id,
                        jornada_id: j.id,
                        error: format!("sweep task aborted: {e}"),
                    }));
                }
                None => break,
            }
        }

        report.failures.sort_by_key(|f| (f.team_id, f.jornada_id));
        if report.failures.is_empty() {
            info!("Sweep finished, {} team jornadas recomputed", report.recomputed);
        } else {
            warn!("Sweep finished with {} failures", report.failures.len());
        }
        Ok(report)
    }

    /// Refreshes the team's current jornada after its roster changed.
    pub async fn roster_changed(&self, team_id: i64, today: NaiveDate) -> FantasyResult<Option<TeamScore>> {
        let jornadas = self.scores.list_jornadas().await?;
        let Some(jornada) = current_jornada(&jornadas, today) else {
            return Ok(None);
        };
        self.recompute_team_unchecked(team_id, jornada.id).await.map(Some)
    }

    pub async fn get_team_score(&self, team_id: i64, jornada_id: i64) -> FantasyResult<Option<TeamScore>> {
        info!("Fetching score of team {} for jornada {}", team_id, jornada_id);
        self.scores.team_score(team_id, jornada_id).await
    }

    pub async fn get_cumulative_scores(&self, team_id: i64) -> FantasyResult<Vec<TeamScore>> {
        info!("Fetching scores of team {}", team_id);
        self.scores.team_scores(team_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::dto::player_dto::{Money, Player, PlayersByPosition};
    use crate::dto::score_dto::MatchdayStat;
    use crate::dto::team_dto::{Team, INITIAL_BUDGET};
    use crate::dto::user_dto::User;
    use crate::services::roster::{RosterCommit, TeamRoster};

    /// Empty rosters for every team, except that loading team 2 panics.
    struct BrokenTeamTwo;

    #[async_trait]
    impl TeamRepository for BrokenTeamTwo {
        async fn find_user(&self, _: i64) -> FantasyResult<Option<User>> {
            Ok(None)
        }

        async fn create_team(&self, _: &str, _: i64, _: Money) -> FantasyResult<Team> {
            unreachable!("sweeps never create teams")
        }

        async fn find_team_by_owner(&self, _: i64) -> FantasyResult<Option<Team>> {
            Ok(None)
        }

        async fn load_roster(&self, team_id: i64) -> FantasyResult<Option<TeamRoster>> {
            if team_id == 2 {
                panic!("corrupt roster for team 2");
            }
            let team = Team {
                id: team_id,
                name: format!("Team {team_id}"),
                owner_id: team_id,
                budget_remaining: INITIAL_BUDGET,
                total_points: 0,
                version: 0,
            };
            Ok(Some(TeamRoster::new(team, Vec::new())))
        }

        async fn team_holding(&self, _: i64) -> FantasyResult<Option<i64>> {
            Ok(None)
        }

        async fn commit(&self, _: &RosterCommit) -> FantasyResult<()> {
            unreachable!("sweeps never change rosters")
        }

        async fn list_team_ids(&self) -> FantasyResult<Vec<i64>> {
            Ok(vec![1, 2, 3])
        }
    }

    #[async_trait]
    impl PlayerCatalog for BrokenTeamTwo {
        async fn get_player(&self, _: i64) -> FantasyResult<Option<Player>> {
            Ok(None)
        }

        async fn list_by_position(&self) -> FantasyResult<PlayersByPosition> {
            unreachable!("sweeps never list the catalog")
        }
    }

    #[async_trait]
    impl MatchStatsFeed for BrokenTeamTwo {
        async fn get_stats(&self, _: i64, _: i64) -> FantasyResult<Option<MatchdayStat>> {
            Ok(None)
        }
    }

    #[async_trait]
    impl ScoreRepository for BrokenTeamTwo {
        async fn list_jornadas(&self) -> FantasyResult<Vec<Jornada>> {
            Ok(jornadas()[..2].to_vec())
        }

        async fn save_player_score(&self, _: &PlayerScore) -> FantasyResult<()> {
            Ok(())
        }

        async fn save_team_jornada(&self, result: &TeamJornadaResult) -> FantasyResult<TeamScore> {
            Ok(TeamScore {
                team_id: result.team_id,
                jornada_id: result.jornada_id,
                points: result.points,
                cumulative_points: result.points,
            })
        }

        async fn team_score(&self, _: i64, _: i64) -> FantasyResult<Option<TeamScore>> {
            Ok(None)
        }

        async fn team_scores(&self, _: i64) -> FantasyResult<Vec<TeamScore>> {
            Ok(Vec::new())
        }
    }

    fn jornadas() -> Vec<Jornada> {
        let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        vec![
            Jornada { id: 1, starts_on: day(1), ends_on: day(7) },
            Jornada { id: 2, starts_on: day(8), ends_on: day(14) },
            Jornada { id: 3, starts_on: day(15), ends_on: day(21) },
        ]
    }

    #[test]
    fn current_jornada_contains_today() {
        let all = jornadas();
        let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        assert_eq!(current_jornada(&all, today).map(|j| j.id), Some(2));
        let edge = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        assert_eq!(current_jornada(&all, edge).map(|j| j.id), Some(2));
    }

    #[test]
    fn outside_every_range_falls_back_to_latest() {
        let all = jornadas();
        let late = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(current_jornada(&all, late).map(|j| j.id), Some(3));
        assert!(current_jornada(&[], late).is_none());
    }

    #[tokio::test]
    async fn aborted_team_sweep_is_reported_per_jornada() {
        let repo = Arc::new(BrokenTeamTwo);
        let calculator =
            ScoreCalculator::new(repo.clone(), repo.clone(), repo.clone(), repo, TeamLocks::default(), 2);

        let report = calculator.recompute_all().await.unwrap();
        assert_eq!(report.teams, 3);
        assert_eq!(report.recomputed, 4);
        let failed: Vec<(i64, i64)> = report.failures.iter().map(|f| (f.team_id, f.jornada_id)).collect();
        assert_eq!(failed, vec![(2, 1), (2, 2)]);
        assert!(report.failures.iter().all(|f| f.error.contains("aborted")));
    }
}
