use std::cmp::Reverse;
use std::sync::Arc;

use tracing::{info, warn};

use crate::dto::league_dto::{JornadaPoints, LeagueRanking, RankingEntry, Standing};
use crate::error::{FantasyError, FantasyResult};
use crate::repository::{LeagueRepository, ScoreRepository};

/**
 * Ranks standings by cumulative points descending, then team name, then
 * team id. System accounts are dropped. With `jornada = Some(n)` only
 * jornadas up to `n` are counted.
 */
pub fn rank_standings(standings: Vec<Standing>, jornada: Option<i64>) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = standings
        .into_iter()
        .filter(|s| !s.participant.is_system)
        .map(|standing| {
            let mut breakdown: Vec<JornadaPoints> = standing
                .scores
                .iter()
                .filter(|s| jornada.is_none_or(|n| s.jornada_id <= n))
                .map(|s| JornadaPoints { jornada_id: s.jornada_id, points: s.points })
                .collect();
            breakdown.sort_by_key(|p| p.jornada_id);

            let cumulative_points = breakdown.iter().map(|p| p.points).sum();
            let jornada_points = match jornada {
                Some(n) => breakdown.iter().find(|p| p.jornada_id == n).map(|p| p.points).unwrap_or(0),
                None => breakdown.last().map(|p| p.points).unwrap_or(0),
            };

            RankingEntry {
                rank: 0,
                team_id: standing.participant.team_id,
                team_name: standing.participant.team_name,
                owner_name: standing.participant.owner_name,
                jornada_points,
                cumulative_points,
                breakdown,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        Reverse(a.cumulative_points)
            .cmp(&Reverse(b.cumulative_points))
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

pub struct LeagueAggregator {
    leagues: Arc<dyn LeagueRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl LeagueAggregator {
    pub fn new(leagues: Arc<dyn LeagueRepository>, scores: Arc<dyn ScoreRepository>) -> Self {
        Self { leagues, scores }
    }

    pub async fn ranking(&self, league_id: i64, jornada: Option<i64>) -> FantasyResult<LeagueRanking> {
        info!("Ranking league {} at jornada {:?}", league_id, jornada);

        let Some(league) = self.leagues.find_league(league_id).await? else {
            warn!("League {} does not exist", league_id);
            return Err(FantasyError::NotFound { entity: "league", id: league_id });
        };

        let mut standings = Vec::new();
        for participant in self.leagues.participants(league_id).await? {
            let scores = self.scores.team_scores(participant.team_id).await?;
            standings.push(Standing { participant, scores });
        }

        Ok(LeagueRanking { league, jornada, entries: rank_standings(standings, jornada) })
    }
}
