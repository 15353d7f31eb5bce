use std::collections::HashMap;

use crate::dto::player_dto::Position;
use crate::dto::score_dto::{MatchdayStat, TeamScore};

const POINTS_PER_GOAL: i64 = 5;
const POINTS_PER_ASSIST: i64 = 3;
const YELLOW_PENALTY: i64 = 1;
const RED_PENALTY: i64 = 3;
const MINUTES_PER_POINT: i64 = 30;
const CONCEDED_MIN_MINUTES: i64 = 60;
const CONCEDED_PENALTY_CAP: i64 = 2;

/// Fantasy points of one player in one jornada. Never negative.
pub fn player_points(stat: &MatchdayStat, position: Position) -> i64 {
    let mut points = 0;

    if stat.minutes >= MINUTES_PER_POINT {
        points += stat.minutes / MINUTES_PER_POINT;
    }
    points += POINTS_PER_GOAL * stat.goals;
    points += POINTS_PER_ASSIST * stat.assists;
    points -= YELLOW_PENALTY * stat.yellow;
    points -= RED_PENALTY * stat.red;

    if position.concedes() && stat.minutes >= CONCEDED_MIN_MINUTES {
        points -= stat.goals_conceded.clamp(0, CONCEDED_PENALTY_CAP);
    }

    points.max(0)
}

/// Sum of the given on-field players' points. Players without a score count as 0.
pub fn team_points(on_field: &[i64], points_by_player: &HashMap<i64, i64>) -> i64 {
    on_field.iter().map(|id| points_by_player.get(id).copied().unwrap_or(0)).sum()
}

/// Sorts by jornada and rewrites every `cumulative_points` as the running sum
/// of `points`. Earlier cumulative values are ignored, never added to.
pub fn rebuild_cumulative(scores: &mut [TeamScore]) {
    scores.sort_by_key(|s| s.jornada_id);
    let mut running = 0;
    for score in scores.iter_mut() {
        running += score.points;
        score.cumulative_points = running;
    }
}
