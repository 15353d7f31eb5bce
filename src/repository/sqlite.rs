use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::{error, info};

use crate::dto::league_dto::{League, Participant};
use crate::dto::player_dto::{Money, Player, PlayersByPosition, Position};
use crate::dto::score_dto::{Jornada, MatchdayStat, PlayerScore, TeamScore};
use crate::dto::team_dto::{RosterEntry, Team};
use crate::dto::user_dto::User;
use crate::error::{infra, FantasyError, FantasyResult};
use crate::repository::{
    LeagueRepository, MatchStatsFeed, PlayerCatalog, ScoreRepository, TeamJornadaResult, TeamRepository,
};
use crate::services::roster::{RosterCommit, SlotWrite, TeamRoster};
use crate::services::scoring;

const TEAM_COLUMNS: &str = "id, name, owner_id, budget_remaining, total_points, version";
const PLAYER_COLUMNS: &str = "id, name, position, price, club_id";

#[derive(FromRow)]
struct RosterRow {
    id: i64,
    name: String,
    position: Position,
    price: Money,
    club_id: i64,
    on_field: bool,
}

impl From<RosterRow> for RosterEntry {
    fn from(row: RosterRow) -> Self {
        RosterEntry {
            player: Player {
                id: row.id,
                name: row.name,
                position: row.position,
                price: row.price,
                club_id: row.club_id,
            },
            on_field: row.on_field,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// SQLite-backed implementation of every persistence port.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> FantasyResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(infra("parse database url"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(infra("connect"))?;

        info!("Connected to sqlite database.");
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> FantasyResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await.map_err(|e| {
            error!("Migration failed: {}", e);
            FantasyError::Infrastructure { step: "migrate", reason: e.to_string() }
        })
    }

    pub async fn insert_user(&self, first_name: &str, last_name: &str, is_system: bool) -> FantasyResult<i64> {
        sqlx::query_scalar("INSERT INTO users (first_name, last_name, is_system) VALUES (?, ?, ?) RETURNING id")
            .bind(first_name)
            .bind(last_name)
            .bind(is_system)
            .fetch_one(&self.pool)
            .await
            .map_err(infra("insert user"))
    }

    pub async fn insert_club(&self, name: &str) -> FantasyResult<i64> {
        sqlx::query_scalar("INSERT INTO clubs (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(infra("insert club"))
    }

    pub async fn insert_player(&self, name: &str, position: Position, price: Money, club_id: i64) -> FantasyResult<Player> {
        let sql = format!("INSERT INTO players (name, position, price, club_id) VALUES (?, ?, ?, ?) RETURNING {PLAYER_COLUMNS}");
        sqlx::query_as::<_, Player>(&sql)
            .bind(name)
            .bind(position)
            .bind(price)
            .bind(club_id)
            .fetch_one(&self.pool)
            .await
            .map_err(infra("insert player"))
    }

    pub async fn insert_jornada(&self, jornada: &Jornada) -> FantasyResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jornadas (id, starts_on, ends_on)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                starts_on = excluded.starts_on,
                ends_on = excluded.ends_on
            "#,
        )
        .bind(jornada.id)
        .bind(jornada.starts_on)
        .bind(jornada.ends_on)
        .execute(&self.pool)
        .await
        .map_err(infra("insert jornada"))?;
        Ok(())
    }

    /// Stores a settled stat line, replacing any earlier one for the same pair.
    pub async fn record_stat(&self, stat: &MatchdayStat) -> FantasyResult<()> {
        sqlx::query(
            r#"
            INSERT INTO matchday_stats (
                player_id, jornada_id, minutes, goals, assists, yellow, red, goals_conceded
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(player_id, jornada_id) DO UPDATE SET
                minutes = excluded.minutes,
                goals = excluded.goals,
                assists = excluded.assists,
                yellow = excluded.yellow,
                red = excluded.red,
                goals_conceded = excluded.goals_conceded
            "#,
        )
        .bind(stat.player_id)
        .bind(stat.jornada_id)
        .bind(stat.minutes)
        .bind(stat.goals)
        .bind(stat.assists)
        .bind(stat.yellow)
        .bind(stat.red)
        .bind(stat.goals_conceded)
        .execute(&self.pool)
        .await
        .map_err(infra("record stat"))?;
        Ok(())
    }

    pub async fn create_league(&self, name: &str) -> FantasyResult<i64> {
        sqlx::query_scalar("INSERT INTO leagues (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(infra("create league"))
    }

    pub async fn join_league(&self, user_id: i64, league_id: i64) -> FantasyResult<()> {
        sqlx::query("INSERT INTO participations (user_id, league_id) VALUES (?, ?) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .bind(league_id)
            .execute(&self.pool)
            .await
            .map_err(infra("join league"))?;
        Ok(())
    }
}

#[async_trait]
impl PlayerCatalog for SqliteStore {
    async fn get_player(&self, player_id: i64) -> FantasyResult<Option<Player>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?");
        sqlx::query_as::<_, Player>(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra("get player"))
    }

    async fn list_by_position(&self) -> FantasyResult<PlayersByPosition> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name, id");
        let players = sqlx::query_as::<_, Player>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(infra("list players"))?;

        let mut grouped = PlayersByPosition::default();
        for player in players {
            grouped.push(player);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl MatchStatsFeed for SqliteStore {
    async fn get_stats(&self, player_id: i64, jornada_id: i64) -> FantasyResult<Option<MatchdayStat>> {
        sqlx::query_as::<_, MatchdayStat>(
            r#"
            SELECT player_id, jornada_id, minutes, goals, assists, yellow, red, goals_conceded
            FROM matchday_stats
            WHERE player_id = ? AND jornada_id = ?
            "#,
        )
        .bind(player_id)
        .bind(jornada_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra("get stats"))
    }
}

#[async_trait]
impl TeamRepository for SqliteStore {
    async fn find_user(&self, user_id: i64) -> FantasyResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, first_name, last_name, is_system FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra("find user"))
    }

    async fn create_team(&self, name: &str, owner_id: i64, budget: Money) -> FantasyResult<Team> {
        let sql = format!(
            "INSERT INTO teams (name, owner_id, budget_remaining, total_points, version) VALUES (?, ?, ?, 0, 0) RETURNING {TEAM_COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&sql)
            .bind(name)
            .bind(owner_id)
            .bind(budget)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    FantasyError::AlreadyExists { owner_id }
                } else {
                    infra("create team")(e)
                }
            })
    }

    async fn find_team_by_owner(&self, owner_id: i64) -> FantasyResult<Option<Team>> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE owner_id = ?");
        sqlx::query_as::<_, Team>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra("find team by owner"))
    }

    async fn load_roster(&self, team_id: i64) -> FantasyResult<Option<TeamRoster>> {
        let mut tx = self.pool.begin().await.map_err(infra("begin roster read"))?;

        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?");
        let Some(team) = sqlx::query_as::<_, Team>(&sql)
            .bind(team_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(infra("load team"))?
        else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, RosterRow>(
            r#"
            SELECT p.id, p.name, p.position, p.price, p.club_id, s.on_field
            FROM roster_slots s
            JOIN players p ON p.id = s.player_id
            WHERE s.team_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(team_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(infra("load roster"))?;

        tx.commit().await.map_err(infra("end roster read"))?;
        Ok(Some(TeamRoster::new(team, rows.into_iter().map(RosterEntry::from).collect())))
    }

    async fn team_holding(&self, player_id: i64) -> FantasyResult<Option<i64>> {
        sqlx::query_scalar("SELECT team_id FROM roster_slots WHERE player_id = ?")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra("find player owner"))
    }

    async fn commit(&self, commit: &RosterCommit) -> FantasyResult<()> {
        let mut tx = self.pool.begin().await.map_err(infra("begin roster commit"))?;

        let updated = sqlx::query(
            r#"
            UPDATE teams
            SET budget_remaining = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(commit.budget_remaining)
        .bind(commit.team_id)
        .bind(commit.expected_version)
        .execute(&mut *tx)
        .await
        .map_err(infra("update budget"))?;

        if updated.rows_affected() == 0 {
            return Err(FantasyError::Infrastructure {
                step: "update budget",
                reason: format!("team {} changed since version {}", commit.team_id, commit.expected_version),
            });
        }

        for write in &commit.writes {
            match write {
                SlotWrite::Insert { player, on_field } => {
                    sqlx::query("INSERT INTO roster_slots (team_id, player_id, on_field) VALUES (?, ?, ?)")
                        .bind(commit.team_id)
                        .bind(player.id)
                        .bind(*on_field)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| {
                            if is_unique_violation(&e) {
                                FantasyError::PlayerTaken { player_id: player.id }
                            } else {
                                infra("insert roster slot")(e)
                            }
                        })?;
                }
                SlotWrite::Delete { player_id } => {
                    sqlx::query("DELETE FROM roster_slots WHERE team_id = ? AND player_id = ?")
                        .bind(commit.team_id)
                        .bind(player_id)
                        .execute(&mut *tx)
                        .await
                        .map_err(infra("delete roster slot"))?;
                }
                SlotWrite::SetOnField { player_id, on_field } => {
                    sqlx::query("UPDATE roster_slots SET on_field = ? WHERE team_id = ? AND player_id = ?")
                        .bind(*on_field)
                        .bind(commit.team_id)
                        .bind(player_id)
                        .execute(&mut *tx)
                        .await
                        .map_err(infra("move roster slot"))?;
                }
            }
        }

        tx.commit().await.map_err(infra("commit roster"))
    }

    async fn list_team_ids(&self) -> FantasyResult<Vec<i64>> {
        sqlx::query_scalar("SELECT id FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(infra("list teams"))
    }
}

#[async_trait]
impl ScoreRepository for SqliteStore {
    async fn list_jornadas(&self) -> FantasyResult<Vec<Jornada>> {
        sqlx::query_as::<_, Jornada>("SELECT id, starts_on, ends_on FROM jornadas ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(infra("list jornadas"))
    }

    async fn save_player_score(&self, score: &PlayerScore) -> FantasyResult<()> {
        sqlx::query(
            r#"
            INSERT INTO player_points (player_id, jornada_id, points)
            VALUES (?, ?, ?)
            ON CONFLICT(player_id, jornada_id) DO UPDATE SET points = excluded.points
            "#,
        )
        .bind(score.player_id)
        .bind(score.jornada_id)
        .bind(score.points)
        .execute(&self.pool)
        .await
        .map_err(infra("save player score"))?;
        Ok(())
    }

    async fn save_team_jornada(&self, result: &TeamJornadaResult) -> FantasyResult<TeamScore> {
        let mut tx = self.pool.begin().await.map_err(infra("begin score commit"))?;

        for score in &result.player_scores {
            sqlx::query(
                r#"
                INSERT INTO player_points (player_id, jornada_id, points)
                VALUES (?, ?, ?)
                ON CONFLICT(player_id, jornada_id) DO UPDATE SET points = excluded.points
                "#,
            )
            .bind(score.player_id)
            .bind(score.jornada_id)
            .bind(score.points)
            .execute(&mut *tx)
            .await
            .map_err(infra("save player score"))?;
        }

        sqlx::query(
            r#"
            INSERT INTO team_scores (team_id, jornada_id, points, cumulative_points)
            VALUES (?, ?, ?, 0)
            ON CONFLICT(team_id, jornada_id) DO UPDATE SET points = excluded.points
            "#,
        )
        .bind(result.team_id)
        .bind(result.jornada_id)
        .bind(result.points)
        .execute(&mut *tx)
        .await
        .map_err(infra("save team score"))?;

        let mut rows = sqlx::query_as::<_, TeamScore>(
            "SELECT team_id, jornada_id, points, cumulative_points FROM team_scores WHERE team_id = ? ORDER BY jornada_id",
        )
        .bind(result.team_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(infra("load team scores"))?;

        scoring::rebuild_cumulative(&mut rows);
        for row in &rows {
            sqlx::query("UPDATE team_scores SET cumulative_points = ? WHERE team_id = ? AND jornada_id = ?")
                .bind(row.cumulative_points)
                .bind(row.team_id)
                .bind(row.jornada_id)
                .execute(&mut *tx)
                .await
                .map_err(infra("rebuild cumulative"))?;
        }

        let total = rows.last().map(|row| row.cumulative_points).unwrap_or(0);
        sqlx::query("UPDATE teams SET total_points = ? WHERE id = ?")
            .bind(total)
            .bind(result.team_id)
            .execute(&mut *tx)
            .await
            .map_err(infra("update team total"))?;

        tx.commit().await.map_err(infra("commit scores"))?;

        rows.into_iter()
            .find(|row| row.jornada_id == result.jornada_id)
            .ok_or(FantasyError::Infrastructure {
                step: "commit scores",
                reason: format!("score row for jornada {} vanished", result.jornada_id),
            })
    }

    async fn team_score(&self, team_id: i64, jornada_id: i64) -> FantasyResult<Option<TeamScore>> {
        sqlx::query_as::<_, TeamScore>(
            "SELECT team_id, jornada_id, points, cumulative_points FROM team_scores WHERE team_id = ? AND jornada_id = ?",
        )
        .bind(team_id)
        .bind(jornada_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra("get team score"))
    }

    async fn team_scores(&self, team_id: i64) -> FantasyResult<Vec<TeamScore>> {
        sqlx::query_as::<_, TeamScore>(
            "SELECT team_id, jornada_id, points, cumulative_points FROM team_scores WHERE team_id = ? ORDER BY jornada_id",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra("list team scores"))
    }
}

#[async_trait]
impl LeagueRepository for SqliteStore {
    async fn find_league(&self, league_id: i64) -> FantasyResult<Option<League>> {
        sqlx::query_as::<_, League>("SELECT id, name FROM leagues WHERE id = ?")
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra("find league"))
    }

    async fn participants(&self, league_id: i64) -> FantasyResult<Vec<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT
                t.id AS team_id,
                t.name AS team_name,
                u.first_name || ' ' || u.last_name AS owner_name,
                u.is_system AS is_system
            FROM participations pa
            JOIN users u ON u.id = pa.user_id
            JOIN teams t ON t.owner_id = u.id
            WHERE pa.league_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra("list participants"))
    }
}

/// Helper for building jornadas a week apart, starting on `first_day`.
pub fn weekly_jornadas(first_day: NaiveDate, count: i64) -> Vec<Jornada> {
    (0..count)
        .map(|i| {
            let starts_on = first_day + chrono::Duration::days(7 * i);
            Jornada { id: i + 1, starts_on, ends_on: starts_on + chrono::Duration::days(6) }
        })
        .collect()
}
