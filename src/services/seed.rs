use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::dto::player_dto::{Money, Player, Position};
use crate::dto::score_dto::{MatchdayStat, SweepReport};
use crate::dto::team_dto::{INITIAL_BUDGET, SQUAD_SIZE};
use crate::error::FantasyResult;
use crate::repository::sqlite::weekly_jornadas;
use crate::repository::SqliteStore;
use crate::services::roster_manager::RosterManager;
use crate::services::score_calculator::ScoreCalculator;

const CLUBS: [&str; 8] = [
    "Lisboa Atlético",
    "Porto Azul",
    "Braga Vermelho",
    "Coimbra Académica",
    "Madrid Norte",
    "Milano Centrale",
    "München Süd",
    "Paris Rive Gauche",
];

const FIRST_NAMES: [&str; 12] = [
    "João", "Rui", "Tiago", "Nuno", "Pedro", "André", "Diogo", "Bruno", "Miguel", "Luís", "Carlos", "Hugo",
];

const LAST_NAMES: [&str; 12] = [
    "Silva", "Santos", "Ferreira", "Pereira", "Costa", "Rodrigues", "Martins", "Gomes", "Lopes", "Marques", "Almeida",
    "Ribeiro",
];

const DEMO_OWNERS: [(&str, &str, &str); 6] = [
    ("Ana", "Sousa", "Leões da Estrela"),
    ("Beatriz", "Carvalho", "Dragões do Norte"),
    ("Carla", "Teixeira", "Águias de Ouro"),
    ("Daniel", "Moreira", "Os Navegadores"),
    ("Eduardo", "Correia", "Real Fantasia"),
    ("Filipa", "Mendes", "Galácticos FC"),
];

const MIN_PRICE_TENTHS: i64 = 40;
const MAX_PRICE_TENTHS: i64 = 100;
const STARTERS: usize = 11;
const SUBSTITUTES: usize = 3;
const YELLOW_CHANCE: f64 = 0.15;
const RED_CHANCE: f64 = 0.02;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub jornadas: i64,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub clubs: usize,
    pub players: usize,
    pub jornadas: usize,
    pub stats: usize,
    pub teams: usize,
    pub league_id: i64,
    pub sweep: SweepReport,
}

/// Prices land on tenths of a credit between 4.0 and 10.0.
fn random_price(rng: &mut impl Rng) -> Money {
    Money::from_cents(rng.random_range(MIN_PRICE_TENTHS..=MAX_PRICE_TENTHS) * 10)
}

fn random_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

/**
 * Stat lines of one club in one match. One goalkeeper and ten outfield
 * players start, three more come on, the rest do not feature. Goals go to
 * midfielders and forwards, every goal gets one assist.
 */
pub fn club_match_stats(
    rng: &mut impl Rng,
    squad: &[Player],
    jornada_id: i64,
    goals_for: i64,
    goals_against: i64,
) -> Vec<MatchdayStat> {
    let mut keepers: Vec<&Player> = squad.iter().filter(|p| p.position == Position::Gk).collect();
    let mut outfield: Vec<&Player> = squad.iter().filter(|p| p.position != Position::Gk).collect();
    keepers.shuffle(rng);
    outfield.shuffle(rng);

    let mut playing: Vec<(&Player, i64)> = Vec::new();
    let starters = keepers.iter().take(1).chain(outfield.iter().take(STARTERS - 1));
    for player in starters {
        playing.push((*player, [90, 90, 90, 85, 80][rng.random_range(0..5)]));
    }
    for player in outfield.iter().skip(STARTERS - 1).take(SUBSTITUTES) {
        playing.push((*player, [15, 20, 25, 30][rng.random_range(0..4)]));
    }

    let mut stats: Vec<MatchdayStat> = playing
        .iter()
        .map(|(player, minutes)| MatchdayStat {
            player_id: player.id,
            jornada_id,
            minutes: *minutes,
            goals_conceded: goals_against,
            ..Default::default()
        })
        .collect();

    let attackers: Vec<usize> = playing
        .iter()
        .enumerate()
        .filter(|(_, (p, _))| matches!(p.position, Position::Mid | Position::Fwd))
        .map(|(i, _)| i)
        .collect();
    let involved: Vec<usize> = if attackers.is_empty() { (0..stats.len()).collect() } else { attackers };
    if !involved.is_empty() {
        for _ in 0..goals_for {
            let scorer = involved[rng.random_range(0..involved.len())];
            let assister = involved[rng.random_range(0..involved.len())];
            stats[scorer].goals += 1;
            stats[assister].assists += 1;
        }
    }

    for stat in stats.iter_mut() {
        if rng.random_bool(YELLOW_CHANCE) {
            stat.yellow = 1;
        }
        if rng.random_bool(RED_CHANCE) {
            stat.red = 1;
            stat.minutes = stat.minutes.min(rng.random_range(30..=70));
        }
    }
    stats
}

/// Fills a team through the roster manager, keeping enough budget back for
/// the slots still open at the cheapest possible price.
async fn fill_team(roster: &RosterManager, team_id: i64, pool: &[Player]) -> FantasyResult<usize> {
    let cheapest = Money::from_cents(MIN_PRICE_TENTHS * 10);
    let mut budget = INITIAL_BUDGET;
    let mut size = 0usize;

    for player in pool {
        if size == SQUAD_SIZE {
            break;
        }
        let reserve = Money::from_cents(cheapest.cents() * (SQUAD_SIZE - size - 1) as i64);
        if player.price + reserve > budget {
            continue;
        }
        match roster.add_player(team_id, player.id).await {
            Ok(after) => {
                budget = after.team.budget_remaining;
                size = after.entries.len();
            }
            Err(e) if e.is_retryable() => return Err(e),
            Err(_) => continue,
        }
    }
    Ok(size)
}

pub async fn seed(
    store: &SqliteStore,
    roster: &RosterManager,
    scores: &ScoreCalculator,
    options: &SeedOptions,
) -> FantasyResult<SeedSummary> {
    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    info!("Seeding {} jornadas.", options.jornadas);

    let system_id = store.insert_user("Fantasy", "Admin", true).await?;

    let mut squads: Vec<Vec<Player>> = Vec::new();
    for club in CLUBS {
        let club_id = store.insert_club(club).await?;
        let mut squad = Vec::new();
        for position in Position::ALL {
            for _ in 0..position.ceiling() {
                let name = random_name(&mut rng);
                let price = random_price(&mut rng);
                squad.push(store.insert_player(&name, position, price, club_id).await?);
            }
        }
        squads.push(squad);
    }
    let players: Vec<Player> = squads.iter().flatten().cloned().collect();
    info!("Inserted {} clubs and {} players.", squads.len(), players.len());

    let today = Utc::now().date_naive();
    let first_day = today - Duration::days(7 * (options.jornadas.max(1) - 1));
    let jornadas = weekly_jornadas(first_day, options.jornadas.max(0));
    let mut stat_count = 0;
    for jornada in &jornadas {
        store.insert_jornada(jornada).await?;

        let mut fixtures: Vec<usize> = (0..squads.len()).collect();
        fixtures.shuffle(&mut rng);
        for pair in fixtures.chunks(2) {
            let [home, away] = pair else { continue };
            let home_goals = rng.random_range(0..=5);
            let away_goals = rng.random_range(0..=5);
            let mut lines = club_match_stats(&mut rng, &squads[*home], jornada.id, home_goals, away_goals);
            lines.extend(club_match_stats(&mut rng, &squads[*away], jornada.id, away_goals, home_goals));
            for stat in &lines {
                store.record_stat(stat).await?;
            }
            stat_count += lines.len();
        }
    }
    info!("Recorded {} stat lines.", stat_count);

    let league_id = store.create_league("Liga Pública").await?;
    store.join_league(system_id, league_id).await?;
    roster.create_team("Equipa da Casa", system_id).await?;

    let mut teams = 1;
    for (first_name, last_name, team_name) in DEMO_OWNERS {
        let user_id = store.insert_user(first_name, last_name, false).await?;
        store.join_league(user_id, league_id).await?;
        let team = roster.create_team(team_name, user_id).await?;

        let mut pool = players.clone();
        pool.shuffle(&mut rng);
        let size = fill_team(roster, team.id, &pool).await?;
        if size < SQUAD_SIZE {
            warn!("Team {} only reached {} players", team.name, size);
        }
        teams += 1;
    }

    let sweep = scores.recompute_all().await?;
    Ok(SeedSummary {
        clubs: squads.len(),
        players: players.len(),
        jornadas: jornadas.len(),
        stats: stat_count,
        teams,
        league_id,
        sweep,
    })
}
