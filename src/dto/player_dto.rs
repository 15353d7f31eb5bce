use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// Playing position. Declaration order is the display order (GK first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Position {
    Gk,
    Def,
    Mid,
    Fwd,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Gk, Position::Def, Position::Mid, Position::Fwd];

    pub fn index(self) -> usize {
        match self {
            Position::Gk => 0,
            Position::Def => 1,
            Position::Mid => 2,
            Position::Fwd => 3,
        }
    }

    /// Maximum number of players of this position on one roster.
    pub fn ceiling(self) -> usize {
        match self {
            Position::Gk => 2,
            Position::Def => 5,
            Position::Mid => 5,
            Position::Fwd => 3,
        }
    }

    /// Bench slots reserved for this position on a full roster.
    pub fn bench_target(self) -> usize {
        1
    }

    /// On-field count of this position on a full roster.
    pub fn field_target(self) -> usize {
        self.ceiling() - self.bench_target()
    }

    /// Goalkeepers and defenders lose points for goals conceded.
    pub fn concedes(self) -> bool {
        matches!(self, Position::Gk | Position::Def)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Position::Gk => "GK",
            Position::Def => "DEF",
            Position::Mid => "MID",
            Position::Fwd => "FWD",
        };
        f.write_str(label)
    }
}

/// Amount of credits, stored as integer hundredths so budget arithmetic is exact.
///
/// Serialized as a decimal number of credits (`100.0`), stored in SQLite as
/// the integer number of hundredths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn from_credits(credits: f64) -> Self {
        Money((credits * 100.0).round() as i64)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn as_credits(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        let rest = self.0 - other.0;
        (rest >= 0).then_some(Money(rest))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_credits())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let credits = f64::deserialize(deserializer)?;
        Ok(Money::from_credits(credits))
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: Position,
    pub price: Money,
    pub club_id: i64,
}

/// The catalog split by position, GK first.
#[derive(Debug, Serialize, Default)]
pub struct PlayersByPosition {
    pub goalkeepers: Vec<Player>,
    pub defenders: Vec<Player>,
    pub midfielders: Vec<Player>,
    pub forwards: Vec<Player>,
}

impl PlayersByPosition {
    pub fn push(&mut self, player: Player) {
        self.bucket_mut(player.position).push(player);
    }

    pub fn bucket_mut(&mut self, position: Position) -> &mut Vec<Player> {
        match position {
            Position::Gk => &mut self.goalkeepers,
            Position::Def => &mut self.defenders,
            Position::Mid => &mut self.midfielders,
            Position::Fwd => &mut self.forwards,
        }
    }

    pub fn bucket(&self, position: Position) -> &[Player] {
        match position {
            Position::Gk => &self.goalkeepers,
            Position::Def => &self.defenders,
            Position::Mid => &self.midfielders,
            Position::Fwd => &self.forwards,
        }
    }
}
