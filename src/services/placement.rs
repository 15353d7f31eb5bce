use crate::dto::player_dto::Position;
use crate::dto::team_dto::Zone;

/// Largest per-position on-field count any table needs to index.
const MAX_FIELD: usize = 5;

/// Indexed as `[bench][field]` with the position's current counts.
/// `None` marks a count pair where no further player of the position fits.
type PlacementTable = [[Option<Zone>; MAX_FIELD + 1]; 2];

const F: Option<Zone> = Some(Zone::Field);
const B: Option<Zone> = Some(Zone::Bench);
const X: Option<Zone> = None;

/// Goalkeepers fill the bench slot first, the second one plays. A goalkeeper
/// never stands on the field with the bench slot empty.
const GOALKEEPERS: PlacementTable = [
    [B, X, X, X, X, X],
    [F, X, X, X, X, X],
];

/// Defenders and midfielders: first one plays, second one is the reserve.
const FIVE_DEEP: PlacementTable = [
    [F, B, B, B, B, X],
    [F, F, F, F, X, X],
];

const FORWARDS: PlacementTable = [
    [F, B, B, X, X, X],
    [F, F, X, X, X, X],
];

fn table_for(position: Position) -> &'static PlacementTable {
    match position {
        Position::Gk => &GOALKEEPERS,
        Position::Def | Position::Mid => &FIVE_DEEP,
        Position::Fwd => &FORWARDS,
    }
}

/**
 * Where a new player of `position` goes, given how many players of that
 * position are already on the field and on the bench.
 *
 * Bench targets are one per position and add up to the bench size, so a
 * `Bench` answer never overflows the bench.
 */
pub fn place(position: Position, field: usize, bench: usize) -> Option<Zone> {
    table_for(position)
        .get(bench)
        .and_then(|row| row.get(field))
        .copied()
        .flatten()
}
