use crate::dto::player_dto::{Money, Player, Position};
use crate::dto::team_dto::{
    FormationCounts, PositionLimit, RosterEntry, RosterView, Team, TeamLimits, Zone, BENCH_SIZE, SQUAD_SIZE,
};
use crate::error::{FantasyError, FantasyResult};
use crate::services::placement;

/// One row-level change inside a roster commit.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotWrite {
    Insert { player: Player, on_field: bool },
    Delete { player_id: i64 },
    SetOnField { player_id: i64, on_field: bool },
}

/// Everything a roster mutation writes. Persisted in one transaction, guarded
/// by the team version it was planned against.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterCommit {
    pub team_id: i64,
    pub expected_version: i64,
    pub budget_remaining: Money,
    pub writes: Vec<SlotWrite>,
}

/// A team with its current roster. All validation happens here, without I/O:
/// `plan_*` either refuses or returns the commit that performs the change.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRoster {
    pub team: Team,
    pub entries: Vec<RosterEntry>,
}

impl TeamRoster {
    pub fn new(team: Team, entries: Vec<RosterEntry>) -> Self {
        Self { team, entries }
    }

    pub fn entry(&self, player_id: i64) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.player.id == player_id)
    }

    pub fn counts(&self) -> FormationCounts {
        let mut counts = FormationCounts::default();
        for entry in &self.entries {
            counts.record(entry.player.position, entry.zone());
        }
        counts
    }

    pub fn squad_value(&self) -> Money {
        self.entries.iter().map(|e| e.player.price).sum()
    }

    pub fn on_field_ids(&self) -> Vec<i64> {
        self.entries.iter().filter(|e| e.on_field).map(|e| e.player.id).collect()
    }

    /// `taken_by` is the team currently holding `player`, if any.
    pub fn plan_add(&self, player: &Player, taken_by: Option<i64>) -> FantasyResult<RosterCommit> {
        if self.entry(player.id).is_some() {
            return Err(FantasyError::Duplicate { player_id: player.id });
        }
        if let Some(other) = taken_by {
            if other != self.team.id {
                return Err(FantasyError::PlayerTaken { player_id: player.id });
            }
            return Err(FantasyError::Duplicate { player_id: player.id });
        }

        let budget_remaining = self.team.budget_remaining.checked_sub(player.price).ok_or(
            FantasyError::InsufficientBudget { price: player.price, available: self.team.budget_remaining },
        )?;

        let mut counts = self.counts();
        let position = player.position;
        if counts.total_of(position) + 1 > position.ceiling() {
            return Err(FantasyError::PositionFull { position });
        }

        let zone = placement::place(position, counts.field_of(position), counts.bench_of(position)).ok_or_else(|| {
            FantasyError::ConstraintViolation(format!(
                "no placement for a {} with {} on the field and {} on the bench",
                position,
                counts.field_of(position),
                counts.bench_of(position)
            ))
        })?;
        counts.record(position, zone);
        check_formation(&counts)?;

        Ok(RosterCommit {
            team_id: self.team.id,
            expected_version: self.team.version,
            budget_remaining,
            writes: vec![SlotWrite::Insert { player: player.clone(), on_field: zone.is_field() }],
        })
    }

    /**
     * Removing the last on-field player of an outfield position promotes
     * that position's reserve in the same commit. Removing the bench
     * goalkeeper moves the remaining one to the bench, which keeps the
     * bench slot filled.
     */
    pub fn plan_remove(&self, player_id: i64) -> FantasyResult<RosterCommit> {
        let removed = self
            .entry(player_id)
            .ok_or(FantasyError::NotFound { entity: "roster player", id: player_id })?;
        let position = removed.player.position;

        let mut writes = vec![SlotWrite::Delete { player_id }];
        let mut counts = self.counts();
        match removed.zone() {
            Zone::Field => counts.field[position.index()] -= 1,
            Zone::Bench => counts.bench[position.index()] -= 1,
        }

        if position == Position::Gk {
            if counts.bench_of(position) == 0 && counts.field_of(position) > 0 {
                let keeper = self
                    .entries
                    .iter()
                    .find(|e| e.player.position == position && e.on_field && e.player.id != player_id);
                if let Some(keeper) = keeper {
                    writes.push(SlotWrite::SetOnField { player_id: keeper.player.id, on_field: false });
                    counts.field[position.index()] -= 1;
                    counts.bench[position.index()] += 1;
                }
            }
        } else if counts.field_of(position) == 0 && counts.bench_of(position) > 0 {
            let reserve = self
                .entries
                .iter()
                .filter(|e| e.player.position == position && !e.on_field && e.player.id != player_id)
                .min_by_key(|e| e.player.id);
            if let Some(reserve) = reserve {
                writes.push(SlotWrite::SetOnField { player_id: reserve.player.id, on_field: true });
                counts.bench[position.index()] -= 1;
                counts.field[position.index()] += 1;
            }
        }
        check_formation(&counts)?;

        Ok(RosterCommit {
            team_id: self.team.id,
            expected_version: self.team.version,
            budget_remaining: self.team.budget_remaining + removed.player.price,
            writes,
        })
    }

    pub fn plan_swap(&self, bench_player_id: i64, field_player_id: i64) -> FantasyResult<RosterCommit> {
        let bench = self
            .entry(bench_player_id)
            .ok_or(FantasyError::NotFound { entity: "roster player", id: bench_player_id })?;
        let field = self
            .entry(field_player_id)
            .ok_or(FantasyError::NotFound { entity: "roster player", id: field_player_id })?;

        if bench.zone() != Zone::Bench {
            return Err(FantasyError::InvalidState { player_id: bench_player_id, expected: Zone::Bench });
        }
        if field.zone() != Zone::Field {
            return Err(FantasyError::InvalidState { player_id: field_player_id, expected: Zone::Field });
        }
        if bench.player.position != field.player.position {
            return Err(FantasyError::PositionMismatch {
                bench: bench.player.position,
                field: field.player.position,
            });
        }

        let mut after = self.clone();
        for entry in after.entries.iter_mut() {
            if entry.player.id == bench_player_id {
                entry.on_field = true;
            } else if entry.player.id == field_player_id {
                entry.on_field = false;
            }
        }
        check_formation(&after.counts())?;

        Ok(RosterCommit {
            team_id: self.team.id,
            expected_version: self.team.version,
            budget_remaining: self.team.budget_remaining,
            writes: vec![
                SlotWrite::SetOnField { player_id: bench_player_id, on_field: true },
                SlotWrite::SetOnField { player_id: field_player_id, on_field: false },
            ],
        })
    }

    /// Applies a commit that was planned against this roster.
    pub fn apply(&mut self, commit: &RosterCommit) {
        for write in &commit.writes {
            match write {
                SlotWrite::Insert { player, on_field } => {
                    self.entries.push(RosterEntry { player: player.clone(), on_field: *on_field });
                }
                SlotWrite::Delete { player_id } => self.entries.retain(|e| e.player.id != *player_id),
                SlotWrite::SetOnField { player_id, on_field } => {
                    if let Some(entry) = self.entries.iter_mut().find(|e| e.player.id == *player_id) {
                        entry.on_field = *on_field;
                    }
                }
            }
        }
        self.team.budget_remaining = commit.budget_remaining;
        self.team.version = commit.expected_version + 1;
    }

    pub fn limits(&self) -> TeamLimits {
        let counts = self.counts();
        let total_players = counts.total();
        let room = total_players < SQUAD_SIZE;
        let positions = Position::ALL
            .iter()
            .map(|&position| PositionLimit {
                position,
                on_field: counts.field_of(position),
                on_bench: counts.bench_of(position),
                ceiling: position.ceiling(),
                can_add: room && counts.total_of(position) < position.ceiling(),
            })
            .collect();

        TeamLimits {
            team_id: self.team.id,
            positions,
            total_players,
            budget_remaining: self.team.budget_remaining,
            squad_value: self.squad_value(),
            can_add_player: room,
        }
    }

    pub fn into_view(self) -> RosterView {
        let mut entries = self.entries;
        entries.sort_by(|a, b| {
            a.player
                .position
                .cmp(&b.player.position)
                .then_with(|| a.player.name.cmp(&b.player.name))
                .then_with(|| a.player.id.cmp(&b.player.id))
        });

        let mut view = RosterView {
            team: self.team,
            goalkeepers: Vec::new(),
            defenders: Vec::new(),
            midfielders: Vec::new(),
            forwards: Vec::new(),
        };
        for entry in entries {
            match entry.player.position {
                Position::Gk => view.goalkeepers.push(entry),
                Position::Def => view.defenders.push(entry),
                Position::Mid => view.midfielders.push(entry),
                Position::Fwd => view.forwards.push(entry),
            }
        }
        view
    }
}

/// Checks the per-position rules every committed roster must satisfy.
pub fn check_formation(counts: &FormationCounts) -> FantasyResult<()> {
    let violation = |msg: String| Err(FantasyError::ConstraintViolation(msg));

    if counts.total() > SQUAD_SIZE {
        return violation(format!("roster would hold {} players", counts.total()));
    }
    if counts.bench_total() > BENCH_SIZE {
        return violation(format!("bench would hold {} players", counts.bench_total()));
    }
    for position in Position::ALL {
        let field = counts.field_of(position);
        let bench = counts.bench_of(position);
        if field + bench > position.ceiling() {
            return violation(format!("{} {} players exceed the ceiling", field + bench, position));
        }
        if bench > position.bench_target() {
            return violation(format!("bench would hold {bench} {position} players"));
        }
        if position == Position::Gk {
            if field + bench > 0 && bench != 1 {
                return violation("the bench goalkeeper slot must hold exactly one GK".to_string());
            }
        } else if field + bench > 0 && field == 0 {
            return violation(format!("{position} would have nobody on the field"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::team_dto::INITIAL_BUDGET;
    use proptest::prelude::*;

    fn team() -> Team {
        Team {
            id: 1,
            name: "Os Invencíveis".to_string(),
            owner_id: 7,
            budget_remaining: INITIAL_BUDGET,
            total_points: 0,
            version: 0,
        }
    }

    fn player(id: i64, position: Position, credits: f64) -> Player {
        Player {
            id,
            name: format!("Player {id:02}"),
            position,
            price: Money::from_credits(credits),
            club_id: 1,
        }
    }

    /// Fifteen players worth 90.0 credits, two GK, five DEF, five MID, three FWD.
    fn squad() -> Vec<Player> {
        let mut players = Vec::new();
        let mut id = 1;
        for position in Position::ALL {
            for _ in 0..position.ceiling() {
                players.push(player(id, position, 6.0));
                id += 1;
            }
        }
        players
    }

    fn add(roster: &mut TeamRoster, player: &Player) -> FantasyResult<()> {
        let commit = roster.plan_add(player, None)?;
        roster.apply(&commit);
        Ok(())
    }

    fn assert_budget_invariant(roster: &TeamRoster) {
        assert_eq!(roster.team.budget_remaining, INITIAL_BUDGET - roster.squad_value());
        assert!(roster.team.budget_remaining >= Money::ZERO);
    }

    fn full_roster() -> TeamRoster {
        let mut roster = TeamRoster::new(team(), Vec::new());
        for p in squad() {
            add(&mut roster, &p).unwrap();
        }
        roster
    }

    #[test]
    fn full_roster_has_canonical_split() {
        let roster = full_roster();
        let counts = roster.counts();
        assert_eq!(counts.field, [1, 4, 4, 2]);
        assert_eq!(counts.bench, [1, 1, 1, 1]);
        assert_budget_invariant(&roster);
        assert_eq!(roster.team.budget_remaining, Money::from_credits(10.0));
        assert_eq!(roster.team.version, 15);
    }

    #[test]
    fn first_goalkeeper_goes_to_the_bench() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        add(&mut roster, &player(1, Position::Gk, 5.0)).unwrap();
        assert!(!roster.entry(1).unwrap().on_field);
        add(&mut roster, &player(2, Position::Gk, 5.0)).unwrap();
        assert!(roster.entry(2).unwrap().on_field);
    }

    #[test]
    fn first_outfield_player_plays_second_waits() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        add(&mut roster, &player(3, Position::Fwd, 5.0)).unwrap();
        add(&mut roster, &player(4, Position::Fwd, 5.0)).unwrap();
        add(&mut roster, &player(5, Position::Fwd, 5.0)).unwrap();
        assert!(roster.entry(3).unwrap().on_field);
        assert!(!roster.entry(4).unwrap().on_field);
        assert!(roster.entry(5).unwrap().on_field);
    }

    #[test]
    fn duplicate_is_refused_before_budget() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        let star = player(1, Position::Mid, 60.0);
        add(&mut roster, &star).unwrap();
        let err = roster.plan_add(&star, Some(1)).unwrap_err();
        assert!(matches!(err, FantasyError::Duplicate { player_id: 1 }));
    }

    #[test]
    fn player_owned_elsewhere_is_taken() {
        let roster = TeamRoster::new(team(), Vec::new());
        let err = roster.plan_add(&player(9, Position::Def, 4.0), Some(2)).unwrap_err();
        assert!(matches!(err, FantasyError::PlayerTaken { player_id: 9 }));
    }

    #[test]
    fn insufficient_budget_only_when_price_exceeds_remaining() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        add(&mut roster, &player(1, Position::Mid, 60.0)).unwrap();

        let exact = player(2, Position::Mid, 40.0);
        assert!(roster.plan_add(&exact, None).is_ok());

        let over = player(3, Position::Mid, 40.01);
        let err = roster.plan_add(&over, None).unwrap_err();
        assert!(matches!(err, FantasyError::InsufficientBudget { .. }));

        add(&mut roster, &exact).unwrap();
        assert_eq!(roster.team.budget_remaining, Money::ZERO);
        let free = player(4, Position::Def, 0.0);
        assert!(roster.plan_add(&free, None).is_ok());
    }

    #[test]
    fn position_full_at_each_ceiling() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        let mut id = 100;
        for position in Position::ALL {
            for _ in 0..position.ceiling() {
                add(&mut roster, &player(id, position, 1.0)).unwrap();
                id += 1;
            }
            let err = roster.plan_add(&player(id, position, 1.0), None).unwrap_err();
            assert!(matches!(err, FantasyError::PositionFull { position: p } if p == position));
            id += 1;
        }
        assert_eq!(roster.counts().total(), SQUAD_SIZE);
    }

    #[test]
    fn remove_refunds_price() {
        let mut roster = full_roster();
        let commit = roster.plan_remove(9).unwrap();
        roster.apply(&commit);
        assert!(roster.entry(9).is_none());
        assert_budget_invariant(&roster);
        assert_eq!(roster.team.budget_remaining, Money::from_credits(16.0));
    }

    #[test]
    fn remove_unknown_player_is_not_found() {
        let roster = full_roster();
        assert!(matches!(
            roster.plan_remove(999).unwrap_err(),
            FantasyError::NotFound { id: 999, .. }
        ));
    }

    #[test]
    fn removing_last_field_player_promotes_the_reserve() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        add(&mut roster, &player(1, Position::Def, 5.0)).unwrap();
        add(&mut roster, &player(2, Position::Def, 5.0)).unwrap();
        assert!(roster.entry(1).unwrap().on_field);
        assert!(!roster.entry(2).unwrap().on_field);

        let commit = roster.plan_remove(1).unwrap();
        assert_eq!(commit.writes.len(), 2);
        roster.apply(&commit);
        assert!(roster.entry(2).unwrap().on_field);
        assert!(check_formation(&roster.counts()).is_ok());
    }

    #[test]
    fn removing_the_bench_goalkeeper_benches_the_other() {
        let mut roster = full_roster();
        assert!(!roster.entry(1).unwrap().on_field);
        assert!(roster.entry(2).unwrap().on_field);

        let commit = roster.plan_remove(1).unwrap();
        assert_eq!(
            commit.writes,
            vec![SlotWrite::Delete { player_id: 1 }, SlotWrite::SetOnField { player_id: 2, on_field: false }]
        );
        roster.apply(&commit);
        assert_eq!(roster.counts().bench_of(Position::Gk), 1);
        assert_eq!(roster.counts().field_of(Position::Gk), 0);
        assert_budget_invariant(&roster);

        add(&mut roster, &squad()[0]).unwrap();
        assert!(roster.entry(1).unwrap().on_field);
        assert_eq!(roster.counts().field, [1, 4, 4, 2]);
        assert_eq!(roster.counts().bench, [1, 1, 1, 1]);
    }

    #[test]
    fn removing_the_field_goalkeeper_leaves_the_bench_alone() {
        let mut roster = full_roster();
        let commit = roster.plan_remove(2).unwrap();
        assert_eq!(commit.writes, vec![SlotWrite::Delete { player_id: 2 }]);
        roster.apply(&commit);
        assert_eq!(roster.counts().bench_of(Position::Gk), 1);
    }

    #[test]
    fn goalkeeper_without_the_bench_slot_is_refused() {
        let mut counts = FormationCounts::default();
        counts.record(Position::Gk, Zone::Field);
        assert!(matches!(check_formation(&counts), Err(FantasyError::ConstraintViolation(_))));
        counts.record(Position::Gk, Zone::Bench);
        assert!(check_formation(&counts).is_ok());
    }

    #[test]
    fn refill_after_removal_converges_again() {
        let mut roster = full_roster();
        for id in [1, 2, 3, 8, 13, 14] {
            let commit = roster.plan_remove(id).unwrap();
            roster.apply(&commit);
            assert!(check_formation(&roster.counts()).is_ok());
        }
        for p in squad().into_iter().filter(|p| [1, 2, 3, 8, 13, 14].contains(&p.id)) {
            add(&mut roster, &p).unwrap();
        }
        assert_eq!(roster.counts().field, [1, 4, 4, 2]);
        assert_eq!(roster.counts().bench, [1, 1, 1, 1]);
    }

    #[test]
    fn swap_requires_stated_zones() {
        let roster = full_roster();
        let bench_def = roster.entries.iter().find(|e| e.player.position == Position::Def && !e.on_field).unwrap();
        let field_def = roster.entries.iter().find(|e| e.player.position == Position::Def && e.on_field).unwrap();

        let err = roster.plan_swap(field_def.player.id, field_def.player.id).unwrap_err();
        assert!(matches!(err, FantasyError::InvalidState { expected: Zone::Bench, .. }));

        let err = roster.plan_swap(bench_def.player.id, bench_def.player.id).unwrap_err();
        assert!(matches!(err, FantasyError::InvalidState { expected: Zone::Field, .. }));
    }

    #[test]
    fn swap_across_positions_is_a_mismatch() {
        let roster = full_roster();
        let bench_gk = roster.entries.iter().find(|e| e.player.position == Position::Gk && !e.on_field).unwrap();
        for position in [Position::Def, Position::Mid, Position::Fwd] {
            let field = roster.entries.iter().find(|e| e.player.position == position && e.on_field).unwrap();
            let err = roster.plan_swap(bench_gk.player.id, field.player.id).unwrap_err();
            assert!(matches!(err, FantasyError::PositionMismatch { bench: Position::Gk, field: p } if p == position));
        }
    }

    #[test]
    fn swap_then_swap_back_restores_assignment() {
        let original = full_roster();
        let mut roster = original.clone();
        let bench_mid = roster.entries.iter().find(|e| e.player.position == Position::Mid && !e.on_field).unwrap().player.id;
        let field_mid = roster.entries.iter().find(|e| e.player.position == Position::Mid && e.on_field).unwrap().player.id;

        let commit = roster.plan_swap(bench_mid, field_mid).unwrap();
        assert_eq!(commit.budget_remaining, original.team.budget_remaining);
        roster.apply(&commit);
        assert!(roster.entry(bench_mid).unwrap().on_field);
        assert!(!roster.entry(field_mid).unwrap().on_field);
        assert_eq!(roster.counts(), original.counts());

        let commit = roster.plan_swap(field_mid, bench_mid).unwrap();
        roster.apply(&commit);
        assert_eq!(roster.entries, original.entries);
        assert_eq!(roster.team.budget_remaining, original.team.budget_remaining);
    }

    #[test]
    fn goalkeeper_swap_keeps_one_on_the_bench() {
        let mut roster = full_roster();
        let commit = roster.plan_swap(1, 2).unwrap();
        roster.apply(&commit);
        assert_eq!(roster.counts().bench_of(Position::Gk), 1);
        assert_eq!(roster.counts().field_of(Position::Gk), 1);
    }

    #[test]
    fn swap_refuses_to_commit_a_broken_formation() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        roster.entries.push(RosterEntry { player: player(1, Position::Def, 1.0), on_field: true });
        roster.entries.push(RosterEntry { player: player(2, Position::Def, 1.0), on_field: false });
        roster.entries.push(RosterEntry { player: player(3, Position::Def, 1.0), on_field: false });
        let err = roster.plan_swap(2, 1).unwrap_err();
        assert!(matches!(err, FantasyError::ConstraintViolation(_)));
    }

    #[test]
    fn limits_report_counts_and_flags() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        add(&mut roster, &player(1, Position::Gk, 4.5)).unwrap();
        add(&mut roster, &player(2, Position::Gk, 4.0)).unwrap();
        add(&mut roster, &player(3, Position::Fwd, 10.0)).unwrap();

        let limits = roster.limits();
        assert_eq!(limits.total_players, 3);
        assert_eq!(limits.budget_remaining, Money::from_credits(81.5));
        assert_eq!(limits.squad_value, Money::from_credits(18.5));
        assert!(limits.can_add_player);
        let gk = limits.for_position(Position::Gk).unwrap();
        assert_eq!((gk.on_field, gk.on_bench, gk.can_add), (1, 1, false));
        let fwd = limits.for_position(Position::Fwd).unwrap();
        assert_eq!((fwd.on_field, fwd.on_bench, fwd.can_add), (1, 0, true));

        let full = full_roster().limits();
        assert!(!full.can_add_player);
        assert!(full.positions.iter().all(|p| !p.can_add));
    }

    #[test]
    fn view_groups_by_position_and_sorts_by_name() {
        let mut roster = TeamRoster::new(team(), Vec::new());
        let mut ze = player(1, Position::Mid, 3.0);
        ze.name = "Zé".to_string();
        let mut abel = player(2, Position::Mid, 3.0);
        abel.name = "Abel".to_string();
        add(&mut roster, &ze).unwrap();
        add(&mut roster, &abel).unwrap();
        add(&mut roster, &player(3, Position::Gk, 3.0)).unwrap();

        let view = roster.into_view();
        assert_eq!(view.goalkeepers.len(), 1);
        let names: Vec<&str> = view.midfielders.iter().map(|e| e.player.name.as_str()).collect();
        assert_eq!(names, vec!["Abel", "Zé"]);
        assert!(view.defenders.is_empty() && view.forwards.is_empty());
    }

    proptest! {
        #[test]
        fn any_fill_order_converges(order in Just(squad()).prop_shuffle()) {
            let mut roster = TeamRoster::new(team(), Vec::new());
            for p in &order {
                add(&mut roster, p).unwrap();
                prop_assert!(check_formation(&roster.counts()).is_ok());
                assert_budget_invariant(&roster);
            }
            let counts = roster.counts();
            prop_assert_eq!(counts.field, [1, 4, 4, 2]);
            prop_assert_eq!(counts.bench, [1, 1, 1, 1]);
        }

        #[test]
        fn removals_then_refill_converge(
            order in Just(squad()).prop_shuffle(),
            drop in proptest::collection::vec(1i64..=15, 0..10),
        ) {
            let mut roster = TeamRoster::new(team(), Vec::new());
            for p in &order {
                add(&mut roster, p).unwrap();
            }
            for id in &drop {
                if let Ok(commit) = roster.plan_remove(*id) {
                    roster.apply(&commit);
                    let counts = roster.counts();
                    prop_assert!(check_formation(&counts).is_ok());
                    if counts.total_of(Position::Gk) > 0 {
                        prop_assert_eq!(counts.bench_of(Position::Gk), 1);
                    }
                    assert_budget_invariant(&roster);
                }
            }
            for p in &order {
                if roster.entry(p.id).is_none() {
                    add(&mut roster, p).unwrap();
                }
            }
            prop_assert_eq!(roster.counts().field, [1, 4, 4, 2]);
            prop_assert_eq!(roster.counts().bench, [1, 1, 1, 1]);
        }
    }
}
