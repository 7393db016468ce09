use fastrand::Rng;
use planeforge::board::{Board, PlaneSource};
use planeforge::engine::{
    CandidateSpace, Choice, ChoiceMap, Engine, GuessPoint, HeadData, Outcome, ReplayEngine,
};
use planeforge::geometry::{Footprint, Point};
use proptest::prelude::*;

mod common;
use common::EngineBuilder;

// --- STRATEGIES ---

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Hit), Just(Outcome::Miss), Just(Outcome::Dead)]
}

prop_compose! {
    fn arb_probes(rows: i32, cols: i32, max: usize)(
        probes in prop::collection::vec((0..rows, 0..cols, arb_outcome()), 0..max)
    ) -> Vec<GuessPoint> {
        probes
            .into_iter()
            .map(|(r, c, o)| GuessPoint::new(r, c, o))
            .collect()
    }
}

fn engine_after(probes: &[GuessPoint]) -> Engine {
    let mut engine = EngineBuilder::new(8, 8).planes(2).shape("1:0;2:0;1:1").build();
    for gp in probes {
        engine.submit(*gp).unwrap();
    }
    engine
}

/// A self-play prefix against a consistent board.
fn played(seed: u64, moves: usize) -> ReplayEngine {
    let mut rng = Rng::with_seed(seed);
    let board = Board::random(10, 10, 3, Footprint::classic(), &mut rng).unwrap();
    let mut game = ReplayEngine::new(EngineBuilder::new(10, 10).planes(3).seed(seed).build());
    for _ in 0..moves {
        let Some(p) = game.select_move() else {
            break;
        };
        game.submit(GuessPoint::at(p, board.probe(p))).unwrap();
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_initial_map_matches_grid_fit(rows in 1i32..12, cols in 1i32..12) {
        let fp = Footprint::classic();
        let map = ChoiceMap::new(CandidateSpace::new(rows, cols), &fp);
        for (idx, choice) in map.as_slice().iter().enumerate() {
            let pl = map.space().plane_at(idx);
            if fp.fits(pl, rows, cols) {
                prop_assert_eq!(*choice, Choice::Heat(0));
            } else {
                prop_assert_eq!(*choice, Choice::Eliminated);
            }
        }
    }

    #[test]
    fn prop_miss_leaves_no_viable_cover(
        probes in arb_probes(8, 8, 20),
        r in 0i32..8,
        c in 0i32..8,
    ) {
        let mut engine = engine_after(&probes);
        prop_assume!(engine.probed(r, c).is_none());
        engine.submit_probe(r, c, Outcome::Miss).unwrap();

        let map = engine.choice_map();
        for pl in engine.footprint().planes_through(Point::new(r, c)) {
            if let Some(choice) = map.get_plane(pl) {
                prop_assert!(!choice.is_viable(), "{} survived a miss", pl);
            }
        }
    }

    #[test]
    fn prop_dead_leaves_no_viable_cover(
        probes in arb_probes(8, 8, 20),
        r in 0i32..8,
        c in 0i32..8,
    ) {
        let mut engine = engine_after(&probes);
        prop_assume!(engine.probed(r, c).is_none());
        engine.submit_probe(r, c, Outcome::Dead).unwrap();

        let target = Point::new(r, c);
        let map = engine.choice_map();
        for pl in engine.footprint().planes_through(target) {
            if let Some(choice) = map.get_plane(pl) {
                if pl.is_head(target) {
                    prop_assert_eq!(choice, Choice::Consumed);
                } else {
                    prop_assert!(!choice.is_viable(), "{} survived a dead", pl);
                }
            }
        }
    }

    #[test]
    fn prop_hit_adds_exactly_one(
        probes in arb_probes(8, 8, 20),
        r in 0i32..8,
        c in 0i32..8,
    ) {
        let mut engine = engine_after(&probes);
        prop_assume!(engine.probed(r, c).is_none());
        // A hit that confirms a plane also applies synthetic misses.
        prop_assume!(engine.head_data().is_empty());

        let before = engine.choice_map().clone();
        engine.submit_probe(r, c, Outcome::Hit).unwrap();
        let after = engine.choice_map();
        let target = Point::new(r, c);
        let fp = engine.footprint();

        for idx in 0..before.len() {
            let pl = before.space().plane_at(idx);
            match (before.get(idx), after.get(idx)) {
                (_, Choice::Consumed) if pl.is_head(target) => {}
                (Choice::Heat(n), Choice::Heat(m)) if fp.contains_point(pl, target) => {
                    prop_assert_eq!(m, n + 1);
                }
                (b, a) => prop_assert_eq!(b, a),
            }
        }
    }

    #[test]
    fn prop_repeated_probe_is_idempotent(probes in arb_probes(8, 8, 30)) {
        let once = engine_after(&probes);
        let mut doubled = probes.clone();
        doubled.extend(probes.iter().copied());
        let twice = engine_after(&doubled);

        prop_assert_eq!(once.choice_map(), twice.choice_map());
        prop_assert_eq!(once.confirmed(), twice.confirmed());
        prop_assert_eq!(once.guesses(), twice.guesses());
    }

    #[test]
    fn prop_resolution_is_final(probes in arb_probes(6, 6, 40)) {
        let fp = Footprint::parse("1:0;2:0;1:1").unwrap();
        let mut hd = HeadData::new(Point::new(2, 2), 6, 6, &fp);
        let mut first = None;
        for gp in &probes {
            let now = hd.update(gp);
            if first.is_none() {
                first = now;
            }
            prop_assert_eq!(now, first.or(now));
            if let Some(o) = first {
                prop_assert_eq!(hd.resolved(), Some(o));
            }
        }
    }

    #[test]
    fn prop_consistent_play_never_contradicts(seed in 0u64..10_000, moves in 1usize..80) {
        let game = played(seed, moves);
        for hd in game.engine().head_data() {
            prop_assert!(hd.remaining() >= 1, "head {} contradicted", hd.head());
        }
    }

    #[test]
    fn prop_revert_advance_roundtrip(seed in 0u64..10_000, moves in 1usize..60, k in 0usize..60) {
        let mut game = played(seed, moves);
        let scores = game.engine().choice_map().raw_scores();
        let confirmed = game.engine().confirmed().to_vec();
        let end = game.cursor();
        let k = k.min(end);

        game.revert(k).unwrap();
        for _ in 0..k {
            game.advance().unwrap();
        }

        prop_assert_eq!(game.cursor(), end);
        prop_assert_eq!(game.engine().choice_map().raw_scores(), scores);
        prop_assert_eq!(game.engine().confirmed(), confirmed.as_slice());
    }
}
