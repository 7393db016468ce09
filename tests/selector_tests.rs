use fastrand::Rng;
use planeforge::config::SelectorWeights;
use planeforge::engine::selector::{complete_orientation, explore, seek_head};
use planeforge::engine::{
    CandidateSpace, Choice, ChoiceMap, GuessPoint, HeadData, MoveSelector, Outcome, Strategy,
};
use planeforge::geometry::{Footprint, Point};
use rstest::rstest;

mod common;
use common::{probe, EngineBuilder, DOMINO, L_SHAPE};

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(99)]
fn test_seek_head_picks_hottest_candidate(#[case] seed: u64) {
    let mut engine = EngineBuilder::new(3, 3).shape(DOMINO).build();
    probe(&mut engine, 1, 1, Outcome::Hit);

    let mut rng = Rng::with_seed(seed);
    let head = seek_head(engine.choice_map(), &mut rng).unwrap();
    let hottest = [
        Point::new(0, 1),
        Point::new(2, 1),
        Point::new(1, 0),
        Point::new(1, 2),
    ];
    assert!(hottest.contains(&head), "{} is not a hottest head", head);
}

#[test]
fn test_seek_head_fails_on_exhausted_map() {
    let mut engine = EngineBuilder::new(1, 1).shape("").build();
    // The classic plane never fits a single cell.
    assert!(engine.choice_map().as_slice().iter().all(|c| *c == Choice::Eliminated));
    assert_eq!(engine.select_move(), None);

    let single = Footprint::new(vec![Point::new(0, 0)]).unwrap();
    let mut engine = EngineBuilder::new(1, 1).footprint(single).build();
    assert_eq!(engine.select_move(), Some(Point::new(0, 0)));
    probe(&mut engine, 0, 0, Outcome::Miss);
    assert_eq!(engine.select_move(), None);
}

#[rstest]
#[case(5)]
#[case(17)]
#[case(123)]
fn test_explore_returns_untouched_candidate(#[case] seed: u64) {
    let mut engine = EngineBuilder::new(3, 3).shape(DOMINO).build();
    probe(&mut engine, 1, 1, Outcome::Hit);

    let mut rng = Rng::with_seed(seed);
    let head = explore(engine.choice_map(), &mut rng).unwrap();
    let map = engine.choice_map();
    let heads = map.space().heads_at(head).unwrap();
    assert!(heads.iter().any(|&idx| map.get(idx) == Choice::Heat(0)));
}

#[test]
fn test_explore_fails_without_zero_heat() {
    let fp = Footprint::new(vec![Point::new(0, 0)]).unwrap();
    let mut map = ChoiceMap::new(CandidateSpace::new(1, 2), &fp);
    let mut rng = Rng::with_seed(1);
    assert!(explore(&map, &mut rng).is_some());

    for col in 0..2 {
        map.apply(&GuessPoint::new(0, col, Outcome::Miss), &fp);
    }
    assert_eq!(explore(&map, &mut rng), None);
}

#[test]
fn test_completion_targets_longest_untested_set() {
    let fp = Footprint::parse(DOMINO).unwrap();
    let mut rng = Rng::with_seed(7);
    assert_eq!(complete_orientation(&[], &mut rng), None);

    // From the corner only "down" and "right" fit.
    let hd = HeadData::new(Point::new(0, 0), 4, 4, &fp);
    let cell = complete_orientation(&[hd], &mut rng).unwrap();
    // All live sets have one cell; the first orientation wins the tie.
    assert_eq!(cell, Point::new(1, 0));
}

#[rstest]
#[case(1)]
#[case(8)]
#[case(64)]
fn test_completion_prefers_orientation_with_most_untested(#[case] seed: u64) {
    let fp = Footprint::parse(L_SHAPE).unwrap();
    let head = Point::new(2, 2);
    let mut hd = HeadData::new(head, 5, 5, &fp);
    assert_eq!(hd.remaining(), 4);

    // The cell right next to the head belongs to the first orientation only.
    let first = hd.hypotheses()[0].clone();
    let adjacent = *first
        .untested()
        .iter()
        .find(|p| (p.row - head.row).abs() + (p.col - head.col).abs() == 1)
        .unwrap();
    assert_eq!(hd.update(&GuessPoint::at(adjacent, Outcome::Hit)), None);

    let sizes: Vec<usize> = hd.hypotheses().iter().map(|h| h.untested().len()).collect();
    assert_eq!(sizes, vec![2, 3, 3, 3]);

    let mut rng = Rng::with_seed(seed);
    let cell = complete_orientation(&[hd.clone()], &mut rng).unwrap();
    assert!(hd.hypotheses()[1].untested().contains(&cell), "{} is not in the longest set", cell);
    assert!(!hd.hypotheses()[0].untested().contains(&cell));
}

#[test]
fn test_zero_weights_always_explore_before_any_head() {
    let mut engine = EngineBuilder::new(10, 10).weights(0, 0, 0).build();
    for _ in 0..10 {
        let mv = engine.select_move_detailed().unwrap();
        assert_eq!(mv.strategy, Strategy::Explore);
    }
}

#[test]
fn test_full_head_weight_always_seeks_head() {
    let mut engine = EngineBuilder::new(10, 10).weights(100, 0, 100).build();
    probe(&mut engine, 5, 5, Outcome::Dead);
    for _ in 0..10 {
        let mv = engine.select_move_detailed().unwrap();
        assert_eq!(mv.strategy, Strategy::SeekHead);
    }
}

#[test]
fn test_full_completion_weight_targets_active_head() {
    let mut engine = EngineBuilder::new(10, 10).weights(0, 100, 0).build();
    probe(&mut engine, 5, 5, Outcome::Dead);

    let hd = engine.head_data()[0].clone();
    for _ in 0..10 {
        let mv = engine.select_move_detailed().unwrap();
        assert_eq!(mv.strategy, Strategy::CompleteOrientation);
        assert!(hd
            .hypotheses()
            .iter()
            .any(|h| h.untested().contains(&mv.point)));
    }
}

#[test]
fn test_same_seed_same_moves() {
    let moves = |seed| {
        let mut engine = EngineBuilder::new(10, 10).seed(seed).build();
        probe(&mut engine, 3, 3, Outcome::Hit);
        (0..20)
            .map(|_| engine.select_move_detailed().unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(moves(2024), moves(2024));
}

#[test]
fn test_selector_exposes_weights() {
    let w = SelectorWeights::default();
    assert_eq!(MoveSelector::new(w).weights(), w);
    assert_eq!(w.mix_explore_all(), 10);
}
