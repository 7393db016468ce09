use super::choice_map::{Choice, ChoiceMap};
use super::head_data::HeadData;
use crate::config::SelectorWeights;
use crate::geometry::Point;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    SeekHead,
    CompleteOrientation,
    Explore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub point: Point,
    pub strategy: Strategy,
}

/// Blends the three heuristics into one weighted random choice.
/// Reads the belief state only; the random source is the sole thing it mutates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSelector {
    weights: SelectorWeights,
}

impl MoveSelector {
    pub fn new(weights: SelectorWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> SelectorWeights {
        self.weights
    }

    pub fn select(&self, map: &ChoiceMap, heads: &[HeadData], rng: &mut Rng) -> Option<Move> {
        // All three are evaluated before the roll so the draw order is fixed.
        let head = seek_head(map, rng)?;
        let completion = complete_orientation(heads, rng);
        let explore = explore(map, rng);

        let roll = rng.u32(0..100);
        let w = &self.weights;

        let pick = |point, strategy| Some(Move { point, strategy });

        match (completion, explore) {
            (Some(c), Some(e)) => {
                if roll < w.mix_head_all {
                    pick(head, Strategy::SeekHead)
                } else if roll < w.mix_directed_all() {
                    pick(c, Strategy::CompleteOrientation)
                } else {
                    pick(e, Strategy::Explore)
                }
            }
            (None, Some(e)) => {
                if roll < w.mix_head_pair {
                    pick(head, Strategy::SeekHead)
                } else {
                    pick(e, Strategy::Explore)
                }
            }
            (Some(c), None) => {
                if roll < w.mix_head_pair {
                    pick(head, Strategy::SeekHead)
                } else {
                    pick(c, Strategy::CompleteOrientation)
                }
            }
            (None, None) => pick(head, Strategy::SeekHead),
        }
    }
}

/// Head of a uniformly chosen candidate among those with the highest score.
/// Fails when no candidate is viable.
pub fn seek_head(map: &ChoiceMap, rng: &mut Rng) -> Option<Point> {
    let mut best = i64::MIN;
    let mut tied: Vec<usize> = Vec::new();

    for (idx, choice) in map.as_slice().iter().enumerate() {
        let score = choice.raw();
        if score > best {
            best = score;
            tied.clear();
            tied.push(idx);
        } else if score == best {
            tied.push(idx);
        }
    }

    if best < 0 || tied.is_empty() {
        return None;
    }

    let idx = tied[rng.usize(0..tied.len())];
    Some(map.space().head_at(idx))
}

/// Picks a random active head, then an untested cell of its live orientation
/// with the most untested cells (first found wins ties).
pub fn complete_orientation(heads: &[HeadData], rng: &mut Rng) -> Option<Point> {
    if heads.is_empty() {
        return None;
    }

    let hd = &heads[rng.usize(0..heads.len())];
    let mut best: Option<&[Point]> = None;
    for opt in hd.hypotheses().iter().filter(|o| !o.is_discarded()) {
        let untested = opt.untested();
        if untested.len() > best.map_or(0, |b| b.len()) {
            best = Some(untested);
        }
    }

    let cells = best?;
    Some(cells[rng.usize(0..cells.len())])
}

/// Scans circularly from a random start for a candidate with no evidence at all.
pub fn explore(map: &ChoiceMap, rng: &mut Rng) -> Option<Point> {
    let len = map.len();
    if len == 0 {
        return None;
    }

    let start = rng.usize(0..len);
    (0..len)
        .map(|k| (start + k) % len)
        .find(|&idx| map.get(idx) == Choice::Heat(0))
        .map(|idx| map.space().head_at(idx))
}
