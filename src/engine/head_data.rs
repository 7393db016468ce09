use super::types::{GuessPoint, Outcome};
use crate::geometry::{Footprint, Orientation, Plane, Point};

/// One candidate orientation rooted at a confirmed head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationHypothesis {
    plane: Plane,
    discarded: bool,
    // Body cells (head excluded) not yet proven hit, in footprint order.
    untested: Vec<Point>,
}

impl OrientationHypothesis {
    fn new(plane: Plane, footprint: &Footprint, discarded: bool) -> Self {
        Self {
            plane,
            discarded,
            untested: footprint.body(plane).collect(),
        }
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    pub fn untested(&self) -> &[Point] {
        &self.untested
    }

    fn is_complete(&self) -> bool {
        !self.discarded && self.untested.is_empty()
    }

    fn update(&mut self, gp: &GuessPoint) {
        if self.discarded {
            return;
        }

        let Some(idx) = self.untested.iter().position(|&p| p == gp.point()) else {
            return;
        };

        match gp.outcome {
            // A dead on the first outstanding cell is a consistency removal.
            Outcome::Dead if idx == 0 => {
                self.untested.remove(idx);
            }
            Outcome::Miss | Outcome::Dead => self.discarded = true,
            Outcome::Hit => {
                self.untested.remove(idx);
            }
        }
    }
}

/// Tracks which orientations remain possible for one confirmed head.
///
/// Lives while unresolved. Once an orientation is determined the record is
/// inert and the owner converts it into a confirmed [`Plane`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadData {
    head: Point,
    options: [OrientationHypothesis; Orientation::COUNT],
    resolved: Option<Orientation>,
}

impl HeadData {
    /// Orientations that do not fit the grid start discarded.
    pub fn new(head: Point, rows: i32, cols: i32, footprint: &Footprint) -> Self {
        let options = Orientation::ALL.map(|o| {
            let plane = Plane::at(head, o);
            OrientationHypothesis::new(plane, footprint, !footprint.fits(plane, rows, cols))
        });
        Self {
            head,
            options,
            resolved: None,
        }
    }

    /// Builds the record and replays the evidence gathered so far.
    pub fn with_history(
        head: Point,
        rows: i32,
        cols: i32,
        footprint: &Footprint,
        evidence: &[GuessPoint],
    ) -> Self {
        let mut hd = Self::new(head, rows, cols, footprint);
        for gp in evidence {
            hd.update(gp);
        }
        hd
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn hypotheses(&self) -> &[OrientationHypothesis] {
        &self.options
    }

    pub fn hypothesis(&self, orientation: Orientation) -> &OrientationHypothesis {
        &self.options[orientation.index()]
    }

    pub fn resolved(&self) -> Option<Orientation> {
        self.resolved
    }

    pub fn remaining(&self) -> usize {
        self.options.iter().filter(|o| !o.discarded).count()
    }

    /// Every orientation was ruled out. Only happens on inconsistent data.
    pub fn is_contradicted(&self) -> bool {
        self.remaining() == 0
    }

    /// Feeds a probe to every live hypothesis and returns the resolved
    /// orientation, if any. A resolved record ignores further updates.
    pub fn update(&mut self, gp: &GuessPoint) -> Option<Orientation> {
        if self.resolved.is_some() {
            return self.resolved;
        }

        for opt in &mut self.options {
            opt.update(gp);
        }

        if let Some(done) = self.options.iter().find(|o| o.is_complete()) {
            self.resolved = Some(done.plane.orientation);
            return self.resolved;
        }

        let discarded = Orientation::COUNT - self.remaining();
        if discarded == Orientation::COUNT - 1 {
            self.resolved = self
                .options
                .iter()
                .find(|o| !o.discarded)
                .map(|o| o.plane.orientation);
        }
        self.resolved
    }

    /// Consumes a resolved record into its plane. Unresolved records are
    /// handed back unchanged.
    pub fn into_plane(self) -> Result<Plane, Self> {
        match self.resolved {
            Some(o) => Ok(Plane::at(self.head, o)),
            None => Err(self),
        }
    }
}
