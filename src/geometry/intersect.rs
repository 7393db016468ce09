use super::{Footprint, Orientation, Plane, Point};

/// Iterates every `(head, orientation)` whose footprint covers a target point.
///
/// For each orientation and each footprint offset the head is the target
/// minus that offset, so the count is always `4 * footprint.len()`.
/// No grid bounds are applied here.
pub struct PlanesThrough<'a> {
    footprint: &'a Footprint,
    target: Point,
    orient_idx: usize,
    offset_idx: usize,
}

impl<'a> PlanesThrough<'a> {
    pub fn new(footprint: &'a Footprint, target: Point) -> Self {
        Self {
            footprint,
            target,
            orient_idx: 0,
            offset_idx: 0,
        }
    }
}

impl Iterator for PlanesThrough<'_> {
    type Item = Plane;

    fn next(&mut self) -> Option<Plane> {
        while self.orient_idx < Orientation::COUNT {
            let orientation = Orientation::from_index(self.orient_idx)?;
            let offsets = self.footprint.offsets(orientation);

            if let Some(&off) = offsets.get(self.offset_idx) {
                self.offset_idx += 1;
                return Some(Plane::at(self.target - off, orientation));
            }

            self.orient_idx += 1;
            self.offset_idx = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let per = self.footprint.len();
        let done = self.orient_idx * per + self.offset_idx;
        let left = (Orientation::COUNT * per).saturating_sub(done);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_yielded_plane_covers_target() {
        let fp = Footprint::classic();
        let target = Point::new(4, 4);
        let planes: Vec<Plane> = fp.planes_through(target).collect();

        assert_eq!(planes.len(), 4 * fp.len());
        for pl in planes {
            assert!(fp.contains_point(pl, target), "{} misses {}", pl, target);
        }
    }
}
