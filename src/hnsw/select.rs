//! Heuristic neighbor selection (Algorithm 4 from the HNSW paper).
//!
//! A candidate is kept only if it is strictly closer to the base node than
//! to every neighbor already kept, so a candidate sitting behind a kept
//! neighbor is skipped and the remaining slots go to other directions.

use crate::distance::Space;

use super::neighbor_queue::Neighbor;
use super::point::Point;

/// Shrink `candidates` (distances measured from the base node) to at most
/// `m` diverse neighbors, returned nearest first.
///
/// When there are already no more than `m` candidates they are all kept.
pub(crate) fn select_neighbors<S: Space>(
    space: &S,
    points: &[Point],
    mut candidates: Vec<Neighbor>,
    m: usize,
) -> Vec<Neighbor> {
    candidates.sort_unstable();
    if candidates.len() <= m {
        return candidates;
    }

    let mut selected: Vec<Neighbor> = Vec::with_capacity(m);
    for candidate in candidates {
        if selected.len() >= m {
            break;
        }

        let vector = points[candidate.id.index()].vector().as_slice();
        let is_diverse = selected.iter().all(|kept| {
            let kept_vector = points[kept.id.index()].vector().as_slice();
            candidate.distance < space.distance(vector, kept_vector)
        });

        if is_diverse {
            selected.push(candidate);
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::EuclideanSpace;
    use crate::hnsw::point::PointId;
    use crate::vector::Vector;

    fn arena(coords: &[[f32; 2]]) -> Vec<Point> {
        coords
            .iter()
            .map(|c| Point::new(Vector::new(c.to_vec()), 0))
            .collect()
    }

    fn candidates_from_origin(space: &EuclideanSpace, points: &[Point]) -> Vec<Neighbor> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let dist = space.distance(&[0.0, 0.0], p.vector().as_slice());
                Neighbor::new(PointId(i), dist)
            })
            .collect()
    }

    #[test]
    fn test_small_candidate_set_kept() {
        let space = EuclideanSpace::new(2);
        // Tightly clustered, but within budget: nothing is pruned.
        let points = arena(&[[1.1, 0.0], [1.0, 0.0]]);
        let candidates = candidates_from_origin(&space, &points);

        let selected = select_neighbors(&space, &points, candidates, 2);
        let ids: Vec<PointId> = selected.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![PointId(1), PointId(0)]);
    }

    #[test]
    fn test_shadowed_candidate_dropped() {
        let space = EuclideanSpace::new(2);
        let points = arena(&[[1.0, 0.0], [1.1, 0.0], [0.0, 1.2], [-1.3, 0.0]]);
        let candidates = candidates_from_origin(&space, &points);

        let selected = select_neighbors(&space, &points, candidates, 3);
        let ids: Vec<PointId> = selected.iter().map(|n| n.id).collect();
        // [1.1, 0] sits right behind [1, 0] and is skipped in favour of
        // the farther but differently placed points.
        assert_eq!(ids, vec![PointId(0), PointId(2), PointId(3)]);
    }

    #[test]
    fn test_never_exceeds_m() {
        let space = EuclideanSpace::new(2);
        let coords: Vec<[f32; 2]> = (0..8)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                let radius = 1.0 + i as f32 * 0.01;
                [radius * angle.cos(), radius * angle.sin()]
            })
            .collect();
        let points = arena(&coords);
        let candidates = candidates_from_origin(&space, &points);

        let selected = select_neighbors(&space, &points, candidates, 3);
        assert_eq!(selected.len(), 3);
        for pair in selected.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_collinear_candidates_collapse_to_nearest() {
        let space = EuclideanSpace::new(2);
        let points = arena(&[[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]]);
        let candidates = candidates_from_origin(&space, &points);

        let selected = select_neighbors(&space, &points, candidates, 2);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, PointId(0));
    }
}
