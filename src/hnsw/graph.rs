//! HNSW graph — core data structures and algorithms.
//!
//! Implements the Hierarchical Navigable Small World graph from:
//! "Efficient and robust approximate nearest neighbor search using
//!  Hierarchical Navigable Small World graphs" (Malkov & Yashunin, 2016/2018).
//!
//! Points live in an arena (`Vec<Point>`) and refer to each other by
//! [`PointId`], so the cyclic neighbor graph needs no shared ownership.
//! Nothing is ever removed from the arena.

use std::collections::HashSet;
use std::iter;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::distance::Space;
use crate::error::{HnswError, Result};
use crate::vector::Vector;

use super::neighbor_queue::{CappedMaxResult, MinFrontier, Neighbor};
use super::params::HnswParams;
use super::point::{Point, PointId};
use super::select::select_neighbors;

/// The HNSW graph structure.
#[derive(Debug)]
pub struct HnswGraph<S> {
    /// Arena of nodes, indexed by `PointId`.
    points: Vec<Point>,
    /// Entry point node ID (highest-level node).
    entry_point: Option<PointId>,
    /// Highest populated layer; `None` while the graph is empty.
    top_level: Option<usize>,
    params: HnswParams,
    space: S,
    /// RNG for level generation.
    rng: StdRng,
}

impl<S: Space> HnswGraph<S> {
    pub fn new(space: S, params: HnswParams) -> Result<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            points: Vec::new(),
            entry_point: None,
            top_level: None,
            params,
            space,
            rng,
        })
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn params(&self) -> &HnswParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn entry_point(&self) -> Option<PointId> {
        self.entry_point
    }

    pub fn top_level(&self) -> Option<usize> {
        self.top_level
    }

    /// The layer a point was assigned when it was inserted.
    pub fn level(&self, id: PointId) -> Option<usize> {
        self.points.get(id.index()).map(Point::level)
    }

    /// Adjacency of `id` at `layer` (empty above the point's level).
    pub fn neighbors(&self, id: PointId, layer: usize) -> Option<&[PointId]> {
        self.points.get(id.index()).map(|p| p.neighbors(layer))
    }

    pub fn get_vector(&self, id: PointId) -> Option<&Vector> {
        self.points.get(id.index()).map(Point::vector)
    }

    /// Degree cap for a layer: `max_degree0` at the bottom, `max_degree` above.
    pub fn layer_cap(&self, layer: usize) -> usize {
        if layer == 0 {
            self.params.max_degree0()
        } else {
            self.params.max_degree
        }
    }

    /// Generate a random level for a new node: floor(-ln(U) * ml), U in (0, 1].
    fn random_level(&mut self) -> usize {
        let r: f64 = self.rng.gen();
        let level = (-(1.0 - r).ln() * self.params.ml()).floor() as usize;
        level.min(self.params.max_level - 1)
    }

    fn distance_to(&self, query: &[f32], id: PointId) -> f32 {
        self.space
            .distance(query, self.points[id.index()].vector().as_slice())
    }

    /// Hill-climb at one layer: keep moving to any strictly closer neighbor
    /// until none is left. Equivalent to a layer search with ef = 1.
    fn greedy_closest(&self, query: &[f32], start: Neighbor, layer: usize) -> Neighbor {
        let mut best = start;
        let mut changed = true;
        while changed {
            changed = false;
            for &neighbor_id in self.points[best.id.index()].neighbors(layer) {
                let dist = self.distance_to(query, neighbor_id);
                if dist < best.distance {
                    best = Neighbor::new(neighbor_id, dist);
                    changed = true;
                }
            }
        }
        best
    }

    /// SEARCH-LAYER: Algorithm 2 from the HNSW paper.
    ///
    /// Beam search over the edges of a single layer, starting at `entry`.
    /// Returns up to `ef` closest points found, nearest first.
    fn search_layer(
        &self,
        query: &[f32],
        entry: Neighbor,
        layer: usize,
        ef: usize,
    ) -> Vec<Neighbor> {
        let mut visited = HashSet::new();
        let mut candidates = MinFrontier::new(); // closest candidate on top
        let mut results = CappedMaxResult::new(ef); // furthest result on top

        visited.insert(entry.id);
        candidates.push(entry);
        results.push(entry);

        while let Some(c) = candidates.pop() {
            // The closest unexpanded candidate is worse than everything kept
            let furthest_dist = results.furthest().map_or(f32::MAX, |n| n.distance);
            if results.is_full() && c.distance > furthest_dist {
                break;
            }

            for &neighbor_id in self.points[c.id.index()].neighbors(layer) {
                if !visited.insert(neighbor_id) {
                    continue;
                }

                let dist = self.distance_to(query, neighbor_id);
                if results.admits(dist) {
                    let neighbor = Neighbor::new(neighbor_id, dist);
                    candidates.push(neighbor);
                    results.push(neighbor);
                }
            }
        }

        trace!(layer, ef, visited = visited.len(), "searched layer");
        results.into_sorted_vec()
    }

    /// Link `id` to a diverse subset of `candidates` at `layer` and try to
    /// link each chosen neighbor back.
    ///
    /// A neighbor whose list is already at the layer cap has its list rebuilt
    /// from its current neighbors plus `id`; the rebuilt list may leave `id`
    /// (or some older edge) out, so edges are not guaranteed symmetric.
    /// Returns the furthest selected neighbor.
    fn mutually_connect(
        &mut self,
        id: PointId,
        candidates: Vec<Neighbor>,
        layer: usize,
    ) -> Option<Neighbor> {
        let cap = self.layer_cap(layer);
        let selected =
            select_neighbors(&self.space, &self.points, candidates, self.params.max_degree);

        for neighbor in &selected {
            self.points[id.index()].push_neighbor(layer, neighbor.id);

            // Room is counted at this layer only
            if self.points[neighbor.id.index()].neighbors(layer).len() < cap {
                self.points[neighbor.id.index()].push_neighbor(layer, id);
            } else {
                self.rebuild_neighbors(neighbor.id, id, layer, cap);
            }
        }

        selected.last().copied()
    }

    /// Re-run neighbor selection for `node` over its current list at
    /// `layer` plus `newcomer`, and replace the list with the result.
    fn rebuild_neighbors(&mut self, node: PointId, newcomer: PointId, layer: usize, cap: usize) {
        let base = self.points[node.index()].vector().as_slice();
        let candidates: Vec<Neighbor> = self.points[node.index()]
            .neighbors(layer)
            .iter()
            .copied()
            .chain(iter::once(newcomer))
            .map(|nid| {
                let other = self.points[nid.index()].vector().as_slice();
                Neighbor::new(nid, self.space.distance(base, other))
            })
            .collect();

        let kept: Vec<PointId> = select_neighbors(&self.space, &self.points, candidates, cap)
            .into_iter()
            .map(|n| n.id)
            .collect();

        debug!(
            node = %node,
            layer,
            kept = kept.len(),
            linked_back = kept.contains(&newcomer),
            "pruned neighbor list"
        );
        self.points[node.index()].set_neighbors(layer, kept);
    }

    /// INSERT: Algorithm 1 from the HNSW paper.
    pub fn insert(&mut self, vector: Vector) -> Result<PointId> {
        self.space.validate(vector.as_slice())?;

        let level = self.random_level();
        let id = PointId(self.points.len());
        let query = vector.clone();
        self.points.push(Point::new(vector, level));
        trace!(id = %id, level, "inserting point");

        // If this is the first node, set it as entry point
        let (entry_point, top_level) = match (self.entry_point, self.top_level) {
            (Some(ep), Some(top)) => (ep, top),
            _ => {
                self.entry_point = Some(id);
                self.top_level = Some(level);
                debug!(entry_point = %id, top_level = level, "graph initialised");
                return Ok(id);
            }
        };

        let query = query.as_slice();
        let mut ep = Neighbor::new(entry_point, self.distance_to(query, entry_point));

        // Phase 1: Greedy descent from top layer down to level+1
        for layer in (level + 1..=top_level).rev() {
            ep = self.greedy_closest(query, ep, layer);
        }

        // Phase 2: Connect at layers min(level, top_level) down to 0
        for layer in (0..=level.min(top_level)).rev() {
            let candidates = self.search_layer(query, ep, layer, self.params.beam_width);
            if let Some(next) = self.mutually_connect(id, candidates, layer) {
                ep = next;
            }
        }

        // Update entry point if new node has a higher level
        if level > top_level {
            self.entry_point = Some(id);
            self.top_level = Some(level);
            debug!(entry_point = %id, top_level = level, previous = top_level, "raised top level");
        }

        Ok(id)
    }

    /// SEARCH: Algorithm 5 from the HNSW paper, with ef = beam width.
    pub fn search_knn(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.search(query, k, self.params.beam_width)
    }

    /// Search with a specific ef value (runtime tuning without rebuilding).
    /// The layer-0 beam is widened to at least `k`.
    pub fn search_with_ef(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<Neighbor>> {
        self.search(query, k, ef.max(k))
    }

    fn search(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<Neighbor>> {
        self.space.validate(query)?;

        let (entry_point, top_level) = match (self.entry_point, self.top_level) {
            (Some(ep), Some(top)) => (ep, top),
            _ => return Err(HnswError::EmptyIndex),
        };

        if k == 0 || ef == 0 {
            return Ok(Vec::new());
        }

        let mut ep = Neighbor::new(entry_point, self.distance_to(query, entry_point));

        // Phase 1: Greedy descent from top layer to layer 1
        for layer in (1..=top_level).rev() {
            ep = self.greedy_closest(query, ep, layer);
        }

        // Phase 2: Beam search at layer 0, keep the k nearest
        let mut results = self.search_layer(query, ep, 0, ef);
        results.truncate(k);
        Ok(results)
    }
}
