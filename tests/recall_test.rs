//! Recall tests: verify HNSW finds a high percentage of true nearest neighbors.

use std::collections::HashSet;

use hnsw_from_scratch::{
    CosineSpace, EuclideanSpace, FlatIndex, HnswIndex, HnswParams, Index, Neighbor, PointId,
    Space, Vector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vectors(rng: &mut StdRng, n: usize, dim: usize) -> Vec<Vector> {
    (0..n)
        .map(|_| {
            let data: Vec<f32> = (0..dim).map(|_| rng.gen::<f32>()).collect();
            Vector::new(data)
        })
        .collect()
}

fn recall_at_k(flat_results: &[Neighbor], hnsw_results: &[Neighbor]) -> f64 {
    let ground_truth: HashSet<PointId> = flat_results.iter().map(|n| n.id).collect();
    let found = hnsw_results
        .iter()
        .filter(|n| ground_truth.contains(&n.id))
        .count();
    found as f64 / flat_results.len() as f64
}

fn build<S: Space + Copy + Sync>(
    space: S,
    params: HnswParams,
    vectors: &[Vector],
) -> (FlatIndex<S>, HnswIndex<S>) {
    // Build flat index (ground truth)
    let mut flat = FlatIndex::new(space);
    for v in vectors {
        flat.insert(v.clone()).unwrap();
    }

    let mut hnsw = HnswIndex::with_params(space, params).unwrap();
    hnsw.build_batch(vectors.to_vec()).unwrap();
    (flat, hnsw)
}

#[test]
fn test_recall_unit_square_center() {
    let k = 20;
    let trials = 5;
    let mut total_recall = 0.0;

    for trial in 0..trials {
        let mut rng = StdRng::seed_from_u64(1000 + trial);
        let vectors = random_vectors(&mut rng, 1000, 2);
        let params = HnswParams::new(100, 8).with_seed(trial);
        let (flat, hnsw) = build(EuclideanSpace::new(2), params, &vectors);

        let query = [0.5, 0.5];
        let exact = flat.search(&query, k).unwrap();
        let approx = hnsw.search_knn(&query, k).unwrap();
        assert_eq!(approx.len(), k);
        total_recall += recall_at_k(&exact, &approx);
    }

    let avg_recall = total_recall / trials as f64;
    assert!(avg_recall >= 0.8, "Recall {:.3} is below 0.8", avg_recall);
}

fn test_recall<S: Space + Copy + Sync>(
    space: S,
    n: usize,
    k: usize,
    num_queries: usize,
    min_recall: f64,
) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    let vectors = random_vectors(&mut rng, n, space.dim());
    let params = HnswParams::new(100, 16).with_seed(7);
    let (flat, hnsw) = build(space, params, &vectors);

    let queries = random_vectors(&mut rng, num_queries, space.dim());
    let mut total_recall = 0.0;
    for query in &queries {
        let flat_results = flat.search(query.as_slice(), k).unwrap();
        let hnsw_results = hnsw.search_knn(query.as_slice(), k).unwrap();
        total_recall += recall_at_k(&flat_results, &hnsw_results);
    }

    let avg_recall = total_recall / num_queries as f64;
    assert!(
        avg_recall >= min_recall,
        "Recall {:.3} is below threshold {:.3} for n={}, dim={}, k={}",
        avg_recall,
        min_recall,
        n,
        space.dim(),
        k
    );
}

#[test]
fn test_recall_100_vectors() {
    test_recall(EuclideanSpace::new(16), 100, 10, 50, 0.90);
}

#[test]
fn test_recall_1000_vectors() {
    test_recall(EuclideanSpace::new(32), 1000, 10, 50, 0.85);
}

#[test]
fn test_recall_cosine() {
    test_recall(CosineSpace::new(16), 1000, 10, 30, 0.85);
}

#[test]
fn test_wider_ef_does_not_hurt() {
    let mut rng = StdRng::seed_from_u64(77);
    let vectors = random_vectors(&mut rng, 800, 8);
    let (flat, hnsw) = build(
        EuclideanSpace::new(8),
        HnswParams::new(20, 8).with_seed(77),
        &vectors,
    );

    let queries = random_vectors(&mut rng, 30, 8);
    let (mut narrow, mut wide) = (0.0, 0.0);
    for q in &queries {
        let exact = flat.search(q.as_slice(), 10).unwrap();
        narrow += recall_at_k(&exact, &hnsw.search_with_ef(q.as_slice(), 10, 10).unwrap());
        wide += recall_at_k(&exact, &hnsw.search_with_ef(q.as_slice(), 10, 200).unwrap());
    }
    assert!(wide >= narrow, "ef=200 recall {} < ef=10 recall {}", wide, narrow);
}
