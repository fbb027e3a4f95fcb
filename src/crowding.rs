//! Crowding distance of the fitness vectors of a front.

use rayon::prelude::*;

use crate::{
  individual::{Crowding, CrowdingMap, FrontLabel, Population},
  score::Fitness,
  sorting::Index,
};

/// Calculates crowding distance of every distinct fitness vector of `front`
/// and labels the results with `label`.
///
/// For each objective, the distinct vectors are sorted by that objective in
/// descending order. The first and the last one get an infinite distance,
/// every other one adds the gap between its neighbours normalized by the
/// objective's range. Objectives whose range is zero are skipped. A front
/// with a single distinct vector gets an infinite distance for it.
///
/// Individuals sharing a fitness vector share one entry of the result.
///
/// # Panics
///
/// Panics if an index is out of bounds or the fitness vectors of the front
/// differ in length. Fronts produced by [`crate::sorting`] are checked for
/// the latter.
pub fn crowding_distances<G>(
  population: &Population<G>,
  front: &[Index],
  label: FrontLabel,
) -> CrowdingMap {
  let distinct: Vec<&Fitness> = population
    .group_by_fitness(front.iter().copied())
    .into_iter()
    .map(|group| group.fitness)
    .collect();

  let distances = match distinct.len() {
    0 => vec![],
    1 => vec![f64::INFINITY],
    _ => {
      let contributions: Vec<Vec<f64>> = (0..distinct[0].len())
        .into_par_iter()
        .map(|o_idx| objective_contributions(&distinct, o_idx))
        .collect();
      // summed in objective order to keep results independent of threads
      (0..distinct.len())
        .map(|f_idx| contributions.iter().map(|c| c[f_idx]).sum())
        .collect()
    }
  };

  distinct
    .into_iter()
    .zip(distances)
    .map(|(fitness, distance)| (fitness.clone(), Crowding { label, distance }))
    .collect()
}

/// Crowding distance contributed by objective `o_idx` to each of at least
/// two distinct fitness vectors.
fn objective_contributions(distinct: &[&Fitness], o_idx: usize) -> Vec<f64> {
  let mut contributions = vec![0.0; distinct.len()];

  let mut order: Vec<usize> = (0..distinct.len()).collect();
  order.sort_by(|&a, &b| distinct[b][o_idx].total_cmp(&distinct[a][o_idx]));

  let first = order[0];
  let last = order[order.len() - 1];
  let range = distinct[first][o_idx] - distinct[last][o_idx];
  // zero (or NaN) range would make every gap indeterminate
  if !(range > 0.0) {
    return contributions;
  }

  contributions[first] = f64::INFINITY;
  contributions[last] = f64::INFINITY;
  for w in order.windows(3) {
    let (prev, curr, next) = (w[0], w[1], w[2]);
    contributions[curr] =
      (distinct[prev][o_idx] - distinct[next][o_idx]) / range;
  }

  contributions
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{individual::tests::population, score::Score};

  fn distance_of(map: &CrowdingMap, scores: &[Score]) -> f64 {
    map[&Fitness::new(scores.to_vec()).unwrap()].distance
  }

  #[test]
  fn test_crowding_distances() {
    // A, B, C, D
    let p = population(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
    let map = crowding_distances(&p, &[0, 1, 2, 3], FrontLabel::Ranked(0));
    assert_eq!(map.len(), 4);
    assert_eq!(distance_of(&map, &[1.0, 5.0]), f64::INFINITY);
    assert_eq!(distance_of(&map, &[5.0, 1.0]), f64::INFINITY);
    assert_eq!(distance_of(&map, &[2.0, 4.0]), 1.0);
    assert_eq!(distance_of(&map, &[3.0, 3.0]), 1.5);
    assert!(map.values().all(|c| c.label == FrontLabel::Ranked(0)));
  }

  #[test]
  fn test_duplicates_share_an_entry() {
    let p = population(&[
      &[1.0, 5.0],
      &[2.0, 4.0],
      &[2.0, 4.0],
      &[3.0, 3.0],
      &[5.0, 1.0],
    ]);
    let map = crowding_distances(&p, &[0, 1, 2, 3, 4], FrontLabel::Unranked);
    assert_eq!(map.len(), 4);
    assert_eq!(distance_of(&map, &[2.0, 4.0]), 1.0);
    assert_eq!(map[p.get(2).fitness()].label, FrontLabel::Unranked);
  }

  #[test]
  fn test_zero_range_objective_is_skipped() {
    let p = population(&[&[1.0, 7.0], &[2.0, 7.0], &[4.0, 7.0]]);
    let map = crowding_distances(&p, &[0, 1, 2], FrontLabel::Ranked(1));
    assert_eq!(distance_of(&map, &[1.0, 7.0]), f64::INFINITY);
    assert_eq!(distance_of(&map, &[4.0, 7.0]), f64::INFINITY);
    assert_eq!(distance_of(&map, &[2.0, 7.0]), 1.0);
    assert!(map.values().all(|c| !c.distance.is_nan()));
  }

  #[test]
  fn test_small_fronts() {
    let p = population(&[&[1.0, 2.0], &[1.0, 2.0], &[3.0, 0.0]]);
    let map = crowding_distances(&p, &[0, 1], FrontLabel::Ranked(0));
    assert_eq!(map.len(), 1);
    assert_eq!(distance_of(&map, &[1.0, 2.0]), f64::INFINITY);

    let map = crowding_distances(&p, &[0, 2], FrontLabel::Ranked(0));
    assert!(map.values().all(|c| c.distance == f64::INFINITY));

    assert!(crowding_distances(&p, &[], FrontLabel::Ranked(0)).is_empty());
  }

  #[test]
  fn test_subset_of_population() {
    let p = population(&[&[9.0, 9.0], &[1.0, 3.0], &[2.0, 2.0], &[3.0, 1.0]]);
    let map = crowding_distances(&p, &[1, 2, 3], FrontLabel::Ranked(1));
    assert_eq!(map.len(), 3);
    assert!(!map.contains_key(p.get(0).fitness()));
    assert_eq!(distance_of(&map, &[2.0, 2.0]), 2.0);
  }
}
