//! Truncation of a boundary front and parent selection.

use std::{cmp::Ordering, sync::Arc};

use rand::{seq::index, Rng, RngCore};

use crate::{
  crowding::crowding_distances,
  error::{Error, Result},
  individual::{Crowding, FrontLabel, Individual, Population},
  sorting::Index,
};

/// Selects exactly `quota` distinct indices out of `front`, preferring
/// isolated fitness vectors.
///
/// Distinct fitness vectors of the front are visited in order of descending
/// crowding distance, wrapping around at the end. A vector shared by several
/// individuals yields one of them at random and stays in rotation, a vector
/// of a single individual yields it and leaves the rotation. This way
/// duplicates of one fitness are never taken in a fixed order, nor all at
/// once.
///
/// `front` must hold distinct indices.
///
/// # Errors
///
/// Returns [`Error::QuotaOutOfRange`] unless `0 < quota <= front.len()`.
pub fn select_last_front<G>(
  population: &Population<G>,
  front: &[Index],
  quota: usize,
  rng: &mut dyn RngCore,
) -> Result<Vec<Index>> {
  if quota == 0 || quota > front.len() {
    return Err(Error::QuotaOutOfRange {
      quota,
      available: front.len(),
    });
  }

  let crowding = crowding_distances(population, front, FrontLabel::Unranked);
  let mut rotation: Vec<(f64, Vec<Index>)> = population
    .group_by_fitness(front.iter().copied())
    .into_iter()
    .map(|group| (crowding[group.fitness].distance, group.members))
    .collect();
  rotation.sort_by(|a, b| b.0.total_cmp(&a.0));

  log::trace!(
    "truncating front of {} individuals ({} distinct) to {}",
    front.len(),
    rotation.len(),
    quota
  );

  let mut selected = Vec::with_capacity(quota);
  let mut cursor = 0;
  while selected.len() < quota {
    if cursor >= rotation.len() {
      cursor = 0;
    }
    let members = &mut rotation[cursor].1;
    if members.len() > 1 {
      let pick = rng.gen_range(0..members.len());
      selected.push(members.remove(pick));
      cursor += 1;
    } else {
      selected.extend(members.pop());
      rotation.remove(cursor);
    }
  }

  Ok(selected)
}

/// Crowded comparison: `Less` if `a` is better, that is it belongs to a
/// better front or, within one front, is more isolated.
pub fn crowded_comparison(a: &Crowding, b: &Crowding) -> Ordering {
  a.label
    .cmp(&b.label)
    .then_with(|| b.distance.total_cmp(&a.distance))
}

/// Selects as many parents as there are individuals in `population` with
/// binary tournaments between distinct fitness vectors.
///
/// Tournaments are held between fitness vectors rather than individuals so
/// that frequently duplicated fitness does not win more often just by being
/// drawn more often. Each round samples without replacement up to twice as
/// many vectors as parents are still missing, pairs them up and picks the
/// winner of each pair by [`crowded_comparison`], breaking exact ties at
/// random. The parent is then drawn at random among individuals sharing the
/// winning fitness.
///
/// A population with a single distinct fitness vector is returned as is.
///
/// # Errors
///
/// Returns [`Error::MissingCrowding`] if a fitness vector of `population`
/// has no crowding metadata assigned.
pub fn tournament_selection<G>(
  population: &Population<G>,
  rng: &mut dyn RngCore,
) -> Result<Vec<Arc<Individual<G>>>> {
  let groups = population.group_by_fitness(0..population.len());
  if groups.len() <= 1 {
    return Ok(population.individuals().to_vec());
  }

  let crowding = groups
    .iter()
    .map(|group| {
      population
        .crowding_of(group.fitness)
        .copied()
        .ok_or_else(|| Error::MissingCrowding(group.fitness.to_vec()))
    })
    .collect::<Result<Vec<_>>>()?;

  let required = population.len();
  let mut parents = Vec::with_capacity(required);
  while parents.len() < required {
    let amount = (2 * (required - parents.len())).min(groups.len());
    let sampled = index::sample(rng, groups.len(), amount).into_vec();
    for pair in sampled.chunks_exact(2) {
      let (a, b) = (pair[0], pair[1]);
      let winner = match crowded_comparison(&crowding[a], &crowding[b]) {
        Ordering::Less => a,
        Ordering::Greater => b,
        Ordering::Equal if rng.gen_bool(0.5) => a,
        Ordering::Equal => b,
      };
      let members = &groups[winner].members;
      let member = members[rng.gen_range(0..members.len())];
      parents.push(Arc::clone(population.get(member)));
    }
  }

  Ok(parents)
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::individual::tests::population;

  fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
  }

  #[test]
  fn test_last_front_keeps_boundaries() {
    // A, B, C, D
    let p = population(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let mut selected =
        select_last_front(&p, &[0, 1, 2, 3], 3, &mut rng).unwrap();
      selected.sort();
      assert_eq!(selected, vec![0, 2, 3]);
    }
  }

  #[test]
  fn test_last_front_quota() {
    let p = population(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
    let mut rng = rng();
    for quota in 1..=4 {
      let selected = select_last_front(&p, &[0, 1, 2, 3], quota, &mut rng);
      let selected = selected.unwrap();
      let unique: HashSet<_> = selected.iter().collect();
      assert_eq!(selected.len(), quota);
      assert_eq!(unique.len(), quota);
    }
    assert_eq!(
      select_last_front(&p, &[0, 1, 2, 3], 5, &mut rng),
      Err(Error::QuotaOutOfRange {
        quota: 5,
        available: 4
      })
    );
    assert!(select_last_front(&p, &[0, 1], 0, &mut rng).is_err());
  }

  #[test]
  fn test_last_front_rotates_duplicates() {
    // three copies of a boundary vector and one of each other
    let p = population(&[
      &[0.0, 4.0],
      &[0.0, 4.0],
      &[0.0, 4.0],
      &[4.0, 0.0],
      &[2.0, 2.0],
    ]);
    let copies = |selected: &HashSet<Index>| {
      selected.iter().filter(|&&i| i < 3).count()
    };
    let front = [0, 1, 2, 3, 4];

    let selected: HashSet<_> = select_last_front(&p, &front, 3, &mut rng())
      .unwrap()
      .into_iter()
      .collect();
    assert!(selected.contains(&3) && selected.contains(&4));
    assert_eq!(copies(&selected), 1);

    // the rotation wraps around to the duplicated vector
    let selected: HashSet<_> = select_last_front(&p, &front, 4, &mut rng())
      .unwrap()
      .into_iter()
      .collect();
    assert!(selected.contains(&3) && selected.contains(&4));
    assert_eq!(copies(&selected), 2);
  }

  #[test]
  fn test_last_front_is_reproducible() {
    let p = population(&[&[1.0, 1.0][..]; 10]);
    let front: Vec<_> = (0..10).collect();
    let a = select_last_front(&p, &front, 6, &mut rng()).unwrap();
    let b = select_last_front(&p, &front, 6, &mut rng()).unwrap();
    assert_eq!(a, b);
  }

  fn crowding(label: FrontLabel, distance: f64) -> Crowding {
    Crowding { label, distance }
  }

  #[test]
  fn test_crowded_comparison() {
    let ranked = |r, d| crowding(FrontLabel::Ranked(r), d);
    assert_eq!(
      crowded_comparison(&ranked(0, 0.0), &ranked(1, f64::INFINITY)),
      Ordering::Less
    );
    assert_eq!(
      crowded_comparison(&ranked(1, 1.0), &ranked(1, 2.0)),
      Ordering::Greater
    );
    assert_eq!(
      crowded_comparison(&ranked(2, f64::INFINITY), &ranked(2, f64::INFINITY)),
      Ordering::Equal
    );
    assert_eq!(
      crowded_comparison(&crowding(FrontLabel::Unranked, 9.0), &ranked(9, 0.0)),
      Ordering::Greater
    );
  }

  fn ranked_population() -> Population<usize> {
    let mut p = population(&[
      &[1.0, 5.0],
      &[2.0, 4.0],
      &[2.0, 4.0],
      &[0.0, 0.0],
      &[5.0, 1.0],
    ]);
    let front = crowding_distances(&p, &[0, 1, 2, 4], FrontLabel::Ranked(0));
    let worst = crowding_distances(&p, &[3], FrontLabel::Ranked(1));
    p.assign_crowding(front);
    p.assign_crowding(worst);
    p
  }

  #[test]
  fn test_tournament_selection() {
    let p = ranked_population();
    let mut rng = rng();
    let parents = tournament_selection(&p, &mut rng).unwrap();
    assert_eq!(parents.len(), p.len());
    // a fitness vector of the second front never wins a tournament
    assert!(parents.iter().all(|i| i.fitness().as_slice() != [0.0, 0.0]));
    assert!(parents
      .iter()
      .all(|i| p.iter().any(|member| Arc::ptr_eq(member, i))));
  }

  #[test]
  fn test_tournament_is_reproducible() {
    let p = ranked_population();
    let genes = |parents: Vec<Arc<Individual<usize>>>| {
      parents.iter().map(|i| i.genes()[0]).collect::<Vec<_>>()
    };
    let a = genes(tournament_selection(&p, &mut rng()).unwrap());
    let b = genes(tournament_selection(&p, &mut rng()).unwrap());
    assert_eq!(a, b);
  }

  #[test]
  fn test_tournament_degenerate_population() {
    let p = population(&[&[1.0, 1.0][..]; 3]);
    let parents = tournament_selection(&p, &mut rng()).unwrap();
    assert_eq!(parents.len(), 3);
    assert!(parents.iter().zip(p.iter()).all(|(a, b)| Arc::ptr_eq(a, b)));
  }

  #[test]
  fn test_tournament_requires_crowding() {
    let p = population(&[&[1.0, 1.0], &[2.0, 0.0]]);
    assert_eq!(
      tournament_selection(&p, &mut rng()).map(|v| v.len()),
      Err(Error::MissingCrowding(vec![1.0, 1.0]))
    );
  }
}
