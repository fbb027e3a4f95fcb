//! Crossover operators.

use itertools::Itertools;
use rand::{Rng, RngCore};

use crate::individual::Genes;

/// An operator that combines the genes of two parents into the genes of one
/// offspring.
///
/// # Examples
/// ```
/// # use rand::RngCore;
/// // takes even positions from `a` and odd positions from `b`
/// let c = |a: &[i32], b: &[i32], _: &mut dyn RngCore| {
///   a.iter()
///     .zip(b)
///     .enumerate()
///     .map(|(i, (x, y))| if i % 2 == 0 { *x } else { *y })
///     .collect::<Vec<_>>()
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Crossover<G> {
  /// Returns genes of an offspring of `a` and `b`.
  fn crossover(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> Genes<G>;
}

impl<G, F> Crossover<G> for F
where
  F: Fn(&[G], &[G], &mut dyn RngCore) -> Genes<G>,
{
  fn crossover(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> Genes<G> {
    self(a, b, rng)
  }
}

/// Cuts both parents at one random position and joins the head of the first
/// one with the tail of the second one. The cut never falls on either end,
/// so each parent contributes at least one gene. Parents shorter than two
/// genes are copied from the first one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinglePointCrossover;

impl<G: Clone> Crossover<G> for SinglePointCrossover {
  fn crossover(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> Genes<G> {
    let len = a.len().min(b.len());
    if len < 2 {
      return a.to_vec();
    }
    let cut = rng.gen_range(1..len);
    a[..cut].iter().chain(&b[cut..]).cloned().collect()
  }
}

/// Takes each gene from either parent with equal probability.
///
/// # Panics
///
/// Panics if parents differ in length.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCrossover;

impl<G: Clone> Crossover<G> for UniformCrossover {
  fn crossover(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> Genes<G> {
    a.iter()
      .zip_eq(b)
      .map(|(x, y)| if rng.gen_bool(0.5) { x } else { y })
      .cloned()
      .collect()
  }
}
