//! Mutation operators.

use rand::{Rng, RngCore};

use crate::individual::Genes;

/// An operator that perturbs a gene vector, returning the mutated copy. The
/// allele domain lists values each gene position can take.
///
/// # Examples
/// ```
/// # use rand::{Rng, RngCore};
/// // nudges one random gene
/// let m = |genes: &[f64], _: &[Vec<f64>], rng: &mut dyn RngCore| {
///   let mut genes = genes.to_vec();
///   let idx = rng.gen_range(0..genes.len());
///   genes[idx] += rng.gen_range(-0.1..0.1);
///   genes
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Mutation<G> {
  /// Returns mutated genes.
  fn mutate(
    &self,
    genes: &[G],
    alleles: &[Vec<G>],
    rng: &mut dyn RngCore,
  ) -> Genes<G>;
}

impl<G, F> Mutation<G> for F
where
  F: Fn(&[G], &[Vec<G>], &mut dyn RngCore) -> Genes<G>,
{
  fn mutate(
    &self,
    genes: &[G],
    alleles: &[Vec<G>],
    rng: &mut dyn RngCore,
  ) -> Genes<G> {
    self(genes, alleles, rng)
  }
}

/// Redraws one random gene uniformly from the values of its position. The
/// new value may equal the old one.
///
/// # Panics
///
/// Panics if `genes` is longer than `alleles` or the chosen position has no
/// values.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomResetting;

impl<G: Clone> Mutation<G> for RandomResetting {
  fn mutate(
    &self,
    genes: &[G],
    alleles: &[Vec<G>],
    rng: &mut dyn RngCore,
  ) -> Genes<G> {
    let mut genes = genes.to_vec();
    if genes.is_empty() {
      return genes;
    }
    let idx = rng.gen_range(0..genes.len());
    let values = &alleles[idx];
    genes[idx] = values[rng.gen_range(0..values.len())].clone();
    genes
  }
}
