//! Generation of offspring out of selected parents.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::{
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  individual::{Genes, Individual, Population},
  mutation::Mutation,
  recombination::Crossover,
  score::Fitness,
};

/// Checks that probability `value` named `name` lies within `[0, 1]`.
///
/// # Errors
///
/// Returns [`Error::InvalidProbability`] otherwise, `NaN` included.
pub fn check_probability(name: &'static str, value: f64) -> Result<()> {
  if (0.0..=1.0).contains(&value) {
    Ok(())
  } else {
    Err(Error::InvalidProbability { name, value })
  }
}

/// Probabilities and operators that vary parents into offspring.
pub struct Variation<'a, G, Crs, Mut> {
  /// Allele domain handed to `mutation`.
  pub alleles: &'a [Vec<G>],
  /// Chance of a parent to be crossed over with another one.
  pub crossover_probability: f64,
  /// Chance of a parent to be mutated.
  pub mutation_probability: f64,
  /// Crossover operator.
  pub crossover: &'a Crs,
  /// Mutation operator.
  pub mutation: &'a Mut,
}

enum Offspring<G> {
  Template(Arc<Individual<G>>),
  Altered(usize),
}

/// Creates one offspring per template, in template order.
///
/// Each template is crossed over with probability `crossover_probability`,
/// its partner drawn uniformly among the other templates, then mutated with
/// probability `mutation_probability`. Offspring whose genes differ from
/// their template's are evaluated in a single batch. The rest reuse the
/// template itself, fitness included.
///
/// All random decisions are made on the calling thread in template order.
///
/// # Errors
///
/// Fails if a probability lies outside of `[0, 1]` or an operator returns
/// empty genes or empty fitness.
///
/// # Panics
///
/// Panics if `evaluator` returns a different number of fitness vectors than
/// it was given genes.
pub fn generate_offspring<G, Crs, Mut, Eva, EvaExecStrat>(
  templates: &[Arc<Individual<G>>],
  variation: &Variation<'_, G, Crs, Mut>,
  evaluator: &Eva,
  rng: &mut dyn RngCore,
) -> Result<Population<G>>
where
  G: Clone + PartialEq,
  Crs: Crossover<G>,
  Mut: Mutation<G>,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
{
  check_probability("crossover probability", variation.crossover_probability)?;
  check_probability("mutation probability", variation.mutation_probability)?;

  let mut offspring = Vec::with_capacity(templates.len());
  let mut altered: Vec<Genes<G>> = Vec::new();
  for (idx, template) in templates.iter().enumerate() {
    let mut genes: Option<Genes<G>> = None;

    if rng.gen_bool(variation.crossover_probability) && templates.len() > 1 {
      let mut partner = rng.gen_range(0..templates.len() - 1);
      if partner >= idx {
        partner += 1;
      }
      genes = Some(variation.crossover.crossover(
        template.genes(),
        templates[partner].genes(),
        rng,
      ));
    }

    if rng.gen_bool(variation.mutation_probability) {
      let base = genes.as_deref().unwrap_or(template.genes());
      genes = Some(variation.mutation.mutate(base, variation.alleles, rng));
    }

    match genes {
      Some(genes) if genes.as_slice() != template.genes() => {
        offspring.push(Offspring::Altered(altered.len()));
        altered.push(genes);
      }
      _ => offspring.push(Offspring::Template(Arc::clone(template))),
    }
  }

  let scores = evaluator.execute_evaluations(&altered);
  assert_eq!(
    scores.len(),
    altered.len(),
    "evaluator must return one fitness vector per gene vector"
  );
  log::trace!(
    "{} of {} offspring evaluated",
    altered.len(),
    templates.len()
  );

  let evaluated = altered
    .into_iter()
    .zip(scores)
    .map(|(genes, scores)| {
      Individual::new(genes, Fitness::new(scores)?).map(Arc::new)
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(
    offspring
      .into_iter()
      .map(|o| match o {
        Offspring::Template(individual) => individual,
        Offspring::Altered(idx) => Arc::clone(&evaluated[idx]),
      })
      .collect(),
  )
}
