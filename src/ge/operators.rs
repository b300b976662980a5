//! Selection and variation operators on codon genotypes.

use rand::seq::index;
use rand::Rng;

use super::chromosome::Chromosome;

/// Tournament selection without replacement.
///
/// Samples `k` distinct chromosomes and returns the index of the one with
/// the lowest `(hard, soft)` cost; the first sampled wins ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    assert!(!population.is_empty(), "cannot select from empty population");
    let k = k.clamp(1, population.len());
    index::sample(rng, population.len(), k)
        .iter()
        .min_by_key(|&i| population[i].violations)
        .unwrap_or(0)
}

/// One-point crossover with an independent cut in each parent.
///
/// `a` becomes `a[..i] ++ b[j..]` and `b` becomes `b[..j] ++ a[i..]`.
pub fn one_point_crossover<R: Rng>(a: &mut Vec<u8>, b: &mut Vec<u8>, rng: &mut R) {
    let i = rng.random_range(0..=a.len());
    let j = rng.random_range(0..=b.len());
    let tail_a = a.split_off(i);
    let tail_b = b.split_off(j);
    a.extend(tail_b);
    b.extend(tail_a);
}

/// Overwrites one random codon with a fresh random value.
pub fn point_mutation<R: Rng>(codons: &mut [u8], rng: &mut R) {
    if codons.is_empty() {
        return;
    }
    let i = rng.random_range(0..codons.len());
    codons[i] = rng.random();
}
