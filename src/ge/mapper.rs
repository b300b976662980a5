//! Genotype to phenotype mapping.

use rand::Rng;

use super::chromosome::random_codons;
use super::grammar::{Grammar, Symbol};

/// Failure to derive a phenotype.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("derivation exceeded {limit} non-terminal expansions")]
    StepLimitExceeded { limit: usize },
}

/// A completed derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// Terminals in derivation order, separated by single spaces.
    pub phenotype: String,
    /// Non-terminal expansions performed.
    pub steps: usize,
    /// Codons consumed by multi-alternative rules.
    pub codons_used: usize,
    /// Times the genotype ran out and was extended.
    pub wraps: usize,
}

/// Leftmost derivation driven by a codon sequence.
///
/// A non-terminal with several productions consumes the next codon and
/// takes production `codon % count`; a non-terminal with a single
/// production consumes nothing. When the genotype runs out, a fresh random
/// block of `min_codons..=max_codons` codons is appended to it, so the
/// extended genotype alone reproduces the phenotype afterwards. Derivations
/// that need more than `max_steps` expansions fail.
#[derive(Debug, Clone)]
pub struct Mapper<'g> {
    grammar: &'g Grammar,
    max_steps: usize,
    min_codons: usize,
    max_codons: usize,
}

impl<'g> Mapper<'g> {
    pub fn new(grammar: &'g Grammar, max_steps: usize, min_codons: usize, max_codons: usize) -> Self {
        let min_codons = min_codons.max(1);
        Self {
            grammar,
            max_steps,
            min_codons,
            max_codons: max_codons.max(min_codons),
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Derives the phenotype of `codons`, extending it if needed.
    pub fn map<R: Rng>(&self, codons: &mut Vec<u8>, rng: &mut R) -> Result<Derivation, MappingError> {
        let start = Symbol::NonTerminal(self.grammar.start());
        let mut stack: Vec<&Symbol> = vec![&start];
        let mut phenotype = String::new();
        let mut steps = 0;
        let mut next = 0;
        let mut wraps = 0;

        while let Some(symbol) = stack.pop() {
            match symbol {
                Symbol::Terminal(text) => {
                    if !phenotype.is_empty() {
                        phenotype.push(' ');
                    }
                    phenotype.push_str(text);
                }
                Symbol::NonTerminal(rule) => {
                    steps += 1;
                    if steps > self.max_steps {
                        return Err(MappingError::StepLimitExceeded {
                            limit: self.max_steps,
                        });
                    }
                    let alternatives = self.grammar.alternatives(*rule);
                    let production = if alternatives.len() == 1 {
                        &alternatives[0]
                    } else {
                        if next >= codons.len() {
                            codons.extend(random_codons(self.min_codons, self.max_codons, rng));
                            wraps += 1;
                        }
                        let codon = codons[next] as usize;
                        next += 1;
                        &alternatives[codon % alternatives.len()]
                    };
                    stack.extend(production.iter().rev());
                }
            }
        }

        Ok(Derivation {
            phenotype,
            steps,
            codons_used: next,
            wraps,
        })
    }
}
