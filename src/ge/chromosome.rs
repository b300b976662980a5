//! GE individuals.

use rand::Rng;

use super::mapper::Mapper;
use super::program::HeuristicProgram;
use crate::acceptance::ThresholdConfig;
use crate::evaluator::Violations;
use crate::model::Schedule;

/// A random genotype of `min..=max` codons.
pub fn random_codons<R: Rng>(min: usize, max: usize, rng: &mut R) -> Vec<u8> {
    let len = rng.random_range(min..=max.max(min));
    (0..len).map(|_| rng.random()).collect()
}

/// A genotype together with its decoded program and evaluation.
///
/// Until [`develop`](Self::develop) succeeds, the program and schedule are
/// `None` and the cost is [`Violations::WORST`].
#[derive(Debug, Clone)]
pub struct Chromosome {
    /// The genotype. Grows when mapping wraps.
    pub codons: Vec<u8>,
    /// Derived phenotype text; empty if mapping failed.
    pub phenotype: String,
    /// Decoded program, if the phenotype is a valid program.
    pub program: Option<HeuristicProgram>,
    /// Cost of the retained schedule.
    pub violations: Violations,
    /// Schedule retained by the last evaluation, used as the baseline of
    /// this chromosome's offspring.
    pub schedule: Option<Schedule>,
}

impl Chromosome {
    /// An unevaluated chromosome.
    pub fn new(codons: Vec<u8>) -> Self {
        Self {
            codons,
            phenotype: String::new(),
            program: None,
            violations: Violations::WORST,
            schedule: None,
        }
    }

    pub fn random<R: Rng>(min_codons: usize, max_codons: usize, rng: &mut R) -> Self {
        Self::new(random_codons(min_codons, max_codons, rng))
    }

    /// Maps the genotype and evaluates the program against `baseline`.
    ///
    /// A derivation over the step limit or a phenotype that is not a
    /// program leaves the chromosome at [`Violations::WORST`].
    pub fn develop<R: Rng>(
        &mut self,
        mapper: &Mapper<'_>,
        baseline: &Schedule,
        thresholds: &ThresholdConfig,
        rng: &mut R,
    ) {
        self.program = None;
        self.schedule = None;
        self.violations = Violations::WORST;

        let derivation = match mapper.map(&mut self.codons, rng) {
            Ok(d) => d,
            Err(err) => {
                tracing::trace!(%err, "chromosome failed to map");
                self.phenotype.clear();
                return;
            }
        };
        self.phenotype = derivation.phenotype;
        let program = match self.phenotype.parse::<HeuristicProgram>() {
            Ok(p) => p,
            Err(err) => {
                tracing::trace!(%err, phenotype = %self.phenotype, "phenotype is not a program");
                return;
            }
        };
        let (schedule, violations) = program.evaluate(baseline, thresholds, rng);
        self.program = Some(program);
        self.schedule = Some(schedule);
        self.violations = violations;
    }

    /// Whether the chromosome decoded to a program and was evaluated.
    pub fn is_valid(&self) -> bool {
        self.program.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ge::Grammar;
    use crate::model::fixtures;
    use crate::random::create_rng;

    #[test]
    fn test_random_codons_length() {
        let mut rng = create_rng(1);
        for _ in 0..100 {
            let codons = random_codons(10, 50, &mut rng);
            assert!((10..=50).contains(&codons.len()));
        }
        assert_eq!(random_codons(3, 3, &mut rng).len(), 3);
    }

    #[test]
    fn test_develop_valid_chromosome() {
        let g = Grammar::default();
        let mapper = Mapper::new(&g, 1_000, 10, 50);
        let baseline = Schedule::new(fixtures::toy());
        let mut c = Chromosome::new(vec![2, 1, 1]);
        c.develop(&mapper, &baseline, &ThresholdConfig::default(), &mut create_rng(0));
        assert_eq!(c.phenotype, "AEI single_move()");
        assert!(c.is_valid());
        assert_eq!(c.violations, crate::evaluator::evaluate(&baseline));
        assert!(c.schedule.is_some());
    }

    #[test]
    fn test_develop_failed_mapping_is_worst() {
        let g = Grammar::parse("<s> ::= <s> a | <s> b").unwrap();
        let mapper = Mapper::new(&g, 20, 5, 5);
        let baseline = Schedule::new(fixtures::tiny());
        let mut c = Chromosome::new(vec![0; 5]);
        c.develop(&mapper, &baseline, &ThresholdConfig::default(), &mut create_rng(0));
        assert!(!c.is_valid());
        assert_eq!(c.violations, Violations::WORST);
        assert!(c.schedule.is_none());
    }

    #[test]
    fn test_develop_non_program_phenotype_is_worst() {
        let g = Grammar::parse("<s> ::= hello world").unwrap();
        let mapper = Mapper::new(&g, 20, 5, 5);
        let baseline = Schedule::new(fixtures::tiny());
        let mut c = Chromosome::new(vec![]);
        c.develop(&mapper, &baseline, &ThresholdConfig::default(), &mut create_rng(0));
        assert_eq!(c.phenotype, "hello world");
        assert!(!c.is_valid());
        assert_eq!(c.violations, Violations::WORST);
    }
}
