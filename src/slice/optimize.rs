//! Optimization of a linear grading over the maximal standard monomials.
//!
//! The search runs the Slice Algorithm for maximal standard monomials and
//! keeps only the ones of maximal degree. Slices whose content cannot reach
//! the best degree seen so far are discarded by an upper bound on their degree.

use rug::Integer;
use tracing::debug;

use super::{
    msm::msm_base_case,
    split::SplitStrategy,
    strategy::{run_slice_algorithm, SliceParams, SliceStats, StrategyVariant},
    MsmPolicy, Slice,
};
use crate::{grader::TermGrader, ideal::Ideal, term::Term};

/// The best value of an optimization and the terms that reach it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeResult {
    /// `None` if the ideal has no maximal standard monomial.
    pub value: Option<Integer>,
    pub solutions: Vec<Term>,
}

/// Finds the maximal standard monomials of largest degree.
pub struct OptimizeStrategy<'g> {
    grader: &'g TermGrader,
    params: SliceParams,
    report_all: bool,
    use_bound: bool,
    bound_enabled: bool,
    best: Option<Integer>,
    solutions: Vec<Term>,
    lcm: Term,
    bound: Integer,
}

impl<'g> OptimizeStrategy<'g> {
    /// With `report_all` every term of optimal degree is kept, otherwise only
    /// the first one found. With `use_bound` slices that cannot improve the
    /// best value are discarded.
    pub fn new(
        grader: &'g TermGrader,
        mut params: SliceParams,
        report_all: bool,
        use_bound: bool,
    ) -> OptimizeStrategy<'g> {
        params.use_independence = false;
        OptimizeStrategy {
            grader,
            params,
            report_all,
            use_bound,
            bound_enabled: use_bound,
            best: None,
            solutions: vec![],
            lcm: Term::default(),
            bound: Integer::new(),
        }
    }

    pub fn run(&mut self, ideal: &Ideal) -> SliceStats {
        debug_assert_eq!(ideal.var_count(), self.grader.var_count());
        self.best = None;
        self.solutions.clear();

        self.bound_enabled = self.use_bound;
        if self.use_bound && !self.grader.has_positive_weight() {
            debug!("No variable has a positive weight: the degree bound is disabled");
            self.bound_enabled = false;
        }

        let params = self.params;
        run_slice_algorithm(self, &params, ideal)
    }

    pub fn best_value(&self) -> Option<&Integer> {
        self.best.as_ref()
    }

    pub fn solutions(&self) -> &[Term] {
        &self.solutions
    }

    pub fn into_result(self) -> OptimizeResult {
        OptimizeResult {
            value: self.best,
            solutions: self.solutions,
        }
    }

    /// Set `self.bound` to the largest degree of `q * m` with `m` strictly below the lcm.
    fn compute_bound(&mut self, slice: &mut Slice<MsmPolicy>) {
        self.lcm.clone_from(slice.lcm());
        self.bound = Integer::new();
        for (var, (l, q)) in self.lcm.iter().zip(slice.multiply().iter()).enumerate() {
            if *self.grader.weight(var) >= 0 {
                self.grader
                    .add_grade(var, q + l.saturating_sub(1), &mut self.bound);
            } else {
                self.grader.add_grade(var, *q, &mut self.bound);
            }
        }
    }

    /// Returns `true` if the content of the slice cannot contribute a solution.
    fn can_discard(&mut self, slice: &mut Slice<MsmPolicy>) -> bool {
        if !self.bound_enabled || self.best.is_none() {
            return false;
        }

        self.compute_bound(slice);
        match &self.best {
            Some(best) if self.report_all => self.bound < *best,
            Some(best) => self.bound <= *best,
            None => false,
        }
    }
}

impl StrategyVariant for OptimizeStrategy<'_> {
    type Policy = MsmPolicy;
    type Coefficient = ();

    fn base_case(&mut self, slice: &mut Slice<MsmPolicy>, out: &mut Vec<((), Term)>) -> bool {
        msm_base_case(slice, out)
    }

    fn consume(&mut self, _coef: (), term: &Term) {
        let degree = self.grader.degree(term);
        match &self.best {
            Some(best) if degree < *best => {}
            Some(best) if degree == *best => {
                if self.report_all {
                    self.solutions.push(term.clone());
                }
            }
            _ => {
                self.best = Some(degree);
                self.solutions.clear();
                self.solutions.push(term.clone());
            }
        }
    }

    fn prepare(&mut self, slice: &mut Slice<MsmPolicy>, simplify: bool) -> bool {
        if self.can_discard(slice) {
            return false;
        }

        if simplify {
            slice.simplify();
        }
        true
    }

    fn supports_label_split(&self) -> bool {
        true
    }

    fn supports_independence(&self) -> bool {
        false
    }

    fn grader(&self) -> Option<&TermGrader> {
        Some(self.grader)
    }
}

/// Computes the largest degree of a maximal standard monomial, which gives
/// the Frobenius number of an instance when the ideal is its initial ideal.
pub struct FrobeniusStrategy<'g> {
    optimizer: OptimizeStrategy<'g>,
}

impl<'g> FrobeniusStrategy<'g> {
    pub fn new(grader: &'g TermGrader, params: SliceParams) -> FrobeniusStrategy<'g> {
        let params = SliceParams {
            split: SplitStrategy::Frob,
            ..params
        };
        FrobeniusStrategy {
            optimizer: OptimizeStrategy::new(grader, params, false, true),
        }
    }

    /// The largest degree of a maximal standard monomial of `ideal` and one
    /// term that reaches it.
    pub fn run(&mut self, ideal: &Ideal) -> Option<(Integer, Term)> {
        self.optimizer.run(ideal);
        let value = self.optimizer.best_value()?.clone();
        let term = self.optimizer.solutions().first()?.clone();
        Some((value, term))
    }
}
