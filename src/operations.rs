//! Computations on monomial ideals built on the Slice Algorithm.
//!
//! Decompositions and Alexander duals are read off the maximal standard
//! monomials of an artinian closure `I + <x_1^(a_1 + 1), ..., x_n^(a_n + 1)>`:
//! every such monomial `m` gives the irreducible component generated by the
//! `x_i^(m_i + 1)` with `m_i < a_i`, and the dual generator `x^(a - m)`.

use std::fmt;

use rug::Integer;
use tracing::{debug, instrument};

use crate::{
    consumer::TermConsumer,
    grader::TermGrader,
    ideal::Ideal,
    series::{MultigradedSeries, UnivariateSeries},
    slice::{
        hilbert::{HilbertBasecase, HilbertStrategy},
        msm::MsmStrategy,
        optimize::{FrobeniusStrategy, OptimizeResult, OptimizeStrategy},
        strategy::SliceParams,
    },
    term::{self, Exponent, Term},
};

/// Errors in the input of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The point of an Alexander dual is not divisible by the lcm of the ideal.
    PointDoesNotDominate,
    GradingLengthMismatch { expected: usize, found: usize },
    EmptyInstance,
    /// The instance has infinitely many non-representable numbers.
    UnboundedInstance,
    /// An exponent of the point is too large to exceed by one.
    ExponentOverflow { var: usize },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::PointDoesNotDominate => {
                write!(f, "The point is not divisible by the lcm of the ideal")
            }
            OperationError::GradingLengthMismatch { expected, found } => write!(
                f,
                "Expected a grading with {} entries, but found {}",
                expected, found
            ),
            OperationError::EmptyInstance => write!(f, "The instance is empty"),
            OperationError::UnboundedInstance => {
                write!(f, "The instance has no Frobenius number")
            }
            OperationError::ExponentOverflow { var } => {
                write!(f, "The exponent of variable {} is too large", var)
            }
        }
    }
}

impl std::error::Error for OperationError {}

fn minimized(ideal: &Ideal) -> Ideal {
    let mut i = ideal.clone();
    i.minimize();
    i
}

/// The maximal standard monomials of `I + <x_i^(point_i + 1)>`, sorted.
fn closure_msm(
    ideal: &Ideal,
    point: &[Exponent],
    params: &SliceParams,
) -> Result<Vec<Term>, OperationError> {
    let var_count = ideal.var_count();
    let mut closure = ideal.clone();
    for (var, p) in point.iter().enumerate() {
        let mut t = Term::new(var_count);
        t[var] = p
            .checked_add(1)
            .ok_or(OperationError::ExponentOverflow { var })?;
        closure.insert(&t);
    }

    let params = SliceParams {
        minimal: false,
        ..*params
    };
    let mut msm: Vec<Term> = vec![];
    MsmStrategy::new(&mut msm, params).run(&closure);
    msm.sort();
    Ok(msm)
}

/// The exponent vectors `b` of the irreducible components `<x_i^b_i : b_i > 0>`.
///
/// Panics if a generator has the exponent `Exponent::MAX`.
fn irreducible_exponents(ideal: &Ideal, params: &SliceParams) -> Vec<Term> {
    let ideal = minimized(ideal);
    let lcm = ideal.lcm();

    let mut components = match closure_msm(&ideal, &lcm, params) {
        Ok(c) => c,
        Err(e) => panic!("Cannot decompose the ideal: {}", e),
    };
    for m in &mut components {
        for (e, l) in m.iter_mut().zip(lcm.iter()) {
            *e = if *e < *l { *e + 1 } else { 0 };
        }
    }
    components
}

fn component_ideal(b: &[Exponent]) -> Ideal {
    let mut component = Ideal::new(b.len());
    for (var, e) in b.iter().enumerate() {
        if *e > 0 {
            let mut t = Term::new(b.len());
            t[var] = *e;
            component.insert(&t);
        }
    }
    component
}

/// Send the maximal standard monomials of `ideal` to `consumer`.
pub fn maximal_standard_monomials_into<C: TermConsumer + ?Sized>(
    ideal: &Ideal,
    params: &SliceParams,
    consumer: &mut C,
) {
    MsmStrategy::new(consumer, *params).run(ideal);
}

/// The ideal generated by the maximal standard monomials of `ideal`.
pub fn maximal_standard_monomials(ideal: &Ideal, params: &SliceParams) -> Ideal {
    let mut res = Ideal::new(ideal.var_count());
    maximal_standard_monomials_into(ideal, params, &mut res);
    res
}

/// The irredundant irreducible decomposition of `ideal`. The zero ideal is
/// its own single component and the whole ring has none.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count()))]
pub fn irreducible_decomposition(ideal: &Ideal, params: &SliceParams) -> Vec<Ideal> {
    let components: Vec<Ideal> = irreducible_exponents(ideal, params)
        .iter()
        .map(|b| component_ideal(b))
        .collect();
    debug!("{} irreducible components", components.len());
    components
}

/// The irredundant primary decomposition, obtained by intersecting the
/// irreducible components with the same support. The components are ordered
/// by their radicals.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count()))]
pub fn primary_decomposition(ideal: &Ideal, params: &SliceParams) -> Vec<Ideal> {
    let mut components = irreducible_exponents(ideal, params);
    components.sort_by_cached_key(|b| b.iter().map(|e| (*e).min(1)).collect::<Vec<_>>());

    let mut primary: Vec<(Term, Ideal)> = vec![];
    for b in &components {
        let mut support = b.clone();
        for e in support.iter_mut() {
            *e = (*e).min(1);
        }

        let c = component_ideal(b);
        match primary.last_mut() {
            Some((s, p)) if *s == support => *p = p.intersection(&c),
            _ => primary.push((support, c)),
        }
    }

    primary.into_iter().map(|(_, p)| p).collect()
}

/// The associated primes of `ideal`, each given by the square free product
/// of its variables, in ascending lexicographic order.
pub fn associated_primes(ideal: &Ideal, params: &SliceParams) -> Vec<Term> {
    let mut primes = irreducible_exponents(ideal, params);
    for p in &mut primes {
        for e in p.iter_mut() {
            *e = (*e).min(1);
        }
    }
    primes.sort();
    primes.dedup();
    primes
}

/// The Alexander dual of `ideal` with respect to `point`, or to the lcm of
/// the ideal if no point is given.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count()))]
pub fn alexander_dual(
    ideal: &Ideal,
    point: Option<&[Exponent]>,
    params: &SliceParams,
) -> Result<Ideal, OperationError> {
    let ideal = minimized(ideal);
    let lcm = ideal.lcm();
    let point = match point {
        Some(p) => {
            debug_assert_eq!(p.len(), ideal.var_count());
            if !term::divides(&lcm, p) {
                return Err(OperationError::PointDoesNotDominate);
            }
            Term::from_exponents(p)
        }
        None => lcm,
    };

    let mut dual = Ideal::new(ideal.var_count());
    let mut g = Term::new(ideal.var_count());
    for m in closure_msm(&ideal, &point, params)? {
        term::colon(&mut g, &point, &m);
        dual.insert(&g);
    }
    dual.minimize();
    Ok(dual)
}

/// The numerator of the multigraded Hilbert-Poincaré series of `S / ideal`.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count()))]
pub fn multigraded_hilbert_numerator(ideal: &Ideal, params: &SliceParams) -> MultigradedSeries {
    let var_count = ideal.var_count();
    let ideal = minimized(ideal);
    let mut series = MultigradedSeries::new(var_count);

    if var_count == 0 {
        if !ideal.contains_identity() {
            series.add(&Integer::from(1), &[]);
        }
        return series;
    }

    let mut shifted = ideal;
    shifted.product(&Term::from(vec![1; var_count]));

    series.add(&Integer::from(1), &Term::new(var_count));
    let params = SliceParams {
        minimal: true,
        ..*params
    };
    HilbertStrategy::new(&mut series, params).run(&shifted);
    series
}

/// The numerator of the Hilbert-Poincaré series of `S / ideal` where every
/// variable has degree one.
pub fn univariate_hilbert_numerator(ideal: &Ideal, params: &SliceParams) -> UnivariateSeries {
    multigraded_hilbert_numerator(ideal, params).to_univariate()
}

fn check_grading(grading: &[Integer], var_count: usize) -> Result<(), OperationError> {
    if grading.len() != var_count {
        return Err(OperationError::GradingLengthMismatch {
            expected: var_count,
            found: grading.len(),
        });
    }
    Ok(())
}

/// Maximize the degree under `grading` over the maximal standard monomials of
/// `ideal`. With `report_all` every optimal term is returned, otherwise one.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count()))]
pub fn optimize(
    ideal: &Ideal,
    grading: &[Integer],
    report_all: bool,
    use_bound: bool,
    params: &SliceParams,
) -> Result<OptimizeResult, OperationError> {
    check_grading(grading, ideal.var_count())?;

    let grader = TermGrader::new(grading, &ideal.lcm());
    let mut opt = OptimizeStrategy::new(&grader, *params, report_all, use_bound);
    opt.run(ideal);
    Ok(opt.into_result())
}

/// The Frobenius number of the instance `a_1 < ... < a_n`, given the initial
/// ideal of its lattice ideal in the variables of `a_2, ..., a_n` under a
/// degree order.
#[instrument(level = "debug", skip_all, fields(instance_len = instance.len()))]
pub fn frobenius_number(
    instance: &[Integer],
    initial_ideal: &Ideal,
    params: &SliceParams,
) -> Result<Integer, OperationError> {
    let Some((first, grading)) = instance.split_first() else {
        return Err(OperationError::EmptyInstance);
    };
    check_grading(grading, initial_ideal.var_count())?;

    let grader = TermGrader::new(grading, &initial_ideal.lcm());
    let (degree, term) = FrobeniusStrategy::new(&grader, *params)
        .run(initial_ideal)
        .ok_or(OperationError::UnboundedInstance)?;
    debug!("Largest degree {} reached by {:?}", degree, term.as_slice());

    Ok(degree - first)
}

pub fn intersection(a: &Ideal, b: &Ideal) -> Ideal {
    a.intersection(b)
}

/// The radical of `ideal`, minimally generated.
pub fn radical(ideal: &Ideal) -> Ideal {
    let mut r = ideal.clone();
    r.radical();
    r
}

/// The Krull dimension of `S / ideal`, or `None` for the whole ring.
pub fn dimension(ideal: &Ideal, params: &SliceParams) -> Option<usize> {
    let r = radical(ideal);
    if r.contains_identity() {
        return None;
    }

    let min_prime = associated_primes(&r, params)
        .iter()
        .map(|p| p.support_size())
        .min()?;
    Some(ideal.var_count() - min_prime)
}

/// The codimension of `ideal`, or `None` for the whole ring.
pub fn codimension(ideal: &Ideal, params: &SliceParams) -> Option<usize> {
    dimension(ideal, params).map(|d| ideal.var_count() - d)
}

/// The reduced Euler characteristic of the simplicial complex whose faces are
/// the square free monomials outside `ideal`.
pub fn euler_characteristic(ideal: &Ideal) -> Integer {
    let r = radical(ideal);
    let f = HilbertBasecase::new().compute(&r);
    if r.var_count() % 2 == 0 {
        -f
    } else {
        f
    }
}
