use rug::Integer;

use crate::term::Exponent;

/// The degree of a term under a linear grading, with a lookup table of
/// `weight(var) * e` for the exponents that are expected to occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermGrader {
    weights: Vec<Integer>,
    grades: Vec<Vec<Integer>>,
}

impl TermGrader {
    /// Create a grader with a table up to `max_exponents[var]` for every variable.
    pub fn new(weights: &[Integer], max_exponents: &[Exponent]) -> TermGrader {
        debug_assert_eq!(weights.len(), max_exponents.len());
        let grades = weights
            .iter()
            .zip(max_exponents)
            .map(|(w, m)| (0..=*m).map(|e| Integer::from(w * e)).collect())
            .collect();

        TermGrader {
            weights: weights.to_vec(),
            grades,
        }
    }

    /// Create a grader without a table.
    pub fn from_weights(weights: &[Integer]) -> TermGrader {
        TermGrader {
            weights: weights.to_vec(),
            grades: vec![vec![]; weights.len()],
        }
    }

    #[inline]
    pub fn var_count(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weight(&self, var: usize) -> &Integer {
        &self.weights[var]
    }

    pub fn weights(&self) -> &[Integer] {
        &self.weights
    }

    /// Returns `true` if some variable has a positive weight.
    pub fn has_positive_weight(&self) -> bool {
        self.weights.iter().any(|w| *w > 0)
    }

    /// Add the grade of `x_var^exp` to `acc`.
    #[inline]
    pub fn add_grade(&self, var: usize, exp: Exponent, acc: &mut Integer) {
        match self.grades[var].get(exp as usize) {
            Some(g) => *acc += g,
            None => *acc += Integer::from(&self.weights[var] * exp),
        }
    }

    /// The grade of `x_var^exp`.
    pub fn grade(&self, var: usize, exp: Exponent) -> Integer {
        let mut g = Integer::new();
        self.add_grade(var, exp, &mut g);
        g
    }

    /// The degree of `term`.
    pub fn degree(&self, term: &[Exponent]) -> Integer {
        debug_assert_eq!(term.len(), self.var_count());
        let mut d = Integer::new();
        for (v, e) in term.iter().enumerate() {
            self.add_grade(v, *e, &mut d);
        }
        d
    }
}
