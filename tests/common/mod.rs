#![allow(dead_code)]

use monoslice::{
    ideal::Ideal,
    series::MultigradedSeries,
    term::{Exponent, Term},
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rug::Integer;

pub fn rng(seed: u64) -> Xoshiro256StarStar {
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// A random ideal in at most `max_vars` variables with small exponents.
pub fn random_ideal(rng: &mut impl Rng, max_vars: usize, max_gens: usize, max_exp: Exponent) -> Ideal {
    let var_count = rng.gen_range(1..=max_vars);
    let gen_count = rng.gen_range(1..=max_gens);

    let mut ideal = Ideal::new(var_count);
    let mut t = Term::new(var_count);
    for _ in 0..gen_count {
        for e in t.iter_mut() {
            *e = rng.gen_range(0..=max_exp);
        }
        if !t.is_identity() {
            ideal.insert(&t);
        }
    }
    ideal
}

/// Call `f` on every term that divides `bound`.
pub fn for_each_divisor(bound: &[Exponent], mut f: impl FnMut(&[Exponent])) {
    let mut t = vec![0; bound.len()];
    loop {
        f(&t);

        let mut i = 0;
        while i < t.len() && t[i] == bound[i] {
            t[i] = 0;
            i += 1;
        }
        if i == t.len() {
            return;
        }
        t[i] += 1;
    }
}

/// The maximal standard monomials, by testing every candidate below the lcm.
pub fn brute_force_msm(ideal: &Ideal) -> Vec<Term> {
    let lcm = ideal.lcm();
    if lcm.iter().any(|l| *l == 0) {
        return vec![];
    }

    let mut bound = lcm.clone();
    for e in bound.iter_mut() {
        *e -= 1;
    }

    let mut res = vec![];
    let mut n = Term::new(ideal.var_count());
    for_each_divisor(&bound, |m| {
        if ideal.contains(m) {
            return;
        }

        let maximal = (0..m.len()).all(|v| {
            n.assign(m);
            n[v] += 1;
            ideal.contains(&n)
        });
        if maximal {
            res.push(Term::from_exponents(m));
        }
    });
    res.sort();
    res
}

/// The numerator of the Hilbert-Poincaré series of `S / ideal`, from the
/// standard monomials below the lcm.
pub fn brute_force_hilbert(ideal: &Ideal) -> MultigradedSeries {
    let var_count = ideal.var_count();
    let lcm = ideal.lcm();
    let mut series = MultigradedSeries::new(var_count);

    let mut n = Term::new(var_count);
    for_each_divisor(&lcm, |m| {
        let mut coef = Integer::new();
        let support: Vec<usize> = (0..var_count).filter(|v| m[*v] > 0).collect();
        for mask in 0u32..1 << support.len() {
            n.assign(m);
            for (i, v) in support.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    n[*v] -= 1;
                }
            }

            if !ideal.contains(&n) {
                if mask.count_ones() % 2 == 0 {
                    coef += 1;
                } else {
                    coef -= 1;
                }
            }
        }
        series.add(&coef, m);
    });
    series
}
