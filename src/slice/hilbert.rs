//! Hilbert-Poincaré series numerators.
//!
//! The content of a Hilbert slice is the polynomial `sum c_m * m` over the
//! standard monomials `m` of its ideal, where `c_m` is the alternating sum
//! `sum_G (-1)^(n - |G|) [m * x^G not in I]` over all subsets `G` of the
//! variables. The numerator of the Hilbert-Poincaré series of `S/I` is
//! `1 + content(x_1 * ... * x_n * I)`.

use rug::Integer;

use super::{
    strategy::{run_slice_algorithm, SliceParams, SliceStats, StrategyVariant},
    HilbertPolicy, Slice,
};
use crate::{
    consumer::CoefTermConsumer,
    ideal::Ideal,
    term::{self, Term},
};

struct BasecaseEntry {
    ideal: Ideal,
    active: Vec<bool>,
    negate: bool,
}

/// Computes `f(I) = sum_G (-1)^(n - |G|) [x^G not in I]` for a square free
/// ideal `I`, which is the content of `I` at the identity.
///
/// The computation eliminates one variable at a time without recursion. With
/// a generator `x_v`, `f(I) = -f(I without the multiples of x_v)`; otherwise
/// `f(I) = f(I : x_v) - f(I without the multiples of x_v)` for the most
/// frequent variable `x_v`.
#[derive(Default)]
pub struct HilbertBasecase {
    stack: Vec<BasecaseEntry>,
    counts: Term,
}

impl HilbertBasecase {
    pub fn new() -> HilbertBasecase {
        HilbertBasecase::default()
    }

    /// Compute `f(ideal)`. The ideal must be square free and minimally generated.
    pub fn compute(&mut self, ideal: &Ideal) -> Integer {
        debug_assert!(ideal.is_square_free());

        let var_count = ideal.var_count();
        let mut sum = Integer::new();
        self.stack.push(BasecaseEntry {
            ideal: ideal.clone(),
            active: vec![true; var_count],
            negate: false,
        });

        while let Some(mut e) = self.stack.pop() {
            loop {
                if e.ideal.contains_identity() {
                    break;
                }

                e.ideal.support_counts_into(&mut self.counts);
                let counts = &self.counts;
                if e.active.iter().zip(counts.iter()).any(|(a, c)| *a && *c == 0) {
                    break;
                }

                if e.active.iter().all(|a| !a) {
                    if e.negate {
                        sum -= 1;
                    } else {
                        sum += 1;
                    }
                    break;
                }

                let pure = e.ideal.iter().find_map(term::pure_power_variable);
                if let Some(var) = pure {
                    e.ideal.remove_if(|g| g[var] > 0);
                    e.active[var] = false;
                    e.negate = !e.negate;
                    continue;
                }

                let mut var = 0;
                for (v, c) in counts.iter().enumerate() {
                    if e.active[v] && *c > counts[var] {
                        var = v;
                    }
                }
                if !e.active[var] {
                    var = e.active.iter().position(|a| *a).unwrap_or(0);
                }

                let mut without = e.ideal.clone();
                without.remove_if(|g| g[var] > 0);
                let mut active = e.active.clone();
                active[var] = false;
                self.stack.push(BasecaseEntry {
                    ideal: without,
                    active,
                    negate: !e.negate,
                });

                e.ideal.colon_reminimize(&Term::variable(var_count, var));
                e.active[var] = false;
            }
        }

        sum
    }
}

/// Handle the Hilbert slices whose content can be written down directly.
/// The ideal of the slice must be minimally generated.
fn hilbert_base_case(
    slice: &mut Slice<HilbertPolicy>,
    basecase: &mut HilbertBasecase,
    out: &mut Vec<(Integer, Term)>,
) -> bool {
    if slice.is_trivially_empty() {
        return true;
    }

    let var_count = slice.var_count();
    if slice.is_artinian_pure_powers() {
        let mut m = slice.lcm().clone();
        term::decrement_support(&mut m);
        if !slice.subtract().contains(&m) {
            m.mul_assign(slice.multiply());
            let sign = if var_count % 2 == 0 { 1 } else { -1 };
            out.push((Integer::from(sign), m));
        }
        return true;
    }

    if var_count == 2 {
        let mut gens = slice.ideal().terms();
        gens.sort_unstable();

        let mut m = Term::new(2);
        let push = |m: &Term, coef: i32, out: &mut Vec<(Integer, Term)>| {
            if !slice.subtract().contains(m) {
                let mut t = m.clone();
                t.mul_assign(slice.multiply());
                out.push((Integer::from(coef), t));
            }
        };

        for w in gens.windows(2) {
            m[0] = w[1][0] - 1;
            m[1] = w[0][1] - 1;
            push(&m, 1, out);
        }

        for g in &gens {
            if g[0] > 0 && g[1] > 0 {
                m[0] = g[0] - 1;
                m[1] = g[1] - 1;
                push(&m, -1, out);
            }
        }
        return true;
    }

    if slice.lcm().is_square_free() {
        let f = basecase.compute(slice.ideal());
        if f != 0 {
            out.push((f, slice.multiply().clone()));
        }
        return true;
    }

    false
}

/// Computes the content of Hilbert slices, which sums to the numerator of
/// the Hilbert-Poincaré series.
pub struct HilbertStrategy<'a, C: CoefTermConsumer + ?Sized> {
    consumer: &'a mut C,
    params: SliceParams,
    basecase: HilbertBasecase,
}

impl<'a, C: CoefTermConsumer + ?Sized> HilbertStrategy<'a, C> {
    pub fn new(consumer: &'a mut C, params: SliceParams) -> HilbertStrategy<'a, C> {
        HilbertStrategy {
            consumer,
            params,
            basecase: HilbertBasecase::new(),
        }
    }

    /// Send the content of `ideal` to the consumer. Terms may repeat.
    pub fn run(&mut self, ideal: &Ideal) -> SliceStats {
        let params = self.params;
        self.consumer.begin_consuming();
        let stats = run_slice_algorithm(self, &params, ideal);
        self.consumer.done_consuming();
        stats
    }
}

impl<C: CoefTermConsumer + ?Sized> StrategyVariant for HilbertStrategy<'_, C> {
    type Policy = HilbertPolicy;
    type Coefficient = Integer;

    fn base_case(
        &mut self,
        slice: &mut Slice<HilbertPolicy>,
        out: &mut Vec<(Integer, Term)>,
    ) -> bool {
        hilbert_base_case(slice, &mut self.basecase, out)
    }

    fn consume(&mut self, coef: Integer, term: &Term) {
        self.consumer.consume(&coef, term);
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use super::{HilbertBasecase, HilbertStrategy};
    use crate::{
        ideal::Ideal,
        series::MultigradedSeries,
        slice::{split::SplitStrategy, strategy::SliceParams},
        term::Term,
    };

    /// `f(I)` by summing over all subsets of the variables.
    fn brute_force(ideal: &Ideal) -> Integer {
        let n = ideal.var_count();
        let mut sum = Integer::new();
        for mask in 0u32..1 << n {
            let t: Vec<u32> = (0..n).map(|v| (mask >> v) & 1).collect();
            if !ideal.contains(&t) {
                if (n - mask.count_ones() as usize) % 2 == 0 {
                    sum += 1;
                } else {
                    sum -= 1;
                }
            }
        }
        sum
    }

    /// `f(I) = f(I : x_v) - f(I without x_v)` over the active variables.
    fn recursive(ideal: &Ideal, active: &[bool]) -> Integer {
        if ideal.contains_identity() {
            return Integer::new();
        }

        let Some(var) = active.iter().position(|a| *a) else {
            return Integer::from(1);
        };

        let mut rest = active.to_vec();
        rest[var] = false;

        let mut colon = ideal.clone();
        colon.colon_reminimize(&Term::variable(ideal.var_count(), var));
        let mut without = ideal.clone();
        without.remove_if(|g| g[var] > 0);

        recursive(&colon, &rest) - recursive(&without, &rest)
    }

    #[test]
    fn basecase_agrees() {
        let ideals = [
            Ideal::from_terms(3, [[1, 1, 0], [0, 1, 1], [1, 0, 1]]),
            Ideal::from_terms(4, [[1, 1, 0, 0], [0, 0, 1, 1]]),
            Ideal::from_terms(4, [[1, 0, 0, 0], [0, 1, 1, 0], [0, 0, 1, 1]]),
            Ideal::from_terms(5, [[1, 1, 1, 0, 0], [0, 0, 1, 1, 1], [1, 0, 0, 0, 1], [0, 1, 0, 1, 0]]),
            Ideal::from_terms(3, [[0, 0, 0]]),
            Ideal::new(3),
        ];

        let mut basecase = HilbertBasecase::new();
        for i in &ideals {
            let expected = brute_force(i);
            assert_eq!(basecase.compute(i), expected, "{:?}", i);
            assert_eq!(recursive(i, &vec![true; i.var_count()]), expected, "{:?}", i);
        }

        // the zero ideal has every subset as a face, which cancels out
        assert_eq!(basecase.compute(&Ideal::new(3)), 0);
        assert_eq!(basecase.compute(&Ideal::new(0)), 1);
    }

    fn numerator(ideal: &Ideal, params: SliceParams) -> MultigradedSeries {
        let mut shifted = ideal.clone();
        shifted.minimize();
        shifted.product(&vec![1; ideal.var_count()]);

        let mut series = MultigradedSeries::new(ideal.var_count());
        series.add(&Integer::from(1), &vec![0; ideal.var_count()]);
        HilbertStrategy::new(&mut series, params).run(&shifted);
        series
    }

    #[test]
    fn two_variables() {
        // 1 - x^2 - y^2 + x^2 y^2 for <x^2, y^2>
        let s = numerator(&Ideal::from_terms(2, [[2, 0], [0, 2]]), SliceParams::default());
        assert_eq!(s.len(), 4);
        assert_eq!(s.coefficient(&[0, 0]), 1);
        assert_eq!(s.coefficient(&[2, 0]), -1);
        assert_eq!(s.coefficient(&[0, 2]), -1);
        assert_eq!(s.coefficient(&[2, 2]), 1);

        // 1 - x y for <x y>
        let s = numerator(&Ideal::from_terms(2, [[1, 1]]), SliceParams::default());
        assert_eq!(s.len(), 2);
        assert_eq!(s.coefficient(&[1, 1]), -1);
    }

    #[test]
    fn strategies_agree() {
        let ideal = Ideal::from_terms(
            4,
            [
                [2, 0, 0, 0],
                [0, 2, 0, 0],
                [1, 0, 1, 0],
                [0, 1, 1, 0],
                [0, 0, 1, 2],
                [1, 1, 0, 1],
            ],
        );

        let expected = numerator(&ideal, SliceParams {
            use_independence: false,
            ..Default::default()
        });
        for split in SplitStrategy::ALL {
            for use_independence in [false, true] {
                let params = SliceParams {
                    split,
                    use_independence,
                    ..Default::default()
                };
                assert_eq!(numerator(&ideal, params), expected, "{}", split);
            }
        }

        // 1 - x^2 - y^2 - xz - yz - z t^2 - x y t + ...
        assert_eq!(expected.coefficient(&[2, 0, 0, 0]), -1);
        assert_eq!(expected.coefficient(&[1, 1, 0, 1]), -1);
        assert_eq!(expected.coefficient(&[0, 0, 0, 0]), 1);
    }

    #[test]
    fn trivial_ideals() {
        let s = numerator(&Ideal::new(3), SliceParams::default());
        assert_eq!(s.len(), 1);
        assert_eq!(s.coefficient(&[0, 0, 0]), 1);

        let s = numerator(&Ideal::whole_ring(3), SliceParams::default());
        assert!(s.is_zero());
    }
}
