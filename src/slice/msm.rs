//! Maximal standard monomials.
//!
//! A standard monomial `m` of an ideal `I` is maximal if `m * x_i` lies in `I`
//! for every variable `x_i`. The maximal standard monomials of the artinian
//! closure of `I` correspond one to one with the irreducible components of `I`.

use super::{
    strategy::{run_slice_algorithm, SliceParams, SliceStats, StrategyVariant},
    MsmPolicy, Slice,
};
use crate::{
    consumer::TermConsumer,
    ideal::Ideal,
    term::{self, Term},
};

/// Push the maximal standard monomials of a two-variable slice, times its multiply.
fn two_var_base_case(slice: &mut Slice<MsmPolicy>, out: &mut Vec<((), Term)>) {
    let mut gens = slice.ideal().terms();
    gens.sort_unstable();

    let mut m = Term::new(2);
    for w in gens.windows(2) {
        m[0] = w[1][0] - 1;
        m[1] = w[0][1] - 1;
        if !slice.subtract().contains(&m) {
            let mut t = m.clone();
            t.mul_assign(slice.multiply());
            out.push(((), t));
        }
    }
}

/// Handle the slices whose maximal standard monomials can be read off directly.
/// The ideal of the slice must be minimally generated.
pub(crate) fn msm_base_case(slice: &mut Slice<MsmPolicy>, out: &mut Vec<((), Term)>) -> bool {
    if slice.is_trivially_empty() {
        return true;
    }

    if slice.is_artinian_pure_powers() {
        let mut m = slice.lcm().clone();
        term::decrement_support(&mut m);
        if !slice.subtract().contains(&m) {
            m.mul_assign(slice.multiply());
            out.push(((), m));
        }
        return true;
    }

    if slice.var_count() == 2 {
        two_var_base_case(slice, out);
        return true;
    }

    // with a square free lcm every maximal standard monomial is the
    // identity, which requires the ideal to be generated by the variables
    slice.lcm().is_square_free()
}

/// Computes the maximal standard monomials of an ideal.
pub struct MsmStrategy<'a, C: TermConsumer + ?Sized> {
    consumer: &'a mut C,
    params: SliceParams,
}

impl<'a, C: TermConsumer + ?Sized> MsmStrategy<'a, C> {
    pub fn new(consumer: &'a mut C, params: SliceParams) -> MsmStrategy<'a, C> {
        MsmStrategy { consumer, params }
    }

    /// Send the maximal standard monomials of `ideal` to the consumer.
    pub fn run(&mut self, ideal: &Ideal) -> SliceStats {
        let params = self.params;
        self.consumer.begin_consuming();
        let stats = run_slice_algorithm(self, &params, ideal);
        self.consumer.done_consuming();
        stats
    }
}

impl<C: TermConsumer + ?Sized> StrategyVariant for MsmStrategy<'_, C> {
    type Policy = MsmPolicy;
    type Coefficient = ();

    fn base_case(&mut self, slice: &mut Slice<MsmPolicy>, out: &mut Vec<((), Term)>) -> bool {
        msm_base_case(slice, out)
    }

    fn consume(&mut self, _coef: (), term: &Term) {
        self.consumer.consume(term);
    }

    fn supports_label_split(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::MsmStrategy;
    use crate::{
        consumer::CountingConsumer,
        ideal::Ideal,
        slice::{split::SplitStrategy, strategy::SliceParams},
        term::Term,
    };

    fn msm(ideal: &Ideal, params: SliceParams) -> Vec<Term> {
        let mut out: Vec<Term> = vec![];
        MsmStrategy::new(&mut out, params).run(ideal);
        out.sort();
        out
    }

    #[test]
    fn two_variables() {
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 1], [0, 2]]);
        assert_eq!(
            msm(&ideal, SliceParams::default()),
            vec![Term::from([1, 1]), Term::from([2, 0])]
        );
    }

    #[test]
    fn four_variables() {
        // <x^2, y^2, z^2, t, x z, y z>
        let ideal = Ideal::from_terms(
            4,
            [
                [2, 0, 0, 0],
                [0, 2, 0, 0],
                [0, 0, 2, 0],
                [0, 0, 0, 1],
                [1, 0, 1, 0],
                [0, 1, 1, 0],
            ],
        );

        for split in SplitStrategy::ALL {
            for use_independence in [false, true] {
                let params = SliceParams {
                    split,
                    use_independence,
                    ..Default::default()
                };
                assert_eq!(
                    msm(&ideal, params),
                    vec![Term::from([0, 0, 1, 0]), Term::from([1, 1, 0, 0])],
                    "{}",
                    split
                );
            }
        }
    }

    #[test]
    fn trivial_ideals() {
        assert_eq!(msm(&Ideal::new(0), SliceParams::default()), vec![Term::new(0)]);
        assert!(msm(&Ideal::new(3), SliceParams::default()).is_empty());
        assert!(msm(&Ideal::whole_ring(3), SliceParams::default()).is_empty());

        let vars = Ideal::from_terms(3, [[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        assert_eq!(msm(&vars, SliceParams::default()), vec![Term::new(3)]);
    }

    #[test]
    fn counting() {
        // <x, y>^3 has the maximal standard monomials of degree two
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 1], [1, 2], [0, 3]]);
        let mut counter = CountingConsumer::default();
        let stats = MsmStrategy::new(&mut counter, SliceParams::default()).run(&ideal);
        assert_eq!(counter.count, 3);
        assert!(stats.base_cases >= 1);
    }

    #[test]
    fn unminimized_input() {
        let ideal = Ideal::from_terms(2, [[3, 0], [2, 1], [0, 2], [3, 3], [2, 1]]);
        assert_eq!(
            msm(&ideal, SliceParams::default()),
            vec![Term::from([1, 1]), Term::from([2, 0])]
        );
    }
}
