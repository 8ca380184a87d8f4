mod common;

use common::{random_ideal, rng};
use monoslice::{
    ideal::Ideal,
    operations::{self, OperationError},
    slice::{split::SplitStrategy, strategy::SliceParams},
    term::{self, Term},
};
use rug::Integer;

fn intersect_all(var_count: usize, ideals: &[Ideal]) -> Ideal {
    let mut res = Ideal::whole_ring(var_count);
    for i in ideals {
        res = res.intersection(i);
    }
    res
}

#[test]
fn decomposition_scenario() {
    // <x^2, y^2, x z, y z> = <x, y> and <x^2, y^2, z>
    let ideal = Ideal::from_terms(4, [[2, 0, 0, 0], [0, 2, 0, 0], [1, 0, 1, 0], [0, 1, 1, 0]]);
    for split in SplitStrategy::ALL {
        let params = SliceParams::with_split(split);
        let components = operations::irreducible_decomposition(&ideal, &params);
        assert_eq!(components.len(), 2, "{}", split);
        assert!(components[0].same_generators(&Ideal::from_terms(4, [[1, 0, 0, 0], [0, 1, 0, 0]])));
        assert!(components[1].same_generators(&Ideal::from_terms(
            4,
            [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 1, 0]]
        )));
    }

    let msm = operations::maximal_standard_monomials(
        &Ideal::from_terms(
            4,
            [
                [2, 0, 0, 0],
                [0, 2, 0, 0],
                [0, 0, 2, 0],
                [0, 0, 0, 1],
                [1, 0, 1, 0],
                [0, 1, 1, 0],
            ],
        ),
        &SliceParams::default(),
    );
    assert!(msm.same_generators(&Ideal::from_terms(4, [[1, 1, 0, 0], [0, 0, 1, 0]])));
}

#[test]
fn decompositions_intersect_to_the_ideal() {
    let mut rng = rng(11);
    for _ in 0..50 {
        let ideal = random_ideal(&mut rng, 4, 6, 3);
        let mut minimized = ideal.clone();
        minimized.minimize();
        let params = SliceParams::default();

        let irreducible = operations::irreducible_decomposition(&ideal, &params);
        for c in &irreducible {
            assert!(c.iter().all(|g| term::pure_power_variable(g).is_some()));
        }
        let back = intersect_all(ideal.var_count(), &irreducible);
        assert!(back.same_generators(&minimized), "{:?}", ideal);

        let primary = operations::primary_decomposition(&ideal, &params);
        let back = intersect_all(ideal.var_count(), &primary);
        assert!(back.same_generators(&minimized), "{:?}", ideal);

        // the primary components have distinct radicals, which are the associated primes
        let primes = operations::associated_primes(&ideal, &params);
        assert_eq!(primes.len(), primary.len());
        let mut radicals: Vec<Term> = primary.iter().map(|p| operations::radical(p).lcm()).collect();
        radicals.sort();
        assert_eq!(radicals, primes);
    }
}

#[test]
fn alexander_duality_is_an_involution() {
    let mut rng = rng(29);
    for _ in 0..50 {
        let ideal = random_ideal(&mut rng, 4, 6, 3);
        let mut minimized = ideal.clone();
        minimized.minimize();

        let mut point = ideal.lcm();
        for e in point.iter_mut() {
            *e += 1;
        }

        let params = SliceParams::default();
        let dual = operations::alexander_dual(&ideal, Some(point.as_slice()), &params).unwrap();
        let back = operations::alexander_dual(&dual, Some(point.as_slice()), &params).unwrap();
        assert!(back.same_generators(&minimized), "{:?}", ideal);
    }

    let ideal = Ideal::from_terms(2, [[2, 1]]);
    assert_eq!(
        operations::alexander_dual(&ideal, Some(&[1, 1][..]), &SliceParams::default()).err(),
        Some(OperationError::PointDoesNotDominate)
    );
}

#[test]
fn dimension_and_euler_characteristic() {
    let mut rng = rng(41);
    for _ in 0..50 {
        let ideal = random_ideal(&mut rng, 5, 6, 2);
        let n = ideal.var_count();
        let radical = operations::radical(&ideal);

        // the faces of the complex are the square free monomials outside the radical
        let mut euler = Integer::from(if radical.contains_identity() { 0 } else { -1 });
        let mut max_face = None;
        for mask in 1u32..1 << n {
            let face: Vec<u32> = (0..n).map(|v| (mask >> v) & 1).collect();
            if !radical.contains(&face) {
                let size = mask.count_ones() as usize;
                if size % 2 == 1 {
                    euler += 1;
                } else {
                    euler -= 1;
                }
                max_face = max_face.max(Some(size));
            }
        }

        assert_eq!(operations::euler_characteristic(&ideal), euler, "{:?}", ideal);

        let expected_dim = if radical.contains_identity() {
            None
        } else {
            Some(max_face.unwrap_or(0))
        };
        assert_eq!(
            operations::dimension(&ideal, &SliceParams::default()),
            expected_dim,
            "{:?}",
            ideal
        );
    }
}

#[test]
fn frobenius_numbers_of_two_generators() {
    let params = SliceParams::default();
    for a in 2u32..9 {
        for b in a + 1..20 {
            if Integer::from(a).gcd(&Integer::from(b)) != 1 {
                continue;
            }

            let instance = [Integer::from(a), Integer::from(b)];
            let ideal = Ideal::from_terms(1, [[a]]);
            let f = operations::frobenius_number(&instance, &ideal, &params).unwrap();
            assert_eq!(f, Integer::from(a * b) - a - b);
        }
    }

    assert_eq!(
        operations::frobenius_number(&[Integer::from(3), Integer::from(5)], &Ideal::new(2), &params),
        Err(OperationError::GradingLengthMismatch {
            expected: 2,
            found: 1
        })
    );
}
