use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::{Slice, SlicePolicy};
use crate::{
    grader::TermGrader,
    term::{self, Exponent, Term},
};

/// The rule that decides how a slice that is not a base case is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitStrategy {
    /// Pivot on the smallest exponent of the most frequent variable.
    Minimum,
    /// Pivot on the median exponent of the most frequent variable.
    #[default]
    Median,
    /// Pivot on the largest exponent of the most frequent variable.
    Maximum,
    /// Pivot on a generator of minimal support, decremented.
    MinGen,
    /// Pivot that separates two variables, aiming for an independence split.
    Indep,
    /// Pivot on the decremented gcd of a few generators.
    Gcd,
    Label,
    MinLabel,
    MaxLabel,
    VarLabel,
    /// Pivot that follows the grading of an optimization.
    Frob,
}

impl SplitStrategy {
    pub const ALL: [SplitStrategy; 11] = [
        SplitStrategy::Minimum,
        SplitStrategy::Median,
        SplitStrategy::Maximum,
        SplitStrategy::MinGen,
        SplitStrategy::Indep,
        SplitStrategy::Gcd,
        SplitStrategy::Label,
        SplitStrategy::MinLabel,
        SplitStrategy::MaxLabel,
        SplitStrategy::VarLabel,
        SplitStrategy::Frob,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SplitStrategy::Minimum => "minimum",
            SplitStrategy::Median => "median",
            SplitStrategy::Maximum => "maximum",
            SplitStrategy::MinGen => "mingen",
            SplitStrategy::Indep => "indep",
            SplitStrategy::Gcd => "gcd",
            SplitStrategy::Label => "label",
            SplitStrategy::MinLabel => "minlabel",
            SplitStrategy::MaxLabel => "maxlabel",
            SplitStrategy::VarLabel => "varlabel",
            SplitStrategy::Frob => "frob",
        }
    }

    pub fn is_label_split(&self) -> bool {
        matches!(
            self,
            SplitStrategy::Label
                | SplitStrategy::MinLabel
                | SplitStrategy::MaxLabel
                | SplitStrategy::VarLabel
        )
    }

    pub fn is_pivot_split(&self) -> bool {
        !self.is_label_split()
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SplitStrategy::ALL
            .iter()
            .find(|x| x.name() == s)
            .copied()
            .ok_or_else(|| format!("Unknown split strategy: {}", s))
    }
}

/// Pick a variable with lcm exponent at least two that appears in the most
/// generators. Ties are broken uniformly at random.
fn most_frequent_var<P: SlicePolicy, R: Rng>(slice: &mut Slice<P>, rng: &mut R) -> Option<usize> {
    let lcm = slice.lcm().clone();
    let counts = slice.ideal().support_counts();

    let mut best: Option<usize> = None;
    let mut ties = 0;
    for v in 0..lcm.var_count() {
        if lcm[v] < 2 {
            continue;
        }

        match best {
            Some(b) if counts[v] < counts[b] => {}
            Some(b) if counts[v] == counts[b] => {
                ties += 1;
                if rng.gen_range(0..ties) == 0 {
                    best = Some(v);
                }
            }
            _ => {
                best = Some(v);
                ties = 1;
            }
        }
    }

    best
}

/// Pick the variable with lcm exponent at least two of the largest grade at
/// one below the lcm, the first one on ties.
fn heaviest_var<P: SlicePolicy>(slice: &mut Slice<P>, grader: &TermGrader) -> Option<usize> {
    let lcm = slice.lcm();

    let mut best: Option<(usize, rug::Integer)> = None;
    for (v, l) in lcm.iter().enumerate() {
        if *l < 2 {
            continue;
        }

        let g = grader.grade(v, l - 1);
        if best.as_ref().map_or(true, |(_, bg)| g > *bg) {
            best = Some((v, g));
        }
    }

    best.map(|(v, _)| v)
}

/// The exponents of `var` over the generators that contain it, sorted.
fn var_exponents<P: SlicePolicy>(slice: &Slice<P>, var: usize) -> Vec<Exponent> {
    let mut exps: Vec<Exponent> = slice
        .ideal()
        .iter()
        .filter_map(|g| (g[var] > 0).then_some(g[var]))
        .collect();
    exps.sort_unstable();
    exps
}

fn pure_power_pivot<P: SlicePolicy>(
    strategy: SplitStrategy,
    slice: &mut Slice<P>,
    var: usize,
    pivot: &mut Term,
) {
    let exps = var_exponents(slice, var);
    let e = match strategy {
        SplitStrategy::Minimum => exps[0],
        SplitStrategy::Maximum => exps[exps.len() - 1],
        _ => exps[exps.len() / 2],
    };

    let max = slice.lcm()[var] - 1;
    pivot.reset(slice.var_count());
    pivot[var] = e.clamp(1, max);
}

fn gcd_pivot<P: SlicePolicy, R: Rng>(
    slice: &Slice<P>,
    var: usize,
    rng: &mut R,
    pivot: &mut Term,
) {
    let candidates: Vec<usize> = slice
        .ideal()
        .iter()
        .enumerate()
        .filter_map(|(i, g)| (g[var] >= 2).then_some(i))
        .collect();

    let amount = candidates.len().min(3);
    let mut first = true;
    for i in rand::seq::index::sample(rng, candidates.len(), amount) {
        let g = slice.ideal().get(candidates[i]);
        if first {
            pivot.assign(g);
            first = false;
        } else {
            pivot.gcd_assign(g);
        }
    }

    term::decrement_support(pivot);
}

fn min_gen_pivot<P: SlicePolicy>(slice: &Slice<P>, pivot: &mut Term) -> bool {
    let mut best: Option<&[Exponent]> = None;
    for g in slice.ideal().iter() {
        if term::is_square_free(g) {
            continue;
        }

        if best.map_or(true, |b| term::support_size(g) < term::support_size(b)) {
            best = Some(g);
        }
    }

    match best {
        Some(g) => {
            pivot.assign(g);
            term::decrement_support(pivot);
            true
        }
        None => false,
    }
}

/// Try random pairs of variables for a pivot whose outer slice removes every
/// generator that contains both.
fn independence_pivot<P: SlicePolicy, R: Rng>(
    slice: &Slice<P>,
    rng: &mut R,
    pivot: &mut Term,
) -> bool {
    let var_count = slice.var_count();
    if var_count < 2 {
        return false;
    }

    for _ in 0..2 * var_count {
        let u = rng.gen_range(0..var_count);
        let w = rng.gen_range(0..var_count - 1);
        let w = if w >= u { w + 1 } else { w };

        let mut found = false;
        let (mut gu, mut gw) = (0, 0);
        for g in slice.ideal().iter() {
            if g[u] == 0 || g[w] == 0 {
                continue;
            }

            if found {
                gu = gu.min(g[u]);
                gw = gw.min(g[w]);
            } else {
                gu = g[u];
                gw = g[w];
                found = true;
            }
        }

        if found && (gu > 1 || gw > 1) {
            pivot.reset(var_count);
            pivot[u] = gu - 1;
            pivot[w] = gw - 1;
            return true;
        }
    }

    false
}

/// Select the pivot for a pivot split. The pivot is never the identity and
/// each exponent is below the corresponding lcm exponent, so that both the
/// inner and the outer slice are strictly smaller than the slice.
///
/// Label strategies, and `Frob` without a grader, fall back to `Median`.
pub fn select_pivot<P: SlicePolicy, R: Rng>(
    strategy: SplitStrategy,
    slice: &mut Slice<P>,
    rng: &mut R,
    grader: Option<&TermGrader>,
    pivot: &mut Term,
) {
    pivot.reset(slice.var_count());
    let var = match (strategy, grader) {
        (SplitStrategy::Frob, Some(grader)) => heaviest_var(slice, grader),
        _ => most_frequent_var(slice, rng),
    };

    let Some(var) = var else {
        panic!("Pivot requested for a slice with a square free lcm");
    };

    match strategy {
        SplitStrategy::Minimum | SplitStrategy::Maximum => {
            pure_power_pivot(strategy, slice, var, pivot)
        }
        SplitStrategy::Gcd => gcd_pivot(slice, var, rng, pivot),
        SplitStrategy::MinGen => {
            if !min_gen_pivot(slice, pivot) {
                pure_power_pivot(SplitStrategy::Median, slice, var, pivot);
            }
        }
        SplitStrategy::Indep => {
            if !independence_pivot(slice, rng, pivot) {
                pure_power_pivot(SplitStrategy::Median, slice, var, pivot);
            }
        }
        _ => pure_power_pivot(SplitStrategy::Median, slice, var, pivot),
    }

    debug_assert!(!pivot.is_identity());
}

/// Select the variable of a label split, or `None` if no variable has an lcm
/// exponent of at least two.
pub fn select_label_var<P: SlicePolicy>(strategy: SplitStrategy, slice: &mut Slice<P>) -> Option<usize> {
    let lcm = slice.lcm().clone();
    let counts = slice.ideal().support_counts();

    let mut best: Option<usize> = None;
    for v in (0..lcm.var_count()).filter(|v| lcm[*v] >= 2) {
        let better = match best {
            None => true,
            Some(b) => match strategy {
                SplitStrategy::MinLabel => counts[v] < counts[b],
                SplitStrategy::VarLabel => false,
                _ => counts[v] > counts[b],
            },
        };

        if better {
            best = Some(v);
        }
    }

    best
}
