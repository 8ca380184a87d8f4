//! The driver of the Slice Algorithm.
//!
//! A computation is described by a [StrategyVariant], which decides what the
//! content of a slice is, recognizes base cases and receives the results. The
//! [SliceRunner] feeds slices through a [TaskEngine]: every slice is
//! simplified, then either handled as a base case or split into children that
//! are pushed back onto the engine.

use std::fmt;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rug::Integer;
use tracing::{debug, info, instrument};

use super::{
    engine::{TaskEngine, TaskRunner},
    independence::{IndependenceSplitter, Sink},
    split::{self, SplitStrategy},
    Slice, SlicePolicy,
};
use crate::{
    grader::TermGrader,
    ideal::Ideal,
    printer::{TermPrinter, VarNames},
    term::Term,
};

/// The seed of the random number generator that breaks ties between pivots.
pub const SPLIT_SEED: u64 = 0x5eed_c0de;

/// Slices kept for reuse.
const SLICE_POOL_MAX: usize = 64;

/// Settings of a run of the Slice Algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceParams {
    pub split: SplitStrategy,
    /// Detect slices whose generators fall apart into independent groups of variables.
    pub use_independence: bool,
    /// Simplify every slice before it is split.
    pub use_simplification: bool,
    /// The input ideal is known to be minimally generated.
    pub minimal: bool,
    /// Log every slice before and after it is split.
    pub print_debug: bool,
    /// Log statistics at the end of the run.
    pub print_stats: bool,
}

impl Default for SliceParams {
    fn default() -> Self {
        SliceParams {
            split: SplitStrategy::Median,
            use_independence: true,
            use_simplification: true,
            minimal: false,
            print_debug: false,
            print_stats: false,
        }
    }
}

impl SliceParams {
    pub fn with_split(split: SplitStrategy) -> SliceParams {
        SliceParams {
            split,
            ..Default::default()
        }
    }
}

/// The coefficient that accompanies every term of the content.
pub trait Coefficient: Clone + fmt::Debug {
    fn one() -> Self;
    fn mul_assign(&mut self, other: &Self);
}

impl Coefficient for () {
    #[inline]
    fn one() -> Self {}

    #[inline]
    fn mul_assign(&mut self, _other: &Self) {}
}

impl Coefficient for Integer {
    #[inline]
    fn one() -> Self {
        Integer::from(1)
    }

    #[inline]
    fn mul_assign(&mut self, other: &Self) {
        *self *= other;
    }
}

/// The behaviour that distinguishes one computation from another.
pub trait StrategyVariant {
    type Policy: SlicePolicy;
    type Coefficient: Coefficient;

    /// If `slice` is a base case, append its content, multiplied by the
    /// multiply of the slice, to `out` and return `true`.
    fn base_case(
        &mut self,
        slice: &mut Slice<Self::Policy>,
        out: &mut Vec<(Self::Coefficient, Term)>,
    ) -> bool;

    /// Receive a result of the computation.
    fn consume(&mut self, coef: Self::Coefficient, term: &Term);

    /// Prepare a slice for the base case test. Returns `false` if the slice
    /// can be discarded.
    fn prepare(&mut self, slice: &mut Slice<Self::Policy>, simplify: bool) -> bool {
        if simplify {
            slice.simplify();
        }
        true
    }

    fn supports_label_split(&self) -> bool {
        false
    }

    fn supports_independence(&self) -> bool {
        true
    }

    /// The grading that `SplitStrategy::Frob` follows.
    fn grader(&self) -> Option<&TermGrader> {
        None
    }
}

pub enum SliceTask<P: SlicePolicy> {
    Process { slice: Slice<P>, sink: Sink },
    /// All children of an independence split are done.
    FinishIndependence(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceStats {
    pub slices: usize,
    pub base_cases: usize,
    pub pivot_splits: usize,
    pub label_splits: usize,
    pub independence_splits: usize,
    pub discarded: usize,
}

impl fmt::Display for SliceStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "slices={}, base cases={}, pivot splits={}, label splits={}, independence splits={}, discarded={}",
            self.slices,
            self.base_cases,
            self.pivot_splits,
            self.label_splits,
            self.independence_splits,
            self.discarded
        )
    }
}

pub struct SliceRunner<'v, V: StrategyVariant> {
    variant: &'v mut V,
    params: SliceParams,
    rng: Xoshiro256StarStar,
    independence: IndependenceSplitter<V::Coefficient>,
    slice_pool: Vec<Slice<V::Policy>>,
    output: Vec<(V::Coefficient, Term)>,
    pivot: Term,
    stats: SliceStats,
}

impl<'v, V: StrategyVariant> SliceRunner<'v, V> {
    pub fn new(variant: &'v mut V, params: SliceParams) -> SliceRunner<'v, V> {
        SliceRunner {
            variant,
            params,
            rng: Xoshiro256StarStar::seed_from_u64(SPLIT_SEED),
            independence: IndependenceSplitter::new(),
            slice_pool: vec![],
            output: vec![],
            pivot: Term::default(),
            stats: SliceStats::default(),
        }
    }

    pub fn stats(&self) -> &SliceStats {
        &self.stats
    }

    fn new_slice(&mut self) -> Slice<V::Policy> {
        self.slice_pool.pop().unwrap_or_else(|| Slice::new(0))
    }

    fn recycle(&mut self, slice: Slice<V::Policy>) {
        if self.slice_pool.len() < SLICE_POOL_MAX {
            self.slice_pool.push(slice);
        }
    }

    /// Send the base case output to `sink`.
    fn emit(&mut self, sink: Sink) {
        let mut batch = std::mem::take(&mut self.output);
        if self.independence.route(sink, &mut batch) {
            for (c, t) in batch.drain(..) {
                self.variant.consume(c, &t);
            }
        }
        batch.clear();
        self.output = batch;
    }

    fn process(
        &mut self,
        mut slice: Slice<V::Policy>,
        sink: Sink,
        engine: &mut TaskEngine<SliceTask<V::Policy>>,
    ) {
        self.stats.slices += 1;

        if !self.independence.is_live(sink)
            || !self
                .variant
                .prepare(&mut slice, self.params.use_simplification)
        {
            self.stats.discarded += 1;
            self.recycle(slice);
            return;
        }

        if self.variant.base_case(&mut slice, &mut self.output) {
            self.stats.base_cases += 1;
            self.emit(sink);
            self.recycle(slice);
            return;
        }

        if self.params.use_independence && self.variant.supports_independence() {
            if let Some((id, children)) = self.independence.split(&slice, sink) {
                self.stats.independence_splits += 1;
                if self.params.print_debug {
                    debug!("Independence split of {} into {} parts", slice, children.len());
                }

                engine.add_task(SliceTask::FinishIndependence(id));
                for (child, s) in children.into_iter().enumerate().rev() {
                    engine.add_task(SliceTask::Process {
                        slice: s,
                        sink: Sink::Child { split: id, child },
                    });
                }
                self.recycle(slice);
                return;
            }
        }

        if self.params.split.is_label_split() && self.variant.supports_label_split() {
            self.label_split(slice, sink, engine);
        } else {
            self.pivot_split(slice, sink, engine);
        }
    }

    fn pivot_split(
        &mut self,
        mut slice: Slice<V::Policy>,
        sink: Sink,
        engine: &mut TaskEngine<SliceTask<V::Policy>>,
    ) {
        self.stats.pivot_splits += 1;
        split::select_pivot(
            self.params.split,
            &mut slice,
            &mut self.rng,
            self.variant.grader(),
            &mut self.pivot,
        );

        if self.params.print_debug {
            let names = VarNames::default();
            debug!(
                "Pivot split of {} on {}",
                slice,
                TermPrinter::new(&self.pivot, &names)
            );
        }

        let mut inner = self.new_slice();
        inner.clone_from(&slice);
        inner.inner_slice(&self.pivot);
        slice.outer_slice(&self.pivot);

        if self.params.print_debug {
            debug!("Inner slice {}", inner);
            debug!("Outer slice {}", slice);
        }

        engine.add_task(SliceTask::Process { slice, sink });
        engine.add_task(SliceTask::Process { slice: inner, sink });
    }

    /// Split on the generators that have exponent one in the chosen variable.
    fn label_split(
        &mut self,
        mut slice: Slice<V::Policy>,
        sink: Sink,
        engine: &mut TaskEngine<SliceTask<V::Policy>>,
    ) {
        let Some(var) = split::select_label_var(self.params.split, &mut slice) else {
            return self.pivot_split(slice, sink, engine);
        };
        self.stats.label_splits += 1;

        let lcm = slice.lcm().clone();
        let mut label: Option<Term> = None;
        let mut has_two_labels = false;
        let mut t = Term::new(slice.var_count());
        for g in slice.ideal().iter() {
            if g[var] != 1 {
                continue;
            }

            t.assign(g);
            t[var] = 0;
            if slice.subtract().contains(&t) || t.iter().zip(lcm.iter()).any(|(e, l)| e >= l) {
                continue;
            }

            if label.is_none() {
                label = Some(t.clone());
            } else {
                has_two_labels = true;
                break;
            }
        }

        if self.params.print_debug {
            debug!("Label split of {} on variable {}", slice, var);
        }

        let mut label_slice = None;
        if let Some(l) = &label {
            let mut s = self.new_slice();
            s.clone_from(&slice);
            s.inner_slice(l);
            if has_two_labels {
                slice.outer_slice(l);
            }
            label_slice = Some(s);
        }

        if !has_two_labels {
            self.pivot.reset(slice.var_count());
            self.pivot[var] = 1;
            slice.inner_slice(&self.pivot);
        }

        engine.add_task(SliceTask::Process { slice, sink });
        if let Some(s) = label_slice {
            engine.add_task(SliceTask::Process { slice: s, sink });
        }
    }
}

impl<V: StrategyVariant> TaskRunner<SliceTask<V::Policy>> for SliceRunner<'_, V> {
    fn run_task(
        &mut self,
        task: SliceTask<V::Policy>,
        engine: &mut TaskEngine<SliceTask<V::Policy>>,
    ) {
        match task {
            SliceTask::Process { slice, sink } => self.process(slice, sink, engine),
            SliceTask::FinishIndependence(id) => self.independence.finish(id),
        }
    }
}

/// Run the Slice Algorithm on `ideal`, sending the content to `variant`.
#[instrument(level = "debug", skip_all, fields(var_count = ideal.var_count(), generators = ideal.len(), split = %params.split))]
pub fn run_slice_algorithm<V: StrategyVariant>(
    variant: &mut V,
    params: &SliceParams,
    ideal: &Ideal,
) -> SliceStats {
    let mut slice = Slice::from_ideal(ideal.clone());
    if !params.minimal {
        slice.ideal_mut().minimize();
    }

    let mut runner = SliceRunner::new(variant, *params);
    let mut engine = TaskEngine::new();
    engine.add_task(SliceTask::Process {
        slice,
        sink: Sink::Root,
    });
    engine.run_tasks(&mut runner);

    debug_assert_eq!(runner.independence.active_count(), 0);
    if params.print_stats {
        info!("Slice Algorithm done: {}", runner.stats);
    }
    runner.stats
}
