//! Splitting a slice into slices over disjoint sets of variables.
//!
//! If the generators of a slice can be partitioned so that no two parts share
//! a variable, the content of the slice is the set of products of the contents
//! of the parts. Each part is solved as a slice of its own, over a projection
//! onto its variables. All children except the last one buffer their results;
//! every result of the last child is combined with the cross product of the
//! buffers and sent on to the sink of the split slice.

use smallvec::SmallVec;

use super::{projection::Projection, strategy::Coefficient, Slice, SlicePolicy};
use crate::{
    ideal::Ideal,
    term::{Exponent, Term, INLINED_EXPONENTS},
};

/// Where the results of a slice are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// The consumer of the whole computation.
    Root,
    /// Child `child` of the independence split `split`.
    Child { split: usize, child: usize },
}

/// Disjoint-set forest over the variables, joined by the support of the generators.
struct VarPartition {
    parents: SmallVec<[usize; INLINED_EXPONENTS]>,
}

impl VarPartition {
    fn new(var_count: usize) -> VarPartition {
        VarPartition {
            parents: (0..var_count).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        // path halving
        while self.parents[i] != i {
            let grandparent = self.parents[self.parents[i]];
            self.parents[i] = grandparent;
            i = grandparent;
        }
        i
    }

    /// The smaller root becomes a child of the larger one.
    fn union(&mut self, u: usize, v: usize) -> bool {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return false;
        }

        let (child, parent) = if ru < rv { (ru, rv) } else { (rv, ru) };
        self.parents[child] = parent;
        true
    }

    fn join_support(&mut self, term: &[Exponent]) {
        let mut first = None;
        for (v, e) in term.iter().enumerate() {
            if *e == 0 {
                continue;
            }

            match first {
                Some(f) => {
                    self.union(f, v);
                }
                None => first = Some(v),
            }
        }
    }

    /// A split pays off when some part has two variables or when at least two
    /// parts have more than two. Single-variable parts do not count.
    fn is_worth_splitting(&mut self) -> bool {
        let n = self.parents.len();
        let mut sizes = vec![0usize; n];
        for v in 0..n {
            let r = self.find(v);
            sizes[r] += 1;
        }

        sizes.iter().any(|s| *s == 2) || sizes.iter().filter(|s| **s > 2).count() > 1
    }

    /// The parts with more than one variable ordered by their smallest
    /// variable, followed by the union of all single-variable parts.
    fn parts(&mut self) -> Vec<Vec<usize>> {
        let n = self.parents.len();
        let mut sizes = vec![0usize; n];
        for v in 0..n {
            let r = self.find(v);
            sizes[r] += 1;
        }

        let mut index_of_root = vec![usize::MAX; n];
        let mut parts: Vec<Vec<usize>> = vec![];
        let mut singletons = vec![];
        for v in 0..n {
            let r = self.find(v);
            if sizes[r] == 1 {
                singletons.push(v);
                continue;
            }

            if index_of_root[r] == usize::MAX {
                index_of_root[r] = parts.len();
                parts.push(vec![]);
            }
            parts[index_of_root[r]].push(v);
        }

        if !singletons.is_empty() {
            parts.push(singletons);
        }
        parts
    }
}

/// The bookkeeping of one independence split.
struct IndependenceRecord<C> {
    parent: Sink,
    /// The multiply of the split slice.
    multiply: Term,
    /// Subtract generators that involve variables of more than one child.
    mixed_subtract: Ideal,
    projections: Vec<Projection>,
    /// The results of all but the last child, embedded in the split slice.
    buffers: Vec<Vec<(C, Term)>>,
}

impl<C: Coefficient> IndependenceRecord<C> {
    fn child_count(&self) -> usize {
        self.projections.len()
    }

    /// Combine the results of the last child with all buffered results.
    fn combine(&self, batch: &[(C, Term)], out: &mut Vec<(C, Term)>) {
        if self.buffers.iter().any(|b| b.is_empty()) {
            return;
        }

        let last = &self.projections[self.child_count() - 1];
        let mut base = Term::new(last.super_var_count());
        let mut product = Term::new(last.super_var_count());
        let mut odometer = vec![0; self.buffers.len()];

        for (coef, t) in batch {
            last.inverse_project(&mut base, t);
            odometer.iter_mut().for_each(|x| *x = 0);

            'cross: loop {
                product.assign(&base);
                let mut c = coef.clone();
                for (b, i) in self.buffers.iter().zip(&odometer) {
                    product.mul_assign(&b[*i].1);
                    c.mul_assign(&b[*i].0);
                }

                if !self.mixed_subtract.contains(&product) {
                    product.mul_assign(&self.multiply);
                    out.push((c, product.clone()));
                }

                for (b, i) in self.buffers.iter().zip(odometer.iter_mut()) {
                    *i += 1;
                    if *i < b.len() {
                        continue 'cross;
                    }
                    *i = 0;
                }
                break;
            }
        }
    }
}

/// Detects independence splits and reassembles the results of their children.
pub struct IndependenceSplitter<C> {
    records: Vec<Option<IndependenceRecord<C>>>,
    free_records: Vec<usize>,
    scratch: Vec<(C, Term)>,
}

impl<C: Coefficient> IndependenceSplitter<C> {
    pub fn new() -> IndependenceSplitter<C> {
        IndependenceSplitter {
            records: vec![],
            free_records: vec![],
            scratch: vec![],
        }
    }

    /// The number of splits whose children are not finished.
    pub fn active_count(&self) -> usize {
        self.records.len() - self.free_records.len()
    }

    fn record(&self, split: usize) -> &IndependenceRecord<C> {
        match &self.records[split] {
            Some(r) => r,
            None => panic!("Independence split {} is not active", split),
        }
    }

    fn record_mut(&mut self, split: usize) -> &mut IndependenceRecord<C> {
        match &mut self.records[split] {
            Some(r) => r,
            None => panic!("Independence split {} is not active", split),
        }
    }

    /// Split `slice` into independent children if its variables can be
    /// partitioned. Returns the identifier of the split and the children,
    /// which all have the identity as multiply.
    pub fn split<P: SlicePolicy>(
        &mut self,
        slice: &Slice<P>,
        sink: Sink,
    ) -> Option<(usize, Vec<Slice<P>>)> {
        let var_count = slice.var_count();
        if var_count < 2 {
            return None;
        }

        let mut partition = VarPartition::new(var_count);
        for g in slice.ideal().iter() {
            partition.join_support(g);
        }

        if !partition.is_worth_splitting() {
            return None;
        }

        let parts = partition.parts();
        if parts.len() < 2 {
            return None;
        }

        let projections: Vec<Projection> = parts
            .iter()
            .map(|p| Projection::new(var_count, p))
            .collect();

        let mut children: Vec<Slice<P>> = projections
            .iter()
            .map(|p| Slice::new(p.var_count()))
            .collect();

        let mut local: Vec<Exponent> = vec![];
        for g in slice.ideal().iter() {
            // the support of a generator lies within a single part, and the
            // identity is never a generator of a slice that is not a base case
            let Some(c) = projections.iter().position(|p| p.covers_support(g)) else {
                panic!("Generator crosses an independence split");
            };
            local.resize(projections[c].var_count(), 0);
            projections[c].project(&mut local, g);
            children[c].ideal_mut().insert(&local);
        }

        let mut mixed_subtract = Ideal::new(var_count);
        for s in slice.subtract().iter() {
            match projections.iter().position(|p| p.covers_support(s)) {
                Some(c) => {
                    local.resize(projections[c].var_count(), 0);
                    projections[c].project(&mut local, s);
                    children[c].subtract_mut().insert(&local);
                }
                None => mixed_subtract.insert(s),
            }
        }

        let child_count = projections.len();
        let record = IndependenceRecord {
            parent: sink,
            multiply: slice.multiply().clone(),
            mixed_subtract,
            projections,
            buffers: (0..child_count - 1).map(|_| vec![]).collect(),
        };

        let id = match self.free_records.pop() {
            Some(id) => {
                self.records[id] = Some(record);
                id
            }
            None => {
                self.records.push(Some(record));
                self.records.len() - 1
            }
        };

        Some((id, children))
    }

    /// Returns `false` if results sent to `sink` can no longer contribute to
    /// the output, because an earlier sibling of the receiving child or of one
    /// of its ancestors produced nothing.
    pub fn is_live(&self, mut sink: Sink) -> bool {
        loop {
            match sink {
                Sink::Root => return true,
                Sink::Child { split, child } => {
                    let r = self.record(split);
                    let earlier = child.min(r.buffers.len());
                    if r.buffers[..earlier].iter().any(|b| b.is_empty()) {
                        return false;
                    }
                    sink = r.parent;
                }
            }
        }
    }

    /// Send `batch` towards the root. Returns `true` if it arrived there, in
    /// which case `batch` holds the results in the variables of the root.
    /// Otherwise the results were buffered and `batch` is empty.
    pub fn route(&mut self, mut sink: Sink, batch: &mut Vec<(C, Term)>) -> bool {
        loop {
            match sink {
                Sink::Root => return true,
                Sink::Child { split, child } => {
                    let r = self.record_mut(split);
                    if child < r.buffers.len() {
                        let p = &r.projections[child];
                        for (c, t) in batch.drain(..) {
                            let mut lifted = Term::new(p.super_var_count());
                            p.inverse_project(&mut lifted, &t);
                            r.buffers[child].push((c, lifted));
                        }
                        return false;
                    }

                    let mut out = std::mem::take(&mut self.scratch);
                    let r = self.record(split);
                    r.combine(batch, &mut out);
                    sink = r.parent;

                    batch.clear();
                    std::mem::swap(batch, &mut out);
                    self.scratch = out;
                }
            }
        }
    }

    /// Release the record of a split after all its children are done.
    pub fn finish(&mut self, split: usize) {
        debug_assert!(self.records[split].is_some());
        self.records[split] = None;
        self.free_records.push(split);
    }
}

impl<C: Coefficient> Default for IndependenceSplitter<C> {
    fn default() -> Self {
        IndependenceSplitter::new()
    }
}
