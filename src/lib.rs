//! Monoslice computes invariants of monomial ideals with the Slice Algorithm.
//!
//! It can be used to compute maximal standard monomials, irreducible and
//! primary decompositions, associated primes, Alexander duals, Hilbert-Poincaré
//! series and the maximum of a linear grading over the maximal standard
//! monomials, which yields Frobenius numbers.
//!
//! For example:
//!
//! ```
//! use monoslice::{
//!     ideal::Ideal,
//!     operations,
//!     printer::{IdealPrinter, VarNames},
//!     slice::strategy::SliceParams,
//! };
//!
//! fn main() {
//!     let names = VarNames::new(&["x", "y", "z", "t"]);
//!     let ideal = Ideal::from_terms(4, [[2, 0, 0, 0], [0, 2, 0, 0], [1, 0, 1, 0], [0, 1, 1, 0]]);
//!
//!     let components = operations::irreducible_decomposition(&ideal, &SliceParams::default());
//!     for c in &components {
//!         println!("{}", IdealPrinter::new(c, &names));
//!     }
//!     assert_eq!(components.len(), 2);
//! }
//! ```
//!
//! The computations are single threaded. Every thread keeps a cache of
//! exponent buffers in its [state::Workspace].

pub mod consumer;
pub mod grader;
pub mod ideal;
pub mod operations;
pub mod printer;
pub mod series;
pub mod slice;
pub mod state;
pub mod term;
