//! Finite-automata engine.
//!
//! This crate provides deterministic and epsilon-non-deterministic finite
//! automata with:
//! - Deterministic and non-deterministic transition evaluation, including
//!   epsilon closure
//! - DFA minimization by Myhill-Nerode equivalence partitioning
//! - Subset construction (NFA to DFA conversion) over the full powerset
//! - Kleene-algebra constructors (literal, concatenation, union, closure)
//!   and an algebraic expression tree interpreted against them
//!
//! Automata are validated at construction and immutable afterwards; every
//! transformation produces a new automaton. The engine is single-threaded
//! and purely functional; the only mutable piece is the explicit
//! [`StateAllocator`] threaded through constructors that invent states.

pub mod dfa;
pub mod epsilon_nfa;
pub mod error;
pub mod expr;
pub mod kleene;
pub mod state;
pub mod subset_construction;
pub mod symbol;

pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
pub use error::{AutomataError, Result};
pub use expr::Expr;
pub use state::{StateAllocator, StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{Alphabet, EPSILON, SymbolId, alphabet, is_epsilon};
