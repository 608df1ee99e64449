//! Error types for automaton construction and evaluation.

use crate::state::StateId;
use crate::symbol::SymbolId;
use thiserror::Error;

/// Errors raised by automaton construction and queries.
///
/// All of these are raised synchronously at the point of violation and
/// represent caller programming errors (a malformed automaton or mismatched
/// alphabets), not transient conditions. An operation either fully succeeds
/// or fails with no observable partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutomataError {
    /// A DFA transition table is not total over the declared states and
    /// alphabet: the entry for `(state, symbol)` is missing or leads outside
    /// the state set. Raised at construction time.
    #[error("transition table is not closed over Q x Sigma at ({state}, {symbol})")]
    NonClosure { state: StateId, symbol: SymbolId },
    /// A queried or declared state is not part of the automaton.
    #[error("state {0} is not part of the automaton")]
    InvalidState(StateId),
    /// A queried or declared symbol is not part of the alphabet.
    #[error("symbol {0} is not part of the alphabet")]
    InvalidTransition(SymbolId),
    /// A binary operation was applied to automata with differing alphabets.
    #[error("operands have differing alphabets")]
    AlphabetMismatch,
}

/// Alias for `std::result::Result<T, AutomataError>`.
pub type Result<T> = std::result::Result<T, AutomataError>;
