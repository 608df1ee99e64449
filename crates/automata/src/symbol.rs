//! Symbol types for automata transitions.

use indexmap::IndexSet;

/// A symbol identifier represented as a u32.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// A finite alphabet of symbols, iterated in insertion order.
///
/// The epsilon marker is never a member of an alphabet; NFAs treat
/// `Σ ∪ {EPSILON}` as their working alphabet internally.
pub type Alphabet = IndexSet<SymbolId>;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Build an alphabet from a slice of symbols.
pub fn alphabet(symbols: &[SymbolId]) -> Alphabet {
    symbols.iter().copied().collect()
}
