//! Algebraic expression trees over the Kleene constructors.
//!
//! A front end that parses a textual expression is expected to produce an
//! [`Expr`] and have it interpreted here; the tree is walked and the
//! constructors in [`crate::kleene`] are invoked, never any form of dynamic
//! evaluation. Parsing itself is out of scope for this crate.

use crate::epsilon_nfa::EpsilonNFA;
use crate::error::Result;
use crate::kleene;
use crate::state::StateAllocator;
use crate::symbol::{Alphabet, SymbolId};

/// An algebraic expression denoting a regular language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single symbol.
    Symbol(SymbolId),
    /// A literal word; empty denotes the empty-word language.
    Literal(Vec<SymbolId>),
    /// Concatenation of two languages.
    Concat(Box<Expr>, Box<Expr>),
    /// Union of two languages.
    Union(Box<Expr>, Box<Expr>),
    /// Kleene closure of a language.
    Closure(Box<Expr>),
}

impl Expr {
    /// Concatenation node.
    pub fn then(self, next: Expr) -> Expr {
        Expr::Concat(Box::new(self), Box::new(next))
    }

    /// Union node.
    pub fn or(self, other: Expr) -> Expr {
        Expr::Union(Box::new(self), Box::new(other))
    }

    /// Closure node.
    pub fn star(self) -> Expr {
        Expr::Closure(Box::new(self))
    }

    /// Interpret the tree into an NFA over `alphabet` by walking it and
    /// invoking the Kleene constructors, drawing glue states from `alloc`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if a symbol of the expression is outside
    /// `alphabet`.
    pub fn build(&self, alphabet: &Alphabet, alloc: &mut StateAllocator) -> Result<EpsilonNFA> {
        match self {
            Expr::Symbol(symbol) => kleene::literal(&[*symbol], alphabet, alloc),
            Expr::Literal(word) => kleene::literal(word, alphabet, alloc),
            Expr::Concat(first, second) => {
                let first = first.build(alphabet, alloc)?;
                let second = second.build(alphabet, alloc)?;
                kleene::concat(&first, &second)
            }
            Expr::Union(first, second) => {
                let first = first.build(alphabet, alloc)?;
                let second = second.build(alphabet, alloc)?;
                kleene::union(&first, &second, alloc)
            }
            Expr::Closure(inner) => Ok(kleene::closure(&inner.build(alphabet, alloc)?, alloc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutomataError;
    use crate::symbol::alphabet;

    const A: SymbolId = 0;
    const B: SymbolId = 1;

    #[test]
    fn test_build_composed_expression() {
        // (a·b + b)*
        let expr = Expr::Symbol(A).then(Expr::Symbol(B)).or(Expr::Symbol(B)).star();
        let mut alloc = StateAllocator::new();
        let nfa = expr.build(&alphabet(&[A, B]), &mut alloc).unwrap();

        assert!(nfa.accepts(&[]).unwrap());
        assert!(nfa.accepts(&[A, B]).unwrap());
        assert!(nfa.accepts(&[B, B, A, B]).unwrap());
        assert!(!nfa.accepts(&[A]).unwrap());
        assert!(!nfa.accepts(&[A, B, A]).unwrap());
    }

    #[test]
    fn test_build_rejects_foreign_symbol() {
        let expr = Expr::Symbol(9);
        let mut alloc = StateAllocator::new();
        let err = expr.build(&alphabet(&[A]), &mut alloc).unwrap_err();
        assert_eq!(err, AutomataError::InvalidTransition(9));
    }

    #[test]
    fn test_literal_node_matches_kleene_literal() {
        let expr = Expr::Literal(vec![A, B, A]);
        let mut alloc = StateAllocator::new();
        let nfa = expr.build(&alphabet(&[A, B]), &mut alloc).unwrap();
        assert!(nfa.accepts(&[A, B, A]).unwrap());
        assert!(!nfa.accepts(&[A, B]).unwrap());
    }
}
