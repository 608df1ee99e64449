//! Kleene-algebra constructors: literal-word NFAs and their combination by
//! concatenation, union and closure.
//!
//! Every constructor is pure: inputs are never mutated and results own their
//! transition tables. Constructors that invent glue states draw them from a
//! [`StateAllocator`], which is what keeps independently built operands
//! disjoint; `concat` relies on that and does not re-check disjointness.

use crate::epsilon_nfa::{EpsilonNFA, NfaTransitions};
use crate::error::{AutomataError, Result};
use crate::state::{StateAllocator, StateSet};
use crate::symbol::{Alphabet, EPSILON, SymbolId};

/// Build the chain NFA accepting exactly `word`: one freshly allocated state
/// per chain position, single start state at the head, single accepting
/// state at the tail. The empty word yields a single state that is both
/// start and accepting.
///
/// # Errors
///
/// `InvalidTransition` if `word` contains a symbol outside `alphabet` or the
/// alphabet contains the epsilon marker.
pub fn literal(
    word: &[SymbolId],
    alphabet: &Alphabet,
    alloc: &mut StateAllocator,
) -> Result<EpsilonNFA> {
    let chain: Vec<_> = (0..=word.len()).map(|_| alloc.fresh()).collect();

    let mut transitions = NfaTransitions::new();
    for (index, &symbol) in word.iter().enumerate() {
        transitions.insert((chain[index], symbol), StateSet::singleton(chain[index + 1]));
    }

    EpsilonNFA::new(
        chain.iter().copied().collect(),
        alphabet.clone(),
        transitions,
        StateSet::singleton(chain[0]),
        StateSet::singleton(chain[word.len()]),
    )
}

/// Merge two transition tables. Keys never collide because the operand state
/// sets are disjoint.
fn merged(n1: &EpsilonNFA, n2: &EpsilonNFA) -> NfaTransitions {
    let mut transitions = n1.transitions.clone();
    for (&key, destinations) in &n2.transitions {
        transitions.insert(key, destinations.clone());
    }
    transitions
}

/// Concatenation: the language `L1 · L2`. Every accepting state of `n1`
/// gains an epsilon transition to every start state of `n2`; the result
/// starts where `n1` starts and accepts where `n2` accepts.
///
/// # Errors
///
/// `AlphabetMismatch` unless both operands share the same alphabet.
pub fn concat(n1: &EpsilonNFA, n2: &EpsilonNFA) -> Result<EpsilonNFA> {
    if n1.alphabet != n2.alphabet {
        return Err(AutomataError::AlphabetMismatch);
    }

    let mut transitions = merged(n1, n2);
    for state in n1.finals.iter() {
        transitions
            .entry((state, EPSILON))
            .or_default()
            .union_with(&n2.starts);
    }

    let mut states = n1.states.clone();
    states.union_with(&n2.states);
    Ok(EpsilonNFA {
        states,
        alphabet: n1.alphabet.clone(),
        transitions,
        starts: n1.starts.clone(),
        finals: n2.finals.clone(),
    })
}

/// Union: the language `L1 + L2`. One freshly allocated start state with
/// epsilon transitions to both operands' start states; accepting states are
/// the union of both operands'.
///
/// # Errors
///
/// `AlphabetMismatch` unless both operands share the same alphabet.
pub fn union(n1: &EpsilonNFA, n2: &EpsilonNFA, alloc: &mut StateAllocator) -> Result<EpsilonNFA> {
    if n1.alphabet != n2.alphabet {
        return Err(AutomataError::AlphabetMismatch);
    }

    let head = alloc.fresh();
    let mut starts = n1.starts.clone();
    starts.union_with(&n2.starts);

    let mut transitions = merged(n1, n2);
    transitions.insert((head, EPSILON), starts);

    let mut states = n1.states.clone();
    states.union_with(&n2.states);
    states.insert(head);
    let mut finals = n1.finals.clone();
    finals.union_with(&n2.finals);

    Ok(EpsilonNFA {
        states,
        alphabet: n1.alphabet.clone(),
        transitions,
        starts: StateSet::singleton(head),
        finals,
    })
}

/// Kleene closure: the language `L1*`. A freshly allocated start state,
/// itself accepting (the empty word), with an epsilon transition to the
/// operand's start states; every accepting state of the operand gains an
/// epsilon transition back to those start states.
pub fn closure(n1: &EpsilonNFA, alloc: &mut StateAllocator) -> EpsilonNFA {
    let head = alloc.fresh();

    let mut transitions = n1.transitions.clone();
    transitions.insert((head, EPSILON), n1.starts.clone());
    for state in n1.finals.iter() {
        transitions
            .entry((state, EPSILON))
            .or_default()
            .union_with(&n1.starts);
    }

    let mut states = n1.states.clone();
    states.insert(head);
    let mut finals = n1.finals.clone();
    finals.insert(head);

    EpsilonNFA {
        states,
        alphabet: n1.alphabet.clone(),
        transitions,
        starts: StateSet::singleton(head),
        finals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::alphabet;

    const A: SymbolId = 0;
    const B: SymbolId = 1;

    #[test]
    fn test_literal_accepts_exactly_its_word() {
        let mut alloc = StateAllocator::new();
        let nfa = literal(&[A, B], &alphabet(&[A, B]), &mut alloc).unwrap();

        assert!(nfa.accepts(&[A, B]).unwrap());
        for word in [&[][..], &[A][..], &[B][..], &[B, A][..], &[A, B, A][..]] {
            assert!(!nfa.accepts(word).unwrap(), "word {word:?}");
        }
        assert_eq!(nfa.states().len(), 3);
    }

    #[test]
    fn test_empty_literal_accepts_only_empty_word() {
        let mut alloc = StateAllocator::new();
        let nfa = literal(&[], &alphabet(&[A]), &mut alloc).unwrap();
        assert!(nfa.accepts(&[]).unwrap());
        assert!(!nfa.accepts(&[A]).unwrap());
        assert_eq!(nfa.states().len(), 1);
    }

    #[test]
    fn test_literal_rejects_symbol_outside_alphabet() {
        let mut alloc = StateAllocator::new();
        let err = literal(&[7], &alphabet(&[A]), &mut alloc).unwrap_err();
        assert_eq!(err, AutomataError::InvalidTransition(7));
    }

    #[test]
    fn test_concat_joins_languages() {
        let sigma = alphabet(&[A, B]);
        let mut alloc = StateAllocator::new();
        let ab = literal(&[A, B], &sigma, &mut alloc).unwrap();
        let b = literal(&[B], &sigma, &mut alloc).unwrap();
        let joined = concat(&ab, &b).unwrap();

        assert!(joined.accepts(&[A, B, B]).unwrap());
        for word in [&[][..], &[A, B][..], &[B][..], &[A, B, B, B][..]] {
            assert!(!joined.accepts(word).unwrap(), "word {word:?}");
        }
        // Operands remain usable: constructors never mutate their inputs.
        assert!(ab.accepts(&[A, B]).unwrap());
        assert!(b.accepts(&[B]).unwrap());
    }

    #[test]
    fn test_concat_rejects_differing_alphabets() {
        let mut alloc = StateAllocator::new();
        let n1 = literal(&[A], &alphabet(&[A]), &mut alloc).unwrap();
        let n2 = literal(&[B], &alphabet(&[A, B]), &mut alloc).unwrap();
        assert_eq!(concat(&n1, &n2).unwrap_err(), AutomataError::AlphabetMismatch);
    }

    #[test]
    fn test_union_accepts_either_language() {
        let sigma = alphabet(&[A, B]);
        let mut alloc = StateAllocator::new();
        let ab = literal(&[A, B], &sigma, &mut alloc).unwrap();
        let b = literal(&[B], &sigma, &mut alloc).unwrap();
        let either = union(&ab, &b, &mut alloc).unwrap();

        assert!(either.accepts(&[A, B]).unwrap());
        assert!(either.accepts(&[B]).unwrap());
        assert!(!either.accepts(&[]).unwrap());
        assert!(!either.accepts(&[A]).unwrap());
        assert!(!either.accepts(&[A, B, B]).unwrap());
    }

    #[test]
    fn test_closure_accepts_zero_or_more_repetitions() {
        let sigma = alphabet(&[A, B]);
        let mut alloc = StateAllocator::new();
        let ab = literal(&[A, B], &sigma, &mut alloc).unwrap();
        let repeated = closure(&ab, &mut alloc);

        assert!(repeated.accepts(&[]).unwrap());
        assert!(repeated.accepts(&[A, B]).unwrap());
        assert!(repeated.accepts(&[A, B, A, B]).unwrap());
        assert!(!repeated.accepts(&[A]).unwrap());
        assert!(!repeated.accepts(&[A, B, A]).unwrap());
    }

    #[test]
    fn test_composed_operands_stay_disjoint() {
        // Both operands come from the same allocator, so composition never
        // collides on state identity.
        let sigma = alphabet(&[A, B]);
        let mut alloc = StateAllocator::new();
        let n1 = literal(&[A], &sigma, &mut alloc).unwrap();
        let n2 = literal(&[A], &sigma, &mut alloc).unwrap();
        assert!(!n1.states().intersects(n2.states()));

        let either = union(&n1, &n2, &mut alloc).unwrap();
        assert_eq!(
            either.states().len(),
            n1.states().len() + n2.states().len() + 1
        );
    }
}
