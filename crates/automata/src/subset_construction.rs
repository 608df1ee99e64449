//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::dfa::{DFA, DfaTransitions};
use crate::epsilon_nfa::EpsilonNFA;
use crate::state::{StateId, StateSet};
use log::debug;
use std::collections::HashMap;

/// Convert an epsilon-NFA to an equivalent DFA over the powerset of its
/// state set.
///
/// Every subset of the NFA state set becomes a DFA state, identified by its
/// bitmask over the ascending NFA state vector. All `2^n` subsets are
/// enumerated, reachable or not, so the output size is exponential in the
/// NFA state count by construction; callers needing a small result should
/// minimize afterwards.
///
/// The DFA start state is the epsilon closure of the NFA start set, which
/// preserves acceptance of the empty word; a subset is accepting iff it
/// intersects the NFA accepting set; the transition of subset `A` on symbol
/// `a` is the epsilon-closed successor set `delta_hat(A, [a])`. The result
/// satisfies the DFA totality invariant (the empty subset is the sink).
pub fn subset_construction(nfa: &EpsilonNFA) -> DFA {
    let order: Vec<StateId> = nfa.states().to_vec();
    let n = order.len();
    assert!(
        n < u32::BITS as usize,
        "powerset of {n} states does not fit subset masks"
    );
    let position: HashMap<StateId, u32> = order
        .iter()
        .enumerate()
        .map(|(index, &state)| (state, index as u32))
        .collect();
    let mask_of = |subset: &StateSet| -> StateId {
        subset
            .iter()
            .fold(0, |mask, state| mask | (1u32 << position[&state]))
    };

    let subset_count: u32 = 1 << n;
    debug!("subset construction: {n} NFA states, {subset_count} subsets");

    let finals_mask = mask_of(nfa.finals());
    let mut states = StateSet::new();
    let mut finals = StateSet::new();
    let mut transitions = DfaTransitions::new();

    for mask in 0..subset_count {
        states.insert(mask);
        if mask & finals_mask != 0 {
            finals.insert(mask);
        }
        let subset: StateSet = order
            .iter()
            .enumerate()
            .filter(|&(index, _)| mask & (1u32 << index) != 0)
            .map(|(_, &state)| state)
            .collect();
        for &symbol in nfa.alphabet() {
            let destination = nfa.step_closed(&subset, symbol);
            transitions.insert((mask, symbol), mask_of(&destination));
        }
    }

    DFA {
        states,
        alphabet: nfa.alphabet().clone(),
        transitions,
        start: mask_of(&nfa.closure_of(nfa.starts())),
        finals,
    }
}

impl EpsilonNFA {
    /// Convert to an equivalent DFA; see [`subset_construction`].
    pub fn to_dfa(&self) -> DFA {
        subset_construction(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon_nfa::NfaTransitions;
    use crate::symbol::{EPSILON, alphabet};

    fn set(states: &[StateId]) -> StateSet {
        states.iter().copied().collect()
    }

    #[test]
    fn test_powerset_is_fully_enumerated() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3, 2 -b-> 3
        let mut transitions = NfaTransitions::new();
        transitions.insert((0, 0), set(&[1, 2]));
        transitions.insert((1, 1), set(&[3]));
        transitions.insert((2, 1), set(&[3]));
        let nfa = EpsilonNFA::new(
            set(&[0, 1, 2, 3]),
            alphabet(&[0, 1]),
            transitions,
            set(&[0]),
            set(&[3]),
        )
        .unwrap();

        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.states().len(), 16);
        assert!(dfa.accepts(&[0, 1]).unwrap());
        assert!(!dfa.accepts(&[0]).unwrap());
        assert!(!dfa.accepts(&[0, 1, 1]).unwrap());
    }

    #[test]
    fn test_start_state_is_epsilon_closed() {
        // Acceptance of the empty word through an epsilon edge must survive
        // the conversion.
        let mut transitions = NfaTransitions::new();
        transitions.insert((0, EPSILON), set(&[1]));
        transitions.insert((1, 0), set(&[1]));
        let nfa = EpsilonNFA::new(
            set(&[0, 1]),
            alphabet(&[0]),
            transitions,
            set(&[0]),
            set(&[1]),
        )
        .unwrap();

        let dfa = nfa.to_dfa();
        assert!(dfa.accepts(&[]).unwrap());
        assert!(dfa.accepts(&[0, 0]).unwrap());
    }

    #[test]
    fn test_empty_successor_set_is_the_sink() {
        let mut transitions = NfaTransitions::new();
        transitions.insert((0, 0), set(&[1]));
        let nfa = EpsilonNFA::new(
            set(&[0, 1]),
            alphabet(&[0]),
            transitions,
            set(&[0]),
            set(&[1]),
        )
        .unwrap();

        let dfa = nfa.to_dfa();
        assert!(dfa.accepts(&[0]).unwrap());
        // After the second symbol the NFA is stuck; the DFA sits in the
        // empty subset and rejects everything longer.
        assert!(!dfa.accepts(&[0, 0]).unwrap());
        assert!(!dfa.accepts(&[0, 0, 0]).unwrap());
    }
}
