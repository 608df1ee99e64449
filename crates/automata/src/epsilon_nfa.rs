//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::error::{AutomataError, Result};
use crate::state::{StateId, StateSet};
use crate::symbol::{Alphabet, EPSILON, SymbolId, is_epsilon};
use std::collections::HashMap;
use std::fmt;

/// Transition relation of an ε-NFA: `(source, symbol) -> destinations`.
/// Epsilon transitions are stored under the `EPSILON` symbol. Pairs with no
/// entry have no successors; there is no totality requirement.
pub type NfaTransitions = HashMap<(StateId, SymbolId), StateSet>;

/// An Epsilon Non-deterministic Finite Automaton.
///
/// The working alphabet is the declared alphabet plus the reserved epsilon
/// marker. An `EpsilonNFA` is validated at construction and immutable
/// afterwards; every transformation produces a new automaton.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// States
    pub(crate) states: StateSet,
    /// Alphabet, excluding epsilon
    pub(crate) alphabet: Alphabet,
    /// Transitions: (source, symbol) -> set of destination states
    pub(crate) transitions: NfaTransitions,
    /// Start states
    pub(crate) starts: StateSet,
    /// Final (accepting) states
    pub(crate) finals: StateSet,
}

impl EpsilonNFA {
    /// Create an ε-NFA, validating it.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the declared alphabet contains the epsilon
    /// marker or a transition is labeled with an unknown symbol;
    /// `InvalidState` if a start, final, transition source or transition
    /// destination state is not a member of the state set.
    pub fn new(
        states: StateSet,
        alphabet: Alphabet,
        transitions: NfaTransitions,
        starts: StateSet,
        finals: StateSet,
    ) -> Result<Self> {
        if alphabet.contains(&EPSILON) {
            return Err(AutomataError::InvalidTransition(EPSILON));
        }
        for q in starts.iter().chain(finals.iter()) {
            if !states.contains(q) {
                return Err(AutomataError::InvalidState(q));
            }
        }
        for (&(source, symbol), destinations) in &transitions {
            if !states.contains(source) {
                return Err(AutomataError::InvalidState(source));
            }
            if !is_epsilon(symbol) && !alphabet.contains(&symbol) {
                return Err(AutomataError::InvalidTransition(symbol));
            }
            for destination in destinations.iter() {
                if !states.contains(destination) {
                    return Err(AutomataError::InvalidState(destination));
                }
            }
        }
        Ok(Self {
            states,
            alphabet,
            transitions,
            starts,
            finals,
        })
    }

    /// Get the states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the start states.
    pub fn starts(&self) -> &StateSet {
        &self.starts
    }

    /// Get the final (accepting) states.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Single-step transition.
    ///
    /// For `symbol == EPSILON` the result is reflexive: a state reaches
    /// itself via zero epsilon steps, so `delta(q, ε) = {q} ∪ δ(q, ε)`.
    /// For an alphabet symbol the result is the stored successor set, empty
    /// when the pair has no entry.
    ///
    /// # Errors
    ///
    /// `InvalidState` if `state` is unknown, `InvalidTransition` if `symbol`
    /// is neither epsilon nor an alphabet member.
    pub fn delta(&self, state: StateId, symbol: SymbolId) -> Result<StateSet> {
        if !self.states.contains(state) {
            return Err(AutomataError::InvalidState(state));
        }
        if is_epsilon(symbol) {
            let mut result = StateSet::singleton(state);
            if let Some(destinations) = self.transitions.get(&(state, EPSILON)) {
                result.union_with(destinations);
            }
            return Ok(result);
        }
        if !self.alphabet.contains(&symbol) {
            return Err(AutomataError::InvalidTransition(symbol));
        }
        Ok(self
            .transitions
            .get(&(state, symbol))
            .cloned()
            .unwrap_or_default())
    }

    /// Epsilon closure of a single state.
    ///
    /// # Errors
    ///
    /// `InvalidState` if `state` is unknown.
    pub fn epsilon_closure(&self, state: StateId) -> Result<StateSet> {
        if !self.states.contains(state) {
            return Err(AutomataError::InvalidState(state));
        }
        Ok(self.closure_of(&StateSet::singleton(state)))
    }

    /// Epsilon closure of a set of states: the union of per-state closures.
    ///
    /// # Errors
    ///
    /// `InvalidState` if any member of `states` is unknown.
    pub fn epsilon_closure_set(&self, states: &StateSet) -> Result<StateSet> {
        for state in states.iter() {
            if !self.states.contains(state) {
                return Err(AutomataError::InvalidState(state));
            }
        }
        Ok(self.closure_of(states))
    }

    /// Least fixpoint containing `seed` and closed under epsilon
    /// transitions, computed with an explicit worklist. The visited set
    /// guarantees termination on epsilon cycles.
    pub(crate) fn closure_of(&self, seed: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        let mut stack: Vec<StateId> = seed.to_vec();

        while let Some(state) = stack.pop() {
            if closure.contains(state) {
                continue;
            }
            closure.insert(state);

            if let Some(destinations) = self.transitions.get(&(state, EPSILON)) {
                for destination in destinations.iter() {
                    if !closure.contains(destination) {
                        stack.push(destination);
                    }
                }
            }
        }

        closure
    }

    /// The epsilon-closed successor set of `current` on one symbol, without
    /// input validation. Used by the evaluator and the subset construction.
    pub(crate) fn step_closed(&self, current: &StateSet, symbol: SymbolId) -> StateSet {
        let mut moved = StateSet::new();
        for state in current.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                moved.union_with(destinations);
            }
        }
        self.closure_of(&moved)
    }

    /// Extended transition over a set of current states and a symbol
    /// sequence: `delta_hat(A, ε) = closure(A)`, and each symbol step takes
    /// the epsilon closure of the successors of the previous result.
    ///
    /// # Errors
    ///
    /// `InvalidState` if a member of `current` is unknown,
    /// `InvalidTransition` if the word contains a symbol outside the
    /// alphabet (epsilon included; it is not an input symbol).
    pub fn delta_hat(&self, current: &StateSet, word: &[SymbolId]) -> Result<StateSet> {
        let mut reached = self.epsilon_closure_set(current)?;
        for &symbol in word {
            if !self.alphabet.contains(&symbol) {
                return Err(AutomataError::InvalidTransition(symbol));
            }
            reached = self.step_closed(&reached, symbol);
        }
        Ok(reached)
    }

    /// Test whether the NFA accepts `word`: some state reachable from the
    /// start set on `word` is accepting.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the word contains a symbol outside the
    /// alphabet.
    pub fn accepts(&self, word: &[SymbolId]) -> Result<bool> {
        Ok(self.delta_hat(&self.starts, word)?.intersects(&self.finals))
    }
}

impl fmt::Display for EpsilonNFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {:?}  accept: {:?}", self.starts, self.finals)?;
        for state in self.states.iter() {
            writeln!(f, "state {state}")?;
            for &symbol in self.alphabet.iter().chain(std::iter::once(&EPSILON)) {
                let Some(destinations) = self.transitions.get(&(state, symbol)) else {
                    continue;
                };
                if destinations.is_empty() {
                    continue;
                }
                if is_epsilon(symbol) {
                    writeln!(f, "  ε -> {destinations:?}")?;
                } else {
                    writeln!(f, "  {symbol} -> {destinations:?}")?;
                }
            }
        }
        Ok(())
    }
}
