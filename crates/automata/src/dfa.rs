//! Deterministic Finite Automaton (DFA) implementation with Myhill-Nerode
//! minimization.

use crate::error::{AutomataError, Result};
use crate::state::{StateAllocator, StateId, StateSet};
use crate::symbol::{Alphabet, EPSILON, SymbolId};
use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Transition function of a DFA: `(source, symbol) -> destination`.
/// Validated construction requires the table to be total over `Q x Sigma`.
pub type DfaTransitions = HashMap<(StateId, SymbolId), StateId>;

/// A Deterministic Finite Automaton.
///
/// A `DFA` is validated at construction (the transition table must be closed
/// over `Q x Sigma`) and immutable afterwards; every transformation
/// (complement, product, minimization) produces a new automaton with its own
/// tables.
#[derive(Debug, Clone)]
pub struct DFA {
    /// States
    pub(crate) states: StateSet,
    /// Alphabet
    pub(crate) alphabet: Alphabet,
    /// Transitions: (source, symbol) -> destination
    pub(crate) transitions: DfaTransitions,
    /// Start state
    pub(crate) start: StateId,
    /// Final (accepting) states
    pub(crate) finals: StateSet,
}

impl DFA {
    /// Create a DFA, validating it.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the alphabet contains the epsilon marker or a
    /// transition is keyed with an unknown symbol; `InvalidState` if the
    /// start state, a final state or a transition source is not a member of
    /// the state set; `NonClosure` if the table is missing an entry for some
    /// `(state, symbol)` pair or an entry leads outside the state set.
    pub fn new(
        states: StateSet,
        alphabet: Alphabet,
        transitions: DfaTransitions,
        start: StateId,
        finals: StateSet,
    ) -> Result<Self> {
        if alphabet.contains(&EPSILON) {
            return Err(AutomataError::InvalidTransition(EPSILON));
        }
        if !states.contains(start) {
            return Err(AutomataError::InvalidState(start));
        }
        for state in finals.iter() {
            if !states.contains(state) {
                return Err(AutomataError::InvalidState(state));
            }
        }
        for &(source, symbol) in transitions.keys() {
            if !states.contains(source) {
                return Err(AutomataError::InvalidState(source));
            }
            if !alphabet.contains(&symbol) {
                return Err(AutomataError::InvalidTransition(symbol));
            }
        }
        for state in states.iter() {
            for &symbol in &alphabet {
                match transitions.get(&(state, symbol)) {
                    Some(&destination) if states.contains(destination) => {}
                    _ => return Err(AutomataError::NonClosure { state, symbol }),
                }
            }
        }
        Ok(Self {
            states,
            alphabet,
            transitions,
            start,
            finals,
        })
    }

    /// Get the states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Get the final (accepting) states.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Total-table lookup. The construction invariant guarantees an entry
    /// for every pair in `Q x Sigma`.
    pub(crate) fn step(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.transitions[&(state, symbol)]
    }

    /// Single-step transition.
    ///
    /// # Errors
    ///
    /// `InvalidState` if `state` is unknown, `InvalidTransition` if `symbol`
    /// is not an alphabet member.
    pub fn delta(&self, state: StateId, symbol: SymbolId) -> Result<StateId> {
        if !self.states.contains(state) {
            return Err(AutomataError::InvalidState(state));
        }
        if !self.alphabet.contains(&symbol) {
            return Err(AutomataError::InvalidTransition(symbol));
        }
        Ok(self.step(state, symbol))
    }

    /// Extended transition over a symbol sequence, evaluated left to right:
    /// `delta_hat(q, ε) = q` and `delta_hat(q, w·a) = delta(delta_hat(q, w), a)`.
    ///
    /// # Errors
    ///
    /// As [`DFA::delta`], for the initial state and every word symbol.
    pub fn delta_hat(&self, state: StateId, word: &[SymbolId]) -> Result<StateId> {
        if !self.states.contains(state) {
            return Err(AutomataError::InvalidState(state));
        }
        let mut current = state;
        for &symbol in word {
            current = self.delta(current, symbol)?;
        }
        Ok(current)
    }

    /// Test whether the DFA accepts `word`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the word contains a symbol outside the
    /// alphabet.
    pub fn accepts(&self, word: &[SymbolId]) -> Result<bool> {
        Ok(self.finals.contains(self.delta_hat(self.start, word)?))
    }

    /// The DFA accepting the complement language: same states and
    /// transitions, accepting set flipped. Valid because the transition
    /// table is total.
    pub fn complement(&self) -> DFA {
        DFA {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            transitions: self.transitions.clone(),
            start: self.start,
            finals: self.states.difference(&self.finals),
        }
    }

    /// Product construction over `Q1 x Q2`. Pair states are renamed to dense
    /// fresh identifiers in ascending `(q1, q2)` order. A pair is accepting
    /// according to `accepting`, applied to the membership of its components
    /// in the operand accepting sets.
    fn product(&self, other: &DFA, accepting: impl Fn(bool, bool) -> bool) -> Result<DFA> {
        if self.alphabet != other.alphabet {
            return Err(AutomataError::AlphabetMismatch);
        }

        let left = self.states.to_vec();
        let right = other.states.to_vec();
        let mut pair_id: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let mut states = StateSet::new();
        let mut finals = StateSet::new();
        for &q1 in &left {
            for &q2 in &right {
                let id = pair_id.len() as StateId;
                pair_id.insert((q1, q2), id);
                states.insert(id);
                if accepting(self.finals.contains(q1), other.finals.contains(q2)) {
                    finals.insert(id);
                }
            }
        }

        let mut transitions = DfaTransitions::new();
        for (&(q1, q2), &id) in &pair_id {
            for &symbol in &self.alphabet {
                let destination = pair_id[&(self.step(q1, symbol), other.step(q2, symbol))];
                transitions.insert((id, symbol), destination);
            }
        }

        Ok(DFA {
            states,
            alphabet: self.alphabet.clone(),
            transitions,
            start: pair_id[&(self.start, other.start)],
            finals,
        })
    }

    /// The DFA accepting the intersection of both languages.
    ///
    /// # Errors
    ///
    /// `AlphabetMismatch` if the alphabets differ.
    pub fn intersection(&self, other: &DFA) -> Result<DFA> {
        self.product(other, |f1, f2| f1 && f2)
    }

    /// The DFA accepting the union of both languages.
    ///
    /// # Errors
    ///
    /// `AlphabetMismatch` if the alphabets differ.
    pub fn union(&self, other: &DFA) -> Result<DFA> {
        self.product(other, |f1, f2| f1 || f2)
    }

    /// Rename every state to a fresh identifier drawn from the allocator, in
    /// ascending order of the old identifiers. Presentation-level cleanup;
    /// the language is unchanged.
    pub fn renumber(&self, alloc: &mut StateAllocator) -> DFA {
        let renamed: HashMap<StateId, StateId> = self
            .states
            .iter()
            .map(|state| (state, alloc.fresh()))
            .collect();

        let transitions = self
            .transitions
            .iter()
            .map(|(&(source, symbol), &destination)| {
                ((renamed[&source], symbol), renamed[&destination])
            })
            .collect();

        DFA {
            states: self.states.iter().map(|state| renamed[&state]).collect(),
            alphabet: self.alphabet.clone(),
            transitions,
            start: renamed[&self.start],
            finals: self.finals.iter().map(|state| renamed[&state]).collect(),
        }
    }

    /// Find all states reachable from the start state.
    fn find_reachable(&self) -> StateSet {
        let mut reachable = StateSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(self.start);

        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for &symbol in &self.alphabet {
                let next = self.step(state, symbol);
                if !reachable.contains(next) {
                    queue.push_back(next);
                }
            }
        }

        reachable
    }

    /// Minimize the DFA: the automaton with the fewest states accepting the
    /// same language.
    ///
    /// Unreachable states are pruned first, then states are partitioned into
    /// Myhill-Nerode equivalence classes by table filling: a pair is
    /// distinguishable if exactly one member accepts, or some symbol sends
    /// the pair to an already-distinguished pair; the marking is iterated to
    /// a fixpoint. Never-distinguished pairs are merged with a union-find
    /// whose class representative is the smallest member, so the quotient is
    /// independent of any iteration order. With `rename`, the resulting
    /// classes are renumbered with fresh identifiers from the allocator.
    pub fn minimize(&self, rename: Option<&mut StateAllocator>) -> DFA {
        let reachable = self.find_reachable();
        let order = reachable.to_vec();
        debug!(
            "minimize: {} states, {} reachable",
            self.states.len(),
            order.len()
        );

        // Seed: pairs with differing acceptance. Pairs are kept as
        // (smaller, larger).
        let mut marked: HashSet<(StateId, StateId)> = HashSet::new();
        for (i, &p) in order.iter().enumerate() {
            for &q in &order[i + 1..] {
                if self.finals.contains(p) != self.finals.contains(q) {
                    marked.insert((p, q));
                }
            }
        }

        // Propagate distinguishability until a full scan adds nothing.
        let mut changed = true;
        while changed {
            changed = false;
            for (i, &p) in order.iter().enumerate() {
                for &q in &order[i + 1..] {
                    if marked.contains(&(p, q)) {
                        continue;
                    }
                    for &symbol in &self.alphabet {
                        let successors = ordered(self.step(p, symbol), self.step(q, symbol));
                        if successors.0 != successors.1 && marked.contains(&successors) {
                            marked.insert((p, q));
                            changed = true;
                            break;
                        }
                    }
                }
            }
        }

        // Merge all surviving pairs into equivalence classes.
        let mut classes = UnionFind::new(&order);
        for (i, &p) in order.iter().enumerate() {
            for &q in &order[i + 1..] {
                if !marked.contains(&(p, q)) {
                    classes.union(p, q);
                }
            }
        }

        // Quotient: one state per class representative. Members of a class
        // agree on successors under every symbol (the fixpoint invariant),
        // so the representative's row stands for the class.
        let mut states = StateSet::new();
        for &state in &order {
            if classes.find(state) == state {
                states.insert(state);
            }
        }
        let mut transitions = DfaTransitions::new();
        for representative in states.iter() {
            for &symbol in &self.alphabet {
                let destination = classes.find(self.step(representative, symbol));
                transitions.insert((representative, symbol), destination);
            }
        }
        let mut finals = StateSet::new();
        for state in self.finals.intersection(&reachable).iter() {
            finals.insert(classes.find(state));
        }
        debug!("minimize: {} equivalence classes", states.len());

        let quotient = DFA {
            states,
            alphabet: self.alphabet.clone(),
            transitions,
            start: classes.find(self.start),
            finals,
        };
        match rename {
            Some(alloc) => quotient.renumber(alloc),
            None => quotient,
        }
    }
}

/// Structural equality: identical states, alphabet, start, accepting set and
/// transition table. Naming-sensitive; two DFAs accepting the same language
/// under different state names compare unequal.
impl PartialEq for DFA {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.alphabet == other.alphabet
            && self.start == other.start
            && self.finals == other.finals
            && self.transitions == other.transitions
    }
}

impl Eq for DFA {}

impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}  accept: {:?}", self.start, self.finals)?;
        for state in self.states.iter() {
            writeln!(f, "state {state}")?;
            for &symbol in &self.alphabet {
                writeln!(f, "  {symbol} -> {}", self.step(state, symbol))?;
            }
        }
        Ok(())
    }
}

fn ordered(p: StateId, q: StateId) -> (StateId, StateId) {
    if p <= q { (p, q) } else { (q, p) }
}

/// Union-find over an explicit state universe with path compression. The
/// smallest member of a class is its representative, which makes the merge
/// result canonical regardless of union order.
struct UnionFind {
    parent: HashMap<StateId, StateId>,
}

impl UnionFind {
    fn new(universe: &[StateId]) -> Self {
        Self {
            parent: universe.iter().map(|&state| (state, state)).collect(),
        }
    }

    fn find(&mut self, state: StateId) -> StateId {
        let parent = self.parent[&state];
        if parent == state {
            return state;
        }
        let root = self.find(parent);
        self.parent.insert(state, root);
        root
    }

    fn union(&mut self, p: StateId, q: StateId) {
        let root_p = self.find(p);
        let root_q = self.find(q);
        if root_p == root_q {
            return;
        }
        let (root, child) = if root_p < root_q {
            (root_p, root_q)
        } else {
            (root_q, root_p)
        };
        self.parent.insert(child, root);
    }
}
