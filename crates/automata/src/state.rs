//! State identity and state sets.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier represented as a u32.
///
/// States are opaque: identity and set membership are all that matters.
/// Composite constructions (products, powersets) rename their result states
/// to fresh dense identifiers rather than carrying tuples around.
pub type StateId = u32;

/// A set of states backed by a growable bit set.
///
/// Iteration is always in ascending state order, which keeps every algorithm
/// built on top of it independent of hash-map iteration order.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set.
    pub fn new() -> Self {
        Self {
            bits: FixedBitSet::new(),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set shares any state with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Create a new set that is the intersection of this set and another.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        let max_len = std::cmp::max(result.bits.len(), other.bits.len());
        result.bits.grow(max_len);
        result.bits.intersect_with(&other.bits);
        result
    }

    /// Create a new set with the states of this set not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// Check if every state of this set is a member of `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|state| other.contains(state))
    }

    /// The states of the set as an ascending vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

/// Membership equality; the capacity of the backing bit set is irrelevant.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

/// Issues state identifiers that have never been issued before.
///
/// Constructors that invent states with no prior meaning (the fresh start
/// state of a union or closure, the chain states of a literal NFA) draw from
/// an allocator so that automata built independently against the same
/// allocator never collide on state identity. The allocator is an explicit
/// value threaded through those constructors; there is no process-wide
/// counter. Callers that need deterministic identifiers across runs reset it
/// explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    /// Create an allocator whose first issued identifier is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next identifier to issue. Identifiers issued before the reset
    /// may be issued again afterwards.
    pub fn reset(&mut self, next: StateId) {
        self.next = next;
    }

    /// Issue a previously-unissued identifier and advance.
    pub fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }
}
