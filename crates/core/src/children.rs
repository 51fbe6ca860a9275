//! Bidirectional mapping between child states and the moves producing them.

/// All states directly reachable from a parent, each paired with its move string.
///
/// Invariant: states are unique and move strings are unique, so the mapping
/// can be queried in both directions. Entries keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Children<S> {
    entries: Vec<(S, String)>,
}

impl<S: Eq> Children<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add a child.
    ///
    /// # Panics
    /// Panics if the state or the move is already present; rules that produce
    /// duplicates are broken.
    pub fn insert(&mut self, state: S, mv: String) {
        assert!(
            self.move_for(&state).is_none(),
            "duplicate child state for move {mv}"
        );
        assert!(self.state_for(&mv).is_none(), "duplicate move {mv}");
        self.entries.push((state, mv));
    }

    /// Move string leading to the given child, if it is one.
    pub fn move_for(&self, state: &S) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == state)
            .map(|(_, m)| m.as_str())
    }

    /// Child produced by the given move, if the move is legal.
    pub fn state_for(&self, mv: &str) -> Option<&S> {
        self.entries.iter().find(|(_, m)| m == mv).map(|(s, _)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &str)> {
        self.entries.iter().map(|(s, m)| (s, m.as_str()))
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(s, _)| s)
    }

    pub fn moves(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, m)| m.as_str())
    }

    pub fn into_states(self) -> Vec<S> {
        self.entries.into_iter().map(|(s, _)| s).collect()
    }
}

impl<S: Eq> Default for Children<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq> FromIterator<(S, String)> for Children<S> {
    fn from_iter<I: IntoIterator<Item = (S, String)>>(iter: I) -> Self {
        let mut children = Children::new();
        for (state, mv) in iter {
            children.insert(state, mv);
        }
        children
    }
}
