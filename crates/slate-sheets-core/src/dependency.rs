//! Dependency graph over string keys
//!
//! Tracks which keys depend on which other keys, enabling efficient
//! recalculation ordering and cycle detection in the engine crate. The graph
//! itself knows nothing about spreadsheets.
//!
//! A dependency is an ordered pair `(s, t)`, read "t depends on s". Given a
//! graph containing `("a", "b")`:
//! - `dependents("a")` is `{"b"}` — the keys depending on `"a"`
//! - `dependees("b")` is `{"a"}` — the keys `"b"` depends on

use ahash::{AHashMap, AHashSet};

/// A directed graph of deduplicated `(s, t)` dependency pairs
///
/// Backed by dual adjacency maps so that both [`dependents`](Self::dependents)
/// and [`dependees`](Self::dependees) lookups cost one hash probe, regardless
/// of the total number of edges.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// s → keys that depend on s (forward edges)
    dependents: AHashMap<String, AHashSet<String>>,
    /// t → keys that t depends on (back edges)
    dependees: AHashMap<String, AHashSet<String>>,
    /// Number of distinct pairs
    size: usize,
}

impl DependencyGraph {
    /// Create a graph containing no dependencies
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct `(s, t)` pairs in the graph
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether the graph contains no dependencies
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Reports whether `dependents(s)` is non-empty
    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.get(s).is_some_and(|set| !set.is_empty())
    }

    /// Reports whether `dependees(t)` is non-empty
    pub fn has_dependees(&self, t: &str) -> bool {
        self.dependees.get(t).is_some_and(|set| !set.is_empty())
    }

    /// The keys that depend on `s`, in no particular order
    ///
    /// Unknown keys yield an empty iterator, never an error.
    pub fn dependents<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> {
        self.dependents
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// The keys that `t` depends on, in no particular order
    pub fn dependees<'a>(&'a self, t: &str) -> impl Iterator<Item = &'a str> {
        self.dependees
            .get(t)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Insert the pair `(s, t)`: t depends on s
    ///
    /// A pair added twice counts once.
    pub fn add_dependency(&mut self, s: &str, t: &str) {
        let inserted = self
            .dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());

        if inserted {
            self.dependees
                .entry(t.to_string())
                .or_default()
                .insert(s.to_string());
            self.size += 1;
        }
    }

    /// Remove the pair `(s, t)` if present; no-op otherwise
    pub fn remove_dependency(&mut self, s: &str, t: &str) {
        let removed = self
            .dependents
            .get_mut(s)
            .is_some_and(|set| set.remove(t));

        if removed {
            if let Some(set) = self.dependees.get_mut(t) {
                set.remove(s);
            }
            self.size -= 1;
        }
    }

    /// Remove every pair `(s, *)`, then insert `(s, t)` for each t in
    /// `new_dependents`
    pub fn replace_dependents<I, T>(&mut self, s: &str, new_dependents: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let old: Vec<String> = self.dependents(s).map(String::from).collect();
        for t in old {
            self.remove_dependency(s, &t);
        }
        for t in new_dependents {
            self.add_dependency(s, t.as_ref());
        }
    }

    /// Remove every pair `(*, t)`, then insert `(s, t)` for each s in
    /// `new_dependees`
    pub fn replace_dependees<I, T>(&mut self, t: &str, new_dependees: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let old: Vec<String> = self.dependees(t).map(String::from).collect();
        for s in old {
            self.remove_dependency(&s, t);
        }
        for s in new_dependees {
            self.add_dependency(s.as_ref(), t);
        }
    }
}
