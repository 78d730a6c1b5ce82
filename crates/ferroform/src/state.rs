//! Persisted per-form state: validation errors and collection slots.
//!
//! A form carries exactly two things across render passes: the error tree
//! written by the last failed submit, and the slot arenas that give
//! collection items a stable identity. Widget values themselves live in the
//! host's keyed widget store, not here. The host runtime owns this state's
//! storage lifetime and hands it mutably to every pass; modeling it as an
//! explicit object keeps the render function testable in isolation.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// A validation message attached to exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    /// Human-readable message.
    pub message: String,
}

impl InputError {
    /// Creates a new input error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One node of the error tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// A message attached at this field.
    Leaf(InputError),
    /// Errors nested below this field.
    Branch(ErrorTree),
}

/// Per-field validation errors, shaped like the value tree.
///
/// Object fields nest; an error on a collection attaches at the
/// collection's own path rather than at individual items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    nodes: HashMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tree carries no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node recorded under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.nodes.get(key)
    }

    /// Returns the message attached directly at `key`, if any.
    #[must_use]
    pub fn leaf(&self, key: &str) -> Option<&InputError> {
        match self.nodes.get(key) {
            Some(ErrorNode::Leaf(error)) => Some(error),
            _ => None,
        }
    }

    /// Returns the subtree recorded under `key`, if any.
    #[must_use]
    pub fn branch(&self, key: &str) -> Option<&ErrorTree> {
        match self.nodes.get(key) {
            Some(ErrorNode::Branch(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Attaches `message` at `path`, creating branches along the way.
    ///
    /// The first message recorded at a node wins; later attachments at or
    /// below an occupied leaf are ignored.
    pub fn attach(&mut self, path: &[String], message: impl Into<String>) {
        fn go(tree: &mut ErrorTree, path: &[String], error: InputError) {
            let Some((head, rest)) = path.split_first() else {
                return;
            };
            if rest.is_empty() {
                tree.nodes
                    .entry(head.clone())
                    .or_insert(ErrorNode::Leaf(error));
            } else {
                let node = tree
                    .nodes
                    .entry(head.clone())
                    .or_insert_with(|| ErrorNode::Branch(ErrorTree::new()));
                if let ErrorNode::Branch(subtree) = node {
                    go(subtree, rest, error);
                }
            }
        }
        go(self, path, InputError::new(message));
    }
}

/// Ordered slot arena for one collection field.
///
/// Slot ids are allocated from a monotonic counter and never reused within
/// the form's lifetime; removal leaves a gap, so surviving slots keep their
/// ids and therefore their widget state. Iteration is in ascending id
/// order, which is the visual order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMap<T> {
    next_id: u64,
    slots: BTreeMap<u64, Option<T>>,
}

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            slots: BTreeMap::new(),
        }
    }
}

impl<T> SlotMap<T> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot holding `seed`, returning its id.
    pub fn push(&mut self, seed: Option<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.insert(id, seed);
        id
    }

    /// Removes the slot with the given id; survivors keep their ids.
    pub fn remove(&mut self, id: u64) -> bool {
        self.slots.remove(&id).is_some()
    }

    /// Number of live slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live slot ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.slots.keys().copied().collect()
    }

    /// The seed value recorded for a slot, if any.
    #[must_use]
    pub fn seed(&self, id: u64) -> Option<&T> {
        self.slots.get(&id).and_then(Option::as_ref)
    }
}

/// Slot state for one collection field.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionState {
    /// Ordered list items.
    List(SlotMap<Value>),
    /// Key/value entries.
    Map(SlotMap<(String, Value)>),
}

/// State a form carries across render passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub(crate) errors: ErrorTree,
    pub(crate) form_errors: Vec<String>,
    pub(crate) collections: HashMap<String, CollectionState>,
}

impl FormState {
    /// Creates a fresh state for a new form session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors recorded by the last failed submit.
    #[must_use]
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Violations that could not be matched to a rendered field.
    #[must_use]
    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub(crate) fn set_errors(&mut self, errors: ErrorTree, form_errors: Vec<String>) {
        self.errors = errors;
        self.form_errors = form_errors;
    }

    /// Clears errors and every collection slot under the form's key prefix.
    ///
    /// Called when a submit succeeds and the editing session ends.
    pub(crate) fn reset(&mut self, form_key: &str) {
        self.errors = ErrorTree::new();
        self.form_errors.clear();
        let prefix = format!("{form_key}_");
        self.collections
            .retain(|key, _| key != form_key && !key.starts_with(&prefix));
    }
}
