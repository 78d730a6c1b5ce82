//! Collection rendering over stable slot identities.
//!
//! A collection field owns an ordered arena of slots keyed by the widget
//! key. Slots are seeded once from the initial values, then re-rendered in
//! id order on every pass; the host's widget state keeps each slot's edits
//! attached to its id, so removing one slot never shifts the values of the
//! survivors. Reported results never contain placeholder slots: absent
//! item values are filtered out while their slots stay visible for further
//! editing.

use ferroform_schema::{FieldPath, ItemType, Property};
use serde_json::{Map, Value};

use crate::error::{FormError, Result};
use crate::generator::Renderer;
use crate::host::{Host, TextOpts};
use crate::inputs::ensure_scalar_item;
use crate::state::{CollectionState, SlotMap};

impl<H: Host> Renderer<'_, H> {
    /// Renders an ordered list field and returns the collected values.
    pub(crate) fn resolve_list(
        &mut self,
        property: &Property,
        items: &ItemType,
        key: &str,
        path: &FieldPath,
        initial: Option<&Value>,
    ) -> Result<Value> {
        ensure_scalar_item(items, path)?;

        let mut slots = match self.state.collections.remove(key) {
            Some(CollectionState::List(slots)) => slots,
            Some(other) => {
                self.state.collections.insert(key.to_string(), other);
                return Err(FormError::CollectionStateMismatch {
                    key: key.to_string(),
                });
            }
            None => {
                // First render of this path: one slot per initial element,
                // ids ascending from zero.
                let mut slots = SlotMap::new();
                if let Some(Value::Array(values)) = initial {
                    for value in values {
                        slots.push(Some(value.clone()));
                    }
                }
                slots
            }
        };

        self.host.label(&property.title);
        self.host.begin_group(&format!("{key}_items"));

        let mut collected = Vec::new();
        for id in slots.ids() {
            let seed = slots.seed(id).cloned();
            let value = self.item_input(items, &format!("{key}_{id}"), path, seed.as_ref())?;
            if self.host.button(&format!("rmbtn_{key}_{id}"), "-") {
                slots.remove(id);
                self.host.request_rerender();
            } else if !value.is_null() {
                collected.push(value);
            }
        }

        let at_capacity = property.max_items.is_some_and(|max| slots.len() >= max);
        if !at_capacity && self.host.button(&format!("{key}_add"), "+") {
            slots.push(None);
            self.host.request_rerender();
        }

        self.host.end_group();
        self.state
            .collections
            .insert(key.to_string(), CollectionState::List(slots));
        Ok(Value::Array(collected))
    }

    /// Renders a key/value map field and returns the collected pairs.
    pub(crate) fn resolve_map(
        &mut self,
        property: &Property,
        entries: &ItemType,
        key: &str,
        path: &FieldPath,
        initial: Option<&Value>,
    ) -> Result<Value> {
        ensure_scalar_item(entries, path)?;

        let mut slots = match self.state.collections.remove(key) {
            Some(CollectionState::Map(slots)) => slots,
            Some(other) => {
                self.state.collections.insert(key.to_string(), other);
                return Err(FormError::CollectionStateMismatch {
                    key: key.to_string(),
                });
            }
            None => {
                let mut slots = SlotMap::new();
                if let Some(Value::Object(values)) = initial {
                    for (entry_key, value) in values {
                        slots.push(Some((entry_key.clone(), value.clone())));
                    }
                }
                slots
            }
        };

        self.host.label(&property.title);
        self.host.begin_group(&format!("{key}_entries"));

        let mut collected = Map::new();
        for id in slots.ids() {
            let (seed_key, seed_value) = match slots.seed(id).cloned() {
                Some((entry_key, value)) => (entry_key, Some(value)),
                None => (String::new(), None),
            };
            let entry_key = self.host.text_input(
                &format!("{key}_{id}_key"),
                "",
                &seed_key,
                TextOpts::default(),
            );
            let value = self.item_input(
                entries,
                &format!("{key}_{id}_value"),
                path,
                seed_value.as_ref(),
            )?;
            if self.host.button(&format!("rmbtn_{key}_{id}"), "-") {
                slots.remove(id);
                self.host.request_rerender();
            } else if !value.is_null() {
                collected.insert(entry_key, value);
            }
        }

        let at_capacity = property.max_items.is_some_and(|max| slots.len() >= max);
        if !at_capacity && self.host.button(&format!("{key}_add"), "+") {
            slots.push(None);
            self.host.request_rerender();
        }

        self.host.end_group();
        self.state
            .collections
            .insert(key.to_string(), CollectionState::Map(slots));
        Ok(Value::Object(collected))
    }
}
