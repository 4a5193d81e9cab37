//! The document-side collaborator that materialises data contexts.
//!
//! Identifier allocation and collection wiring belong to the document, not to the
//! plugin session. The session only holds the context it was given and enforces the
//! one-context-per-plugin rule.

use crate::model::{Collection, ContextId, DataContext, DataContextValues};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Creates and destroys data contexts on behalf of a plugin session.
pub trait DocumentController: Send {
    /// Materialises a new context from the plugin's payload.
    ///
    /// `None` means the document refused to create it.
    fn create_data_context(&mut self, values: &DataContextValues) -> Option<DataContext>;

    /// Tears down a context the session no longer holds.
    fn destroy_data_context(&mut self, context: DataContext);
}

/// In-memory document used by the standalone runtime and the tests.
#[derive(Debug)]
pub struct LocalDocumentController {
    next_id: u32,
    live: BTreeSet<ContextId>,
}

impl Default for LocalDocumentController {
    fn default() -> Self {
        Self {
            next_id: 1,
            live: BTreeSet::new(),
        }
    }
}

impl LocalDocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of contexts created and not yet destroyed.
    pub fn live_contexts(&self) -> impl Iterator<Item = ContextId> + '_ {
        self.live.iter().copied()
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl DocumentController for LocalDocumentController {
    fn create_data_context(&mut self, values: &DataContextValues) -> Option<DataContext> {
        if values.identifier.as_deref() == Some("") {
            warn!("Refusing data context with empty identifier");
            return None;
        }

        let id = ContextId(self.allocate());
        let collections = values
            .collections
            .iter()
            .map(|c| Collection {
                id: self.allocate(),
                name: c.name.clone(),
                title: c.title.clone().unwrap_or_else(|| c.name.clone()),
            })
            .collect::<Vec<_>>();

        let context = DataContext {
            id,
            identifier: values
                .identifier
                .clone()
                .unwrap_or_else(|| format!("context_{}", id)),
            title: values.title.clone().unwrap_or_default(),
            description: values.description.clone().unwrap_or_default(),
            collections,
        };
        self.live.insert(id);
        info!(%id, identifier = %context.identifier, collections = context.collections.len(), "Data context created");
        Some(context)
    }

    fn destroy_data_context(&mut self, context: DataContext) {
        if self.live.remove(&context.id) {
            info!(id = %context.id, "Data context destroyed");
        } else {
            debug!(id = %context.id, "Destroy of unknown data context ignored");
        }
    }
}
