//! Host-side state of one plugin session.
//!
//! [`ResourceModel`] holds the frame metadata and the single optional data context.
//! It is mutated only by the resource handlers.

pub mod data_context;
pub mod frame;

pub use data_context::*;
pub use frame::*;

/// The resources a plugin session owns.
///
/// # Invariant
/// At most one [`DataContext`] per model. [`attach_data_context`](Self::attach_data_context)
/// refuses to overwrite an occupied slot.
#[derive(Debug, Default)]
pub struct ResourceModel {
    pub frame: Frame,
    data_context: Option<DataContext>,
}

impl ResourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_context(&self) -> Option<&DataContext> {
        self.data_context.as_ref()
    }

    pub fn data_context_mut(&mut self) -> Option<&mut DataContext> {
        self.data_context.as_mut()
    }

    pub fn has_data_context(&self) -> bool {
        self.data_context.is_some()
    }

    /// Stores `context` in the empty slot, handing it back if one is already attached.
    pub fn attach_data_context(&mut self, context: DataContext) -> Result<(), DataContext> {
        if self.data_context.is_some() {
            return Err(context);
        }
        self.data_context = Some(context);
        Ok(())
    }

    /// Clears the slot, returning whatever was attached.
    pub fn release_data_context(&mut self) -> Option<DataContext> {
        self.data_context.take()
    }
}
