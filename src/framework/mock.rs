//! # Mock Document Controller
//!
//! Utilities for testing handlers and sessions with a scripted document.
//!
//! [`MockDocumentController`] records every call it receives and answers creation
//! requests from a queue of expectations, so tests can force the document to refuse
//! a context or check exactly what was created and destroyed.
//!
//! # Example
//! ```ignore
//! let mut doc = MockDocumentController::new();
//! doc.expect_create().return_none();
//!
//! let mut session = InteractiveSession::new(doc, HostContext::default())?;
//! // create replies {success: false}
//! ```

use crate::document::DocumentController;
use crate::model::{ContextId, DataContext, DataContextValues};
use std::collections::VecDeque;

enum Expectation {
    Create { response: Option<DataContext> },
}

/// A document controller that records calls and plays back scripted responses.
///
/// Creation requests with no queued expectation are answered by building a context
/// straight from the payload, with ids counting up from 1.
#[derive(Default)]
pub struct MockDocumentController {
    expectations: VecDeque<Expectation>,
    next_id: u32,
    pub created: Vec<DataContextValues>,
    pub destroyed: Vec<ContextId>,
}

impl MockDocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response for the next `create_data_context` call.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<'_> {
        CreateExpectationBuilder { mock: self }
    }

    /// Panics if a scripted response was never consumed.
    pub fn verify(&self) {
        if !self.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                self.expectations.len()
            );
        }
    }
}

/// Builder for `create_data_context` expectations.
pub struct CreateExpectationBuilder<'a> {
    mock: &'a mut MockDocumentController,
}

impl CreateExpectationBuilder<'_> {
    pub fn return_context(self, context: DataContext) {
        self.mock.expectations.push_back(Expectation::Create {
            response: Some(context),
        });
    }

    /// The document refuses to create the context.
    pub fn return_none(self) {
        self.mock
            .expectations
            .push_back(Expectation::Create { response: None });
    }
}

impl DocumentController for MockDocumentController {
    fn create_data_context(&mut self, values: &DataContextValues) -> Option<DataContext> {
        self.created.push(values.clone());
        if let Some(Expectation::Create { response }) = self.expectations.pop_front() {
            return response;
        }

        self.next_id += 1;
        Some(DataContext {
            id: ContextId(self.next_id),
            identifier: values.identifier.clone().unwrap_or_default(),
            title: values.title.clone().unwrap_or_default(),
            description: values.description.clone().unwrap_or_default(),
            collections: Vec::new(),
        })
    }

    fn destroy_data_context(&mut self, context: DataContext) {
        self.destroyed.push(context.id);
    }
}
