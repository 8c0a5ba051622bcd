//! Batch partitioning and per-batch outcome collection.

use crate::types::{Document, Entity};
use crate::{Error, Result};

/// Per-request item limit imposed by the service.
pub const MAX_BATCH_SIZE: usize = 25;

/// Extract `{id, text}` documents from the entities and split them into
/// consecutive chunks of at most [`MAX_BATCH_SIZE`].
///
/// Chunk boundaries are purely positional: every entity lands in exactly
/// one chunk, in its original relative order, and the concatenation of the
/// chunks equals the extracted sequence. An entity without the named
/// property fails the whole partition before anything is sent.
pub fn partition<E: Entity>(entities: &[E], property: &str) -> Result<Vec<Vec<Document>>> {
    let mut documents = Vec::with_capacity(entities.len());
    for entity in entities {
        let text = entity
            .property(property)
            .ok_or_else(|| Error::MissingProperty {
                id: entity.identity(),
                property: property.to_string(),
            })?;
        documents.push(Document::new(entity.identity(), text));
    }
    Ok(documents
        .chunks(MAX_BATCH_SIZE)
        .map(<[Document]>::to_vec)
        .collect())
}

/// Outcome of dispatching a set of batches with continue-on-error
/// semantics: indexed successes and failures, in batch order.
#[derive(Debug, Default)]
pub struct BatchOutcome<T> {
    pub successes: Vec<(usize, T)>,
    pub failures: Vec<(usize, Error)>,
}

impl<T> BatchOutcome<T> {
    pub fn new() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, index: usize, result: Result<T>) {
        match result {
            Ok(value) => self.successes.push((index, value)),
            Err(err) => self.failures.push((index, err)),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Successful payloads in batch order, discarding indexes.
    pub fn into_successes(self) -> Vec<T> {
        self.successes.into_iter().map(|(_, value)| value).collect()
    }
}
