//! High-level annotation client.
//!
//! Owns the partition → send → correlate loop: callers hand over their
//! entities and a property name, and get back response records paired with
//! the entities they came from.

use crate::batch::{self, BatchOutcome};
use crate::correlate::{correlate, Correlated};
use crate::endpoint::Capability;
use crate::input::AnalysisInput;
use crate::transport::{Payload, TransportClient, TransportClientBuilder};
use crate::types::{Document, Entity, ResponseRecord};
use crate::Result;
use bytes::Bytes;
use futures::stream::{self, StreamExt};

pub struct AnnotateClient {
    transport: TransportClient,
    concurrency: usize,
}

impl AnnotateClient {
    pub fn builder() -> AnnotateClientBuilder {
        AnnotateClientBuilder::new()
    }

    /// Analyze every entity's named text property under one capability.
    ///
    /// The entity set is partitioned into service-sized batches, each batch
    /// is one POST exchange, and every response record comes back paired
    /// with its source entity. Within a batch the service's response order
    /// is authoritative; batches concatenate in input order. Fails on the
    /// first batch error.
    pub async fn analyze<'a, E: Entity>(
        &self,
        capability: Capability,
        entities: &'a [E],
        property: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Correlated<'a, E>>> {
        let batches = batch::partition(entities, property)?;
        let mut out = Vec::with_capacity(entities.len());
        for result in self.dispatch(capability, batches, params).await {
            out.extend(correlate(result?, entities)?);
        }
        Ok(out)
    }

    /// Continue-on-error variant of [`analyze`](Self::analyze): every batch
    /// is dispatched regardless of earlier failures, and the outcome keeps
    /// per-batch successes and failures with their batch indexes.
    pub async fn analyze_each<'a, E: Entity>(
        &self,
        capability: Capability,
        entities: &'a [E],
        property: &str,
        params: &[(String, String)],
    ) -> Result<BatchOutcome<Vec<Correlated<'a, E>>>> {
        let batches = batch::partition(entities, property)?;
        let mut outcome = BatchOutcome::new();
        for (index, result) in self
            .dispatch(capability, batches, params)
            .await
            .into_iter()
            .enumerate()
        {
            outcome.record(index, result.and_then(|records| correlate(records, entities)));
        }
        Ok(outcome)
    }

    pub async fn sentiment<'a, E: Entity>(
        &self,
        entities: &'a [E],
        property: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Correlated<'a, E>>> {
        self.analyze(Capability::Sentiment, entities, property, params)
            .await
    }

    pub async fn key_phrases<'a, E: Entity>(
        &self,
        entities: &'a [E],
        property: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Correlated<'a, E>>> {
        self.analyze(Capability::KeyPhrases, entities, property, params)
            .await
    }

    pub async fn entities<'a, E: Entity>(
        &self,
        entities: &'a [E],
        property: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Correlated<'a, E>>> {
        self.analyze(Capability::Entities, entities, property, params)
            .await
    }

    /// Submit a raw image to the vision endpoint.
    ///
    /// Binary payloads carry no document ids, so there is nothing to
    /// correlate; the service's records come back as-is.
    pub async fn analyze_image(
        &self,
        image: Bytes,
        params: &[(String, String)],
    ) -> Result<Vec<ResponseRecord>> {
        self.transport
            .send(Capability::Vision, Payload::Binary(image), params)
            .await
    }

    /// Pre-batched escape hatch: send already-converted input under one
    /// capability and get the raw response records, skipping partitioning
    /// and correlation.
    pub async fn send_documents(
        &self,
        capability: Capability,
        input: impl Into<AnalysisInput>,
        params: &[(String, String)],
    ) -> Result<Vec<ResponseRecord>> {
        self.transport
            .send(capability, Payload::Documents(input.into()), params)
            .await
    }

    /// Dispatch batches with bounded concurrency. `buffered` preserves
    /// batch order in the output regardless of completion order.
    async fn dispatch(
        &self,
        capability: Capability,
        batches: Vec<Vec<Document>>,
        params: &[(String, String)],
    ) -> Vec<Result<Vec<ResponseRecord>>> {
        stream::iter(batches.into_iter().map(|documents| {
            self.transport.send(
                capability,
                Payload::Documents(AnalysisInput::from(documents)),
                params,
            )
        }))
        .buffered(self.concurrency.max(1))
        .collect()
        .await
    }
}

pub struct AnnotateClientBuilder {
    transport: TransportClientBuilder,
    concurrency: usize,
}

impl AnnotateClientBuilder {
    pub fn new() -> Self {
        Self {
            transport: TransportClientBuilder::new(),
            // Sequential by default: one in-flight exchange at a time.
            concurrency: 1,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.transport = self.transport.base_url(url);
        self
    }

    pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
        self.transport = self.transport.subscription_key(key);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.transport = self.transport.timeout_secs(secs);
        self
    }

    /// Maximum number of batches in flight at once. Batches share no
    /// mutable state, so any limit the remote side tolerates is safe.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit;
        self
    }

    pub fn build(self) -> Result<AnnotateClient> {
        Ok(AnnotateClient {
            transport: self.transport.build()?,
            concurrency: self.concurrency,
        })
    }
}

impl Default for AnnotateClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
