//! # annobatch
//!
//! Batching client for hosted text and vision annotation APIs (sentiment,
//! key-phrase, entity, and vision analysis) with deterministic
//! response-to-source correlation.
//!
//! ## Overview
//!
//! The service accepts at most 25 documents per request and may reorder or
//! omit entries in its reply. This crate owns the whole round trip:
//! partitioning an arbitrary-size input set into service-sized batches,
//! building the endpoint-specific request body, performing the
//! authenticated POST exchange, and re-associating each response record
//! with the originating input record by id.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use annobatch::{AnnotateClient, Record};
//!
//! #[tokio::main]
//! async fn main() -> annobatch::Result<()> {
//!     let client = AnnotateClient::builder()
//!         .base_url("https://westus2.api.cognitive.example.com")
//!         .subscription_key("your-key")
//!         .build()?;
//!
//!     let articles = vec![
//!         Record::new(1).with_property("body", "The launch went flawlessly."),
//!         Record::new(2).with_property("body", "Delays again. Unacceptable."),
//!     ];
//!
//!     for result in client.sentiment(&articles, "body", &[]).await? {
//!         println!("{:?} -> {:?}", result.entity.map(|e| e.id), result.record);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | High-level client: partition, dispatch, correlate |
//! | [`transport`] | Authenticated POST exchange for one batch |
//! | [`endpoint`] | Capability enum and static path table |
//! | [`input`] | Input normalization into flat document lists |
//! | [`batch`] | Partitioning and per-batch outcome collection |
//! | [`correlate`] | Id-based response-to-entity matching |
//! | [`types`] | `Document`, `Entity` seam, response records |

pub mod batch;
pub mod client;
pub mod correlate;
pub mod endpoint;
pub mod input;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use batch::{partition, BatchOutcome, MAX_BATCH_SIZE};
pub use client::{AnnotateClient, AnnotateClientBuilder};
pub use correlate::{correlate, Correlated};
pub use endpoint::Capability;
pub use input::AnalysisInput;
pub use transport::{Payload, TransportClient, SUBSCRIPTION_KEY_HEADER};
pub use types::{Document, Entity, Record, ResponseRecord};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
