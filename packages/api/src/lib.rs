//! # API crate: GraphQL client for the Personnes service
//!
//! This crate is everything the front-end knows about the remote GraphQL API. It
//! defines the wire models, the operation documents, the transport seam, and the
//! [`PersonneService`] that views call.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | GraphQL endpoint from defaults, `.env` or the build-time environment |
//! | [`error`] | [`ApiError`], the single error type returned by transports and the service |
//! | [`graphql`] | Operation documents and the GraphQL-over-HTTP request/response envelopes |
//! | [`memory`] | [`MemoryBackend`], an in-process [`Transport`] with the server's semantics |
//! | [`models`] | [`Personne`] and [`PersonneInput`] |
//! | [`service`] | [`PersonneService`] and the [`PersonnesWatch`] list stream |
//! | [`transport`] | The [`Transport`] trait and the reqwest-backed [`HttpTransport`] |
//!
//! ## Cache model
//!
//! Only the "list all" result is cached. Lookups by id and by name always go to the
//! server. Every successful write refetches the list and pushes the fresh result to
//! every open [`PersonnesWatch`].

pub mod config;
pub mod error;
pub mod graphql;
pub mod memory;
pub mod models;
pub mod service;
pub mod transport;

pub use config::ClientConfig;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use models::{Personne, PersonneInput};
pub use service::{ListResult, PersonneService, PersonnesWatch};
pub use transport::{HttpTransport, Transport};
