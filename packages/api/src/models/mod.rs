//! Data models exchanged with the GraphQL API.

mod personne;

pub use personne::{Personne, PersonneInput};
