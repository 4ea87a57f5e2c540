//! Shared [`api::PersonneService`] handle for every view.
//!
//! The service is created once by [`ServiceProvider`] and read from context with
//! [`use_personne_service`]. Clones share the transport and the list cache, so a
//! write made from one view refreshes the list shown by another.

use api::{ClientConfig, HttpTransport, PersonneService};
use dioxus::prelude::*;

/// The service type used by the views.
pub type Service = PersonneService<HttpTransport>;

/// Create a service talking to the configured GraphQL endpoint.
pub fn make_service(config: &ClientConfig) -> Service {
    tracing::info!("GraphQL endpoint: {}", config.endpoint);
    PersonneService::new(HttpTransport::new(config))
}

pub fn use_personne_service() -> Service {
    use_context::<Service>()
}

/// Provider component that owns the record service.
/// Wrap the router with this component.
#[component]
pub fn ServiceProvider(children: Element) -> Element {
    use_context_provider(|| make_service(&ClientConfig::from_env()));

    rsx! {
        {children}
    }
}
