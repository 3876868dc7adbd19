//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{DisabledMailboxProbe, FixtureMailExchangeResolver};
use backend::domain::{ClientFieldsValidator, ClientService, EmailVerifier, MortgageService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::dns::DnsMailExchangeResolver;
use backend::outbound::persistence::InMemoryLendingStore;
use backend::outbound::smtp::SmtpMailboxProbe;

use super::config::{EmailChecks, ServerConfig};

/// Build the email verifier for the configured check policy.
fn build_email_verifier(checks: &EmailChecks) -> EmailVerifier {
    match checks {
        EmailChecks::SyntaxOnly => EmailVerifier::new(
            Arc::new(FixtureMailExchangeResolver),
            Arc::new(DisabledMailboxProbe),
        ),
        EmailChecks::Network { dns_timeout, probe } => {
            let resolver = Arc::new(DnsMailExchangeResolver::new(*dns_timeout));
            match probe {
                Some(config) => {
                    EmailVerifier::new(resolver, Arc::new(SmtpMailboxProbe::new(config.clone())))
                        .with_probe_timeout(config.timeout)
                }
                None => EmailVerifier::new(resolver, Arc::new(DisabledMailboxProbe)),
            }
        }
    }
}

/// Build the HTTP state over one shared in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryLendingStore::new());
    let validator = ClientFieldsValidator::new(build_email_verifier(&config.email_checks));
    let clients = Arc::new(ClientService::new(store.clone(), store.clone(), validator));
    let mortgages = Arc::new(MortgageService::new(store.clone(), store));

    web::Data::new(HttpState::new(HttpStatePorts {
        clients: clients.clone(),
        clients_query: clients,
        mortgages: mortgages.clone(),
        mortgages_query: mortgages,
    }))
}
