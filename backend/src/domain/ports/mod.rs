//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod client_command;
mod client_query;
mod client_repository;
mod mail_exchange_resolver;
mod mailbox_probe;
mod mortgage_command;
mod mortgage_query;
mod mortgage_repository;

#[cfg(test)]
pub use client_command::MockClientCommand;
pub use client_command::{ClientCommand, FixtureClientCommand};
#[cfg(test)]
pub use client_query::MockClientQuery;
pub use client_query::{ClientQuery, FixtureClientQuery};
#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientRepository, ClientRepositoryError};
#[cfg(test)]
pub use mail_exchange_resolver::MockMailExchangeResolver;
pub use mail_exchange_resolver::{
    FixtureMailExchangeResolver, MailExchangeError, MailExchangeResolver,
};
#[cfg(test)]
pub use mailbox_probe::MockMailboxProbe;
pub use mailbox_probe::{DisabledMailboxProbe, MailboxProbe, MailboxProbeError, RecipientVerdict};
#[cfg(test)]
pub use mortgage_command::MockMortgageCommand;
pub use mortgage_command::{FixtureMortgageCommand, MortgageCommand};
#[cfg(test)]
pub use mortgage_query::MockMortgageQuery;
pub use mortgage_query::{FixtureMortgageQuery, MortgageQuery};
#[cfg(test)]
pub use mortgage_repository::MockMortgageRepository;
pub use mortgage_repository::{
    FixtureMortgageRepository, MortgageRepository, MortgageRepositoryError,
};
