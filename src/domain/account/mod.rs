//! Account domain module.
//!
//! User accounts, password value objects and the password reset ticket
//! lifecycle. Credential storage and hashing live behind the
//! `IdentityProvider` port.

mod password;
mod reset_ticket;
mod user;

pub use password::{ConfirmedPassword, ResetToken, PASSWORDS_DO_NOT_MATCH};
pub use reset_ticket::{ResetTicket, TicketError, TicketState};
pub use user::UserAccount;
