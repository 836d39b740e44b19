//! Password reset ticket state machine.
//!
//! ```text
//! Issued ──consume──► Consumed   (terminal)
//!    │
//!    └──clock──────► Expired    (terminal)
//! ```
//!
//! Only a digest of the token is kept; comparison is constant-time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};

/// Observable state of a ticket at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Issued,
    Consumed,
    Expired,
}

/// Why a ticket could not be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("token does not match")]
    Mismatch,
    #[error("token already used")]
    AlreadyConsumed,
    #[error("token expired")]
    Expired,
}

/// Single-use, time-bounded password reset ticket.
#[derive(Debug, Clone)]
pub struct ResetTicket {
    user_id: UserId,
    token_digest: [u8; 32],
    issued_at: Timestamp,
    expires_at: Timestamp,
    consumed: bool,
}

impl ResetTicket {
    /// Issues a ticket for `token`, valid for `ttl_minutes` after `issued_at`.
    pub fn issue(user_id: UserId, token: &str, issued_at: Timestamp, ttl_minutes: i64) -> Self {
        Self {
            user_id,
            token_digest: digest(token),
            issued_at,
            expires_at: issued_at.plus_minutes(ttl_minutes),
            consumed: false,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn issued_at(&self) -> &Timestamp {
        &self.issued_at
    }

    pub fn state(&self, now: &Timestamp) -> TicketState {
        if self.consumed {
            TicketState::Consumed
        } else if !now.is_before(&self.expires_at) {
            TicketState::Expired
        } else {
            TicketState::Issued
        }
    }

    /// Constant-time check of a presented token against the stored digest.
    pub fn matches(&self, token: &str) -> bool {
        self.token_digest[..].ct_eq(&digest(token)[..]).into()
    }

    /// Moves `Issued -> Consumed`. Every other path is an error and leaves
    /// the ticket untouched.
    pub fn consume(&mut self, token: &str, now: &Timestamp) -> Result<(), TicketError> {
        if !self.matches(token) {
            return Err(TicketError::Mismatch);
        }
        match self.state(now) {
            TicketState::Issued => {
                self.consumed = true;
                Ok(())
            }
            TicketState::Consumed => Err(TicketError::AlreadyConsumed),
            TicketState::Expired => Err(TicketError::Expired),
        }
    }
}

fn digest(token: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(token.as_bytes()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(ttl: i64) -> (ResetTicket, Timestamp) {
        let issued = Timestamp::from_unix_secs(1_000_000);
        (ResetTicket::issue(UserId::new(), "tok-123", issued, ttl), issued)
    }

    #[test]
    fn fresh_ticket_is_issued() {
        let (ticket, issued) = ticket(30);
        assert_eq!(ticket.state(&issued), TicketState::Issued);
    }

    #[test]
    fn consume_moves_to_consumed() {
        let (mut ticket, issued) = ticket(30);

        ticket.consume("tok-123", &issued.plus_minutes(1)).unwrap();

        assert_eq!(ticket.state(&issued), TicketState::Consumed);
    }

    #[test]
    fn second_consume_fails() {
        let (mut ticket, issued) = ticket(30);
        ticket.consume("tok-123", &issued).unwrap();

        assert_eq!(ticket.consume("tok-123", &issued), Err(TicketError::AlreadyConsumed));
    }

    #[test]
    fn expired_ticket_cannot_be_consumed() {
        let (mut ticket, issued) = ticket(30);
        let later = issued.plus_minutes(30);

        assert_eq!(ticket.state(&later), TicketState::Expired);
        assert_eq!(ticket.consume("tok-123", &later), Err(TicketError::Expired));
    }

    #[test]
    fn wrong_token_is_rejected_without_consuming() {
        let (mut ticket, issued) = ticket(30);

        assert_eq!(ticket.consume("guess", &issued), Err(TicketError::Mismatch));
        assert_eq!(ticket.state(&issued), TicketState::Issued);
    }
}
