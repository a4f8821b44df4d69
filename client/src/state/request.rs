//! Request tickets for ignoring superseded responses.
//!
//! A widget issues a fresh [`Ticket`] when it starts a request and checks it
//! again when the response lands. If another request started in between, the
//! older ticket is no longer current and its response is dropped.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

/// Identifies one outbound request of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonically increasing per-widget request counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq {
    current: u64,
}

impl RequestSeq {
    /// Start a new request, superseding every earlier ticket.
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
