use thiserror::Error;

use super::ChangeEvent;

/// Failure to hand an event to a recipient's link
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,
    #[error("outbound queue full")]
    Full,
}

/// Outbound side of one connection.
///
/// `deliver` must not block: the dispatcher calls it for every recipient in
/// turn, and a slow link may never hold up the others. A link that cannot
/// take the event right now reports `Full` and misses it.
pub trait Transport: Clone + Send + 'static {
    fn deliver(&self, event: &ChangeEvent) -> Result<(), DeliveryError>;
}
