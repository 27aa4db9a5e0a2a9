//! Payment Bridge
//!
//! Boundary to the external payment provider: outbound transaction
//! creation behind the [`PaymentGateway`] trait, inbound status
//! notifications mapped by [`notification`].

pub mod gateway;
pub mod notification;

pub use gateway::{PaymentGateway, SnapGateway};
pub use notification::map_transaction_status;
