//! Expiration Sweeper
//!
//! Background eviction thread and the channel it reports evictions on.

mod notifier;
mod worker;

pub use notifier::Notifier;
pub use worker::{Sweep, Sweeper};
