//! Storage Engine
//!
//! Expiring sequence and mapping collections.

mod mapping;
mod sequence;

pub use mapping::ExpiringMapping;
pub use sequence::ExpiringSequence;
