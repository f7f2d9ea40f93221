//! Expiring Entry

use std::time::{Duration, Instant};

/// Expiry used when `now + ttl` does not fit in an `Instant` (~100 years)
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 86_400);

/// A stored value with its absolute expiration instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    /// Creates an entry expiring at the given instant
    pub fn new(value: V, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    /// Creates an entry expiring `ttl` from now.
    /// TTLs too large to represent are clamped to roughly a century.
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self::new(value, expires_at)
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// True once `now` is strictly past the expiry instant.
    /// An entry expiring exactly at `now` is still live.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at < now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_not_expired() {
        let entry = Entry::with_ttl("value", Duration::from_secs(60));
        assert_eq!(*entry.value(), "value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expired() {
        let entry = Entry::new("value", Instant::now() - Duration::from_secs(1));
        assert!(entry.is_expired());
        assert_eq!(entry.into_value(), "value");
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let entry = Entry::with_ttl("forever", Duration::MAX);
        assert!(!entry.is_expired());
        assert!(entry.expires_at() > Instant::now() + Duration::from_secs(365 * 86_400));
    }

    #[test]
    fn test_expiry_tie_is_live() {
        let now = Instant::now();
        let entry = Entry::new(1u32, now);
        assert!(!entry.is_expired_at(now));
        assert!(entry.is_expired_at(now + Duration::from_nanos(1)));
    }
}
