use chrono::{DateTime, Duration, Utc};

/// An issued access token. Replaced on renewal, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub issued_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl Token {
    pub fn new(value: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self { value, issued_at, ttl }
    }

    /// `None` when `issued_at + ttl` falls outside the representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at.checked_add_signed(self.ttl)
    }

    /// Valid iff `now < issued_at + ttl - margin`. An unrepresentable
    /// expiry counts as expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at()
            .and_then(|expiry| expiry.checked_sub_signed(margin))
            .is_some_and(|limit| now < limit)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &"***")
            .field("issued_at", &self.issued_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_window_is_half_open() {
        let issued = Utc::now();
        let token = Token::new("t".into(), issued, Duration::minutes(10));

        assert!(token.is_valid_at(issued, Duration::zero()));
        assert!(token.is_valid_at(issued + Duration::seconds(599), Duration::zero()));
        assert!(!token.is_valid_at(issued + Duration::minutes(10), Duration::zero()));
    }

    #[test]
    fn margin_moves_the_boundary_earlier() {
        let issued = Utc::now();
        let token = Token::new("t".into(), issued, Duration::minutes(10));
        let margin = Duration::seconds(30);

        assert!(token.is_valid_at(issued + Duration::seconds(569), margin));
        assert!(!token.is_valid_at(issued + Duration::seconds(570), margin));
        assert_eq!(token.age(issued + Duration::seconds(570)), Duration::seconds(570));
    }

    #[test]
    fn overflowing_expiry_is_treated_as_expired() {
        let issued = Utc::now();
        let token = Token::new("t".into(), issued, Duration::MAX);

        assert_eq!(token.expires_at(), None);
        assert!(!token.is_valid_at(issued, Duration::seconds(30)));
    }
}
