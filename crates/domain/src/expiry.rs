use chrono::{DateTime, Duration, Utc};

/// Default and maximum grant durations applied by the expiry calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryBounds {
    /// Duration applied when a request does not ask for an expiry.
    pub default_duration: Duration,
    /// Hard ceiling on any grant duration.
    pub max_duration: Duration,
}

impl Default for ExpiryBounds {
    fn default() -> Self {
        Self {
            default_duration: Duration::minutes(10),
            max_duration: Duration::hours(1),
        }
    }
}

/// Computes the instant at which a grant must be revoked.
///
/// An unset `requested` expiry falls back to the default duration. The
/// duration is clamped to at most `bounds.max_duration`, never extended,
/// and may be negative: a requested expiry before `start` yields an
/// instant in the past, which expires the request immediately.
#[must_use]
pub fn effective_expiry(
    start: DateTime<Utc>,
    requested: Option<DateTime<Utc>>,
    bounds: ExpiryBounds,
) -> DateTime<Utc> {
    let mut duration = match requested {
        None => bounds.default_duration,
        Some(requested) => requested - start,
    };
    if duration > bounds.max_duration {
        duration = bounds.max_duration;
    }
    start + duration
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;

    use super::{ExpiryBounds, effective_expiry};

    fn instant(offset_minutes: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(offset_minutes)
    }

    fn bounds(default_minutes: i64, max_minutes: i64) -> ExpiryBounds {
        ExpiryBounds {
            default_duration: Duration::minutes(default_minutes),
            max_duration: Duration::minutes(max_minutes),
        }
    }

    #[test]
    fn unset_requested_uses_default_duration() {
        let start = instant(0);
        assert_eq!(
            effective_expiry(start, None, bounds(1, 60)),
            start + Duration::minutes(1)
        );
    }

    #[test]
    fn default_is_clamped_to_max() {
        let start = instant(0);
        assert_eq!(
            effective_expiry(start, None, bounds(60, 1)),
            start + Duration::minutes(1)
        );
    }

    #[test]
    fn requested_expiry_is_used() {
        let start = instant(0);
        let requested = instant(60);
        assert_eq!(
            effective_expiry(start, Some(requested), bounds(1, 120)),
            requested
        );
    }

    #[test]
    fn requested_expiry_is_clamped_to_max() {
        let start = instant(0);
        assert_eq!(
            effective_expiry(start, Some(instant(60)), bounds(1, 2)),
            start + Duration::minutes(2)
        );
    }

    #[test]
    fn requested_before_start_expires_in_the_past() {
        let start = instant(60);
        let requested = instant(0);
        assert_eq!(
            effective_expiry(start, Some(requested), bounds(1, 2)),
            requested
        );
    }

    proptest! {
        #[test]
        fn never_later_than_start_plus_max(
            start_offset in -1_000_000i64..1_000_000,
            requested_offset in proptest::option::of(-1_000_000i64..1_000_000),
            default_secs in 0i64..100_000,
            max_secs in 0i64..100_000,
        ) {
            let start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(start_offset);
            let requested =
                requested_offset.map(|offset| DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(offset));
            let bounds = ExpiryBounds {
                default_duration: Duration::seconds(default_secs),
                max_duration: Duration::seconds(max_secs),
            };

            prop_assert!(effective_expiry(start, requested, bounds) <= start + bounds.max_duration);
        }

        #[test]
        fn unset_requested_applies_clamped_default(
            start_offset in -1_000_000i64..1_000_000,
            default_secs in 0i64..100_000,
            max_secs in 0i64..100_000,
        ) {
            let start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(start_offset);
            let bounds = ExpiryBounds {
                default_duration: Duration::seconds(default_secs),
                max_duration: Duration::seconds(max_secs),
            };
            let expected = start + bounds.default_duration.min(bounds.max_duration);

            prop_assert_eq!(effective_expiry(start, None, bounds), expected);
        }

        #[test]
        fn requested_before_start_has_no_floor(
            start_offset in 0i64..1_000_000,
            lead_secs in 1i64..1_000_000,
            default_secs in 0i64..100_000,
            max_secs in 0i64..100_000,
        ) {
            let start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(start_offset);
            let requested = start - Duration::seconds(lead_secs);
            let bounds = ExpiryBounds {
                default_duration: Duration::seconds(default_secs),
                max_duration: Duration::seconds(max_secs),
            };

            prop_assert!(effective_expiry(start, Some(requested), bounds) < start);
        }
    }
}
