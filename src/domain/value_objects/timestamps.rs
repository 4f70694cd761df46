use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from(dt: OffsetDateTime) -> Self {
        Self(dt.to_offset(UtcOffset::UTC))
    }

    /// Returns the inner UTC `OffsetDateTime` without consuming the wrapper.
    pub fn as_inner(&self) -> OffsetDateTime {
        self.0
    }

    /// Adds `offset`, returning `None` if the result leaves the representable range.
    pub fn checked_add(&self, offset: Duration) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }

    /// RFC 3339 rendering used on the wire.
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_default()
    }

    /// Calendar date (`YYYY-MM-DD`) in UTC.
    pub fn to_date_string(&self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn given_from_with_non_utc_offset_when_called_should_store_utc_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).expect("valid offset");
        let dt = OffsetDateTime::now_utc().to_offset(offset);
        let result = Timestamp::from(dt);
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
        assert_eq!(result.as_inner().unix_timestamp(), dt.unix_timestamp());
    }

    #[test]
    fn given_timestamp_when_formatted_should_render_rfc3339_and_date() {
        let ts = Timestamp::from(datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(ts.to_rfc3339(), "2024-01-02T03:04:05Z");
        assert_eq!(ts.to_date_string(), "2024-01-02");
    }

    #[test]
    fn given_offset_past_max_when_checked_add_should_return_none() {
        let ts = Timestamp::from(datetime!(9999-12-31 23:00:00 UTC));
        assert!(ts.checked_add(Duration::days(2)).is_none());
        assert!(ts.checked_add(Duration::minutes(30)).is_some());
    }

    #[test]
    fn given_two_instants_when_compared_should_order_by_time() {
        let earlier = Timestamp::from(datetime!(2024-01-01 00:00:00 UTC));
        let later = Timestamp::from(datetime!(2024-01-01 00:00:01 UTC));
        assert!(earlier < later);
    }
}
