use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parses a provider timestamp. The news API sends RFC 2822
/// (`Mon, 19 Oct 2026 09:30:00 +0900`); RFC 3339 is accepted as well.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// How far back an article may have been published and still count as recent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    days: u32,
}

impl RecencyWindow {
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    /// Midnight, in `now`'s time zone, `days` calendar days before `now`.
    pub fn cutoff<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let tz = now.timezone();
        // Keep clear of NaiveDate::MIN so applying an offset cannot overflow.
        let floor = NaiveDate::MIN
            .checked_add_days(Days::new(2))
            .unwrap_or(NaiveDate::MIN);
        let day = now
            .date_naive()
            .checked_sub_days(Days::new(u64::from(self.days)))
            .map_or(floor, |day| day.max(floor));
        let midnight = day.and_time(NaiveTime::MIN);

        match tz.from_local_datetime(&midnight).earliest() {
            Some(local) => local.with_timezone(&Utc),
            // Midnight skipped by a DST transition.
            None => tz.from_utc_datetime(&midnight).with_timezone(&Utc),
        }
    }

    pub fn admits(&self, published: &DateTime<FixedOffset>, cutoff: &DateTime<Utc>) -> bool {
        published.with_timezone(&Utc) >= *cutoff
    }
}
