use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Interprets event dates and times in the venue's local timezone.
#[derive(Debug, Clone, Copy)]
pub struct EventSchedule {
    tz: Tz,
}

impl Default for EventSchedule {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl EventSchedule {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// The calendar date of `now` in the event timezone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// The instant an event starts.
    ///
    /// An ambiguous local time (clocks going back) resolves to the earlier
    /// instant. A local time that falls in a DST gap resolves to the first
    /// valid instant after the gap.
    pub fn starts_at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let local = date.and_time(time);

        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                // Gaps start and end on minute boundaries, so walking whole
                // minutes from the truncated time lands on the gap's end.
                let mut candidate = local
                    - Duration::seconds(i64::from(local.second()))
                    - Duration::nanoseconds(i64::from(local.nanosecond()));
                loop {
                    candidate += Duration::minutes(1);
                    if let Some(dt) = self.tz.from_local_datetime(&candidate).earliest() {
                        return dt.with_timezone(&Utc);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_today_follows_event_timezone() {
        let schedule = EventSchedule::new(chrono_tz::Asia::Kolkata);
        // 20:00 UTC is already 01:30 the next day in Kolkata.
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 20, 0, 0).unwrap();

        assert_eq!(schedule.today(now), ymd(2026, 1, 6));
        assert_eq!(EventSchedule::default().today(now), ymd(2026, 1, 5));
    }

    #[test]
    fn test_starts_at_converts_local_time() {
        let schedule = EventSchedule::new(chrono_tz::Asia::Kolkata);
        let start = schedule.starts_at(ymd(2026, 1, 6), hm(9, 0));

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 6, 3, 30, 0).unwrap());
    }

    #[test]
    fn test_starts_at_in_dst_gap_moves_past_gap() {
        let schedule = EventSchedule::new(chrono_tz::Europe::London);
        // 01:30 on 2026-03-29 does not exist in London; clocks jump to 02:00 BST.
        let start = schedule.starts_at(ymd(2026, 3, 29), hm(1, 30));

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_starts_at_in_dst_gap_drops_seconds() {
        let schedule = EventSchedule::new(chrono_tz::Europe::London);
        let start = schedule.starts_at(
            ymd(2026, 3, 29),
            NaiveTime::from_hms_opt(1, 30, 30).unwrap(),
        );

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap());

        let just_before_end = schedule.starts_at(
            ymd(2026, 3, 29),
            NaiveTime::from_hms_milli_opt(1, 59, 59, 500).unwrap(),
        );
        assert_eq!(just_before_end, start);
    }
}
