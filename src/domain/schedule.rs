//! Appointment slot arithmetic.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use crate::constants::schedule::{CALENDAR_SLOTS, SLOT_UNIVERSE};

/// Free and taken slots for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub available_slots: Vec<String>,
    pub booked_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub available: bool,
    pub available_slots: Vec<&'static str>,
}

/// Subtracts booked times from the slot universe, keeping universe order.
///
/// `booked_slots` keeps the order the bookings were given in, duplicates
/// included, since double booking is not prevented.
#[must_use]
pub fn slot_availability(booked: &[NaiveTime]) -> SlotAvailability {
    let booked_slots: Vec<String> = booked
        .iter()
        .map(|t| t.format("%H:%M").to_string())
        .collect();

    let available_slots = SLOT_UNIVERSE
        .iter()
        .filter(|slot| !booked_slots.iter().any(|b| b == *slot))
        .map(|slot| (*slot).to_string())
        .collect();

    SlotAvailability {
        available_slots,
        booked_slots,
    }
}

/// Weekdays in the `window_days` days after `today`, each advertising the
/// fixed calendar slot list. Existing bookings are not consulted.
#[must_use]
pub fn available_dates(today: NaiveDate, window_days: i64) -> Vec<CalendarDay> {
    (1..=window_days)
        .map(|offset| today + Duration::days(offset))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .map(|date| CalendarDay {
            date,
            available: true,
            available_slots: CALENDAR_SLOTS.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn empty_day_offers_every_slot() {
        let slots = slot_availability(&[]);
        assert_eq!(slots.available_slots.len(), 8);
        assert!(slots.booked_slots.is_empty());
        assert!(!slots.available_slots.contains(&"13:00".to_string()));
    }

    #[test]
    fn booked_slot_is_removed() {
        let slots = slot_availability(&[time(10, 0)]);
        assert_eq!(slots.available_slots.len(), 7);
        assert!(!slots.available_slots.contains(&"10:00".to_string()));
        assert_eq!(slots.booked_slots, vec!["10:00".to_string()]);
    }

    #[test]
    fn off_universe_booking_leaves_universe_intact() {
        let slots = slot_availability(&[time(13, 30)]);
        assert_eq!(slots.available_slots.len(), 8);
        assert_eq!(slots.booked_slots, vec!["13:30".to_string()]);
    }

    #[test]
    fn calendar_skips_weekends() {
        // Friday
        let today = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        let days = available_dates(today, 14);

        assert_eq!(days.len(), 10);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
        assert!(
            days.iter()
                .all(|d| !matches!(d.date.weekday(), Weekday::Sat | Weekday::Sun))
        );
        assert!(days.iter().all(|d| d.available && d.available_slots.len() == 6));
    }

    #[test]
    fn calendar_starts_tomorrow() {
        // Monday
        let today = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let days = available_dates(today, 14);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(
            days.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 6, 23).unwrap()
        );
    }
}
