/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! ISO-8601 duration parsing (`PnYnMnWnDTnHnMn.nS`) and expiry computation.

use crate::error::{BrokerError, Result};
use chrono::{DateTime, Months, Utc};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_DESIGNATORS: &str = "YMWD";
const TIME_DESIGNATORS: &str = "HMS";
const SECONDS_PER_DAY: u64 = 86_400;
const NANOS_DIGITS: usize = 9;

/// A non-negative ISO-8601 duration.
///
/// Years and months are kept as calendar months so that `P1M` added to
/// January 31st lands on the last day of February.
///
/// ```
/// use context_broker::IsoDuration;
///
/// let ttl: IsoDuration = "PT10S".parse().unwrap();
/// assert!(!ttl.is_zero());
/// assert!("PT0S".parse::<IsoDuration>().unwrap().is_zero());
/// assert!("-PT10S".parse::<IsoDuration>().is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IsoDuration {
    raw: String,
    months: u32,
    days: u64,
    seconds: u64,
    nanos: u32,
}

impl IsoDuration {
    /// Parses `raw`.
    ///
    /// Fails with [`BrokerError::NegativeDuration`] for a well-formed negative
    /// duration and with [`BrokerError::MalformedDuration`] for anything else
    /// that is not a duration.
    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = || BrokerError::MalformedDuration {
            raw: raw.to_string(),
        };

        let upper = raw.to_ascii_uppercase();
        let (negative, unsigned) = match upper.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, upper.strip_prefix('+').unwrap_or(&upper)),
        };
        let body = unsigned.strip_prefix('P').ok_or_else(malformed)?;
        let (date_part, time_part) = match body.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (body, None),
        };

        let mut duration = Self {
            raw: raw.to_string(),
            months: 0,
            days: 0,
            seconds: 0,
            nanos: 0,
        };

        let date_components = split_components(date_part, DATE_DESIGNATORS).ok_or_else(malformed)?;
        let time_components = match time_part {
            Some(time) => {
                let components = split_components(time, TIME_DESIGNATORS).ok_or_else(malformed)?;
                if components.is_empty() {
                    return Err(malformed());
                }
                components
            }
            None => Vec::new(),
        };
        if date_components.is_empty() && time_components.is_empty() {
            return Err(malformed());
        }

        for (number, designator) in date_components {
            let value = parse_whole(number).ok_or_else(malformed)?;
            match designator {
                'Y' => {
                    let months = value.checked_mul(12).ok_or_else(malformed)?;
                    duration.add_months(months).ok_or_else(malformed)?;
                }
                'M' => duration.add_months(value).ok_or_else(malformed)?,
                'W' => {
                    let days = value.checked_mul(7).ok_or_else(malformed)?;
                    duration.days = duration.days.checked_add(days).ok_or_else(malformed)?;
                }
                _ => duration.days = duration.days.checked_add(value).ok_or_else(malformed)?,
            }
        }

        for (number, designator) in time_components {
            let seconds = match designator {
                'H' => parse_whole(number).and_then(|hours| hours.checked_mul(3_600)),
                'M' => parse_whole(number).and_then(|minutes| minutes.checked_mul(60)),
                _ => {
                    let (whole, nanos) = parse_seconds(number).ok_or_else(malformed)?;
                    duration.nanos = nanos;
                    Some(whole)
                }
            }
            .ok_or_else(malformed)?;
            duration.seconds = duration.seconds.checked_add(seconds).ok_or_else(malformed)?;
        }

        if negative && !duration.is_zero() {
            return Err(BrokerError::NegativeDuration {
                raw: raw.to_string(),
            });
        }

        Ok(duration)
    }

    fn add_months(&mut self, months: u64) -> Option<()> {
        let months = u32::try_from(months).ok()?;
        self.months = self.months.checked_add(months)?;
        Some(())
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.seconds == 0 && self.nanos == 0
    }

    /// The text this duration was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `now + self`, failing with [`BrokerError::MalformedDuration`]
    /// when the instant is not representable.
    pub fn expiry_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let out_of_range = || BrokerError::MalformedDuration {
            raw: self.raw.clone(),
        };

        let fixed_seconds = self
            .days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| seconds.checked_add(self.seconds))
            .ok_or_else(out_of_range)?;
        let fixed = chrono::Duration::from_std(std::time::Duration::new(fixed_seconds, self.nanos))
            .map_err(|_| out_of_range())?;

        now.checked_add_months(Months::new(self.months))
            .and_then(|shifted| shifted.checked_add_signed(fixed))
            .ok_or_else(out_of_range)
    }
}

/// `now + duration`.
pub fn compute_expiry(now: DateTime<Utc>, duration: &IsoDuration) -> Result<DateTime<Utc>> {
    duration.expiry_from(now)
}

impl FromStr for IsoDuration {
    type Err = BrokerError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

impl Display for IsoDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Splits `text` into `(number, designator)` pairs, enforcing designator order.
fn split_components<'a>(text: &'a str, designators: &str) -> Option<Vec<(&'a str, char)>> {
    let mut components = Vec::new();
    let mut start = 0;
    let mut last_rank = None;

    for (index, ch) in text.char_indices() {
        if ch.is_ascii_digit() || ch == '.' || ch == ',' {
            continue;
        }

        let rank = designators.find(ch)?;
        if last_rank.is_some_and(|last| rank <= last) {
            return None;
        }
        let number = &text[start..index];
        if number.is_empty() {
            return None;
        }

        components.push((number, ch));
        last_rank = Some(rank);
        start = index + ch.len_utf8();
    }

    // Digits without a trailing designator.
    if start != text.len() {
        return None;
    }

    Some(components)
}

fn parse_whole(number: &str) -> Option<u64> {
    if !number.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

/// Parses `whole[.fraction]` seconds into whole seconds and nanoseconds.
fn parse_seconds(number: &str) -> Option<(u64, u32)> {
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };

    let whole = parse_whole(whole)?;
    if fraction.is_empty() {
        return Some((whole, 0));
    }
    if fraction.len() > NANOS_DIGITS || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let padded = format!("{fraction:0<width$}", width = NANOS_DIGITS);
    Some((whole, padded.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid test instant")
    }

    #[test]
    fn parses_common_designators() {
        let duration = IsoDuration::parse("P1Y2M3W4DT5H6M7S").expect("full duration parses");

        assert_eq!(duration.months, 14);
        assert_eq!(duration.days, 25);
        assert_eq!(duration.seconds, 5 * 3_600 + 6 * 60 + 7);
        assert_eq!(duration.as_str(), "P1Y2M3W4DT5H6M7S");
    }

    #[test]
    fn month_and_minute_designators_are_distinguished() {
        let month = IsoDuration::parse("P1M").expect("one month parses");
        let minute = IsoDuration::parse("PT1M").expect("one minute parses");

        assert_eq!(month.months, 1);
        assert_eq!(month.seconds, 0);
        assert_eq!(minute.months, 0);
        assert_eq!(minute.seconds, 60);
    }

    #[test]
    fn zero_duration_is_legal() {
        assert!(IsoDuration::parse("PT0S").expect("zero parses").is_zero());
        assert!(IsoDuration::parse("-PT0S").expect("negative zero parses").is_zero());
    }

    #[test]
    fn negative_duration_is_distinct_from_malformed() {
        assert!(matches!(
            IsoDuration::parse("-PT10S"),
            Err(BrokerError::NegativeDuration { ref raw }) if raw == "-PT10S"
        ));
        assert!(matches!(
            IsoDuration::parse("PIPO"),
            Err(BrokerError::MalformedDuration { ref raw }) if raw == "PIPO"
        ));
        assert!(matches!(
            IsoDuration::parse("-PIPO"),
            Err(BrokerError::MalformedDuration { .. })
        ));
    }

    #[test]
    fn rejects_malformed_text() {
        for raw in [
            "", "P", "PT", "P1DT", "10S", "P1S", "PT1D", "PT1M1H", "P1M1Y", "P1", "PT-10S",
            "P1.5D", "PT1.S5", "PT1.1234567891S",
        ] {
            assert!(
                matches!(
                    IsoDuration::parse(raw),
                    Err(BrokerError::MalformedDuration { .. })
                ),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn accepts_fractional_seconds_and_lowercase() {
        let duration = IsoDuration::parse("pt1.5s").expect("lowercase fraction parses");

        assert_eq!(duration.seconds, 1);
        assert_eq!(duration.nanos, 500_000_000);
    }

    #[test]
    fn expiry_adds_calendar_months() {
        let duration = IsoDuration::parse("P1M").expect("one month parses");

        let expiry = compute_expiry(at(2024, 1, 31), &duration).expect("expiry is representable");

        assert_eq!(expiry, at(2024, 2, 29));
    }

    #[test]
    fn expiry_of_zero_is_now() {
        let now = at(2024, 6, 1);
        let duration = IsoDuration::parse("PT0S").expect("zero parses");

        assert_eq!(duration.expiry_from(now).expect("zero expiry"), now);
    }

    #[test]
    fn expiry_adds_fixed_time() {
        let now = at(2024, 6, 1);
        let duration = IsoDuration::parse("P1DT10S").expect("day and seconds parse");

        let expiry = duration.expiry_from(now).expect("expiry is representable");

        assert_eq!(expiry - now, chrono::Duration::seconds(86_410));
    }

    #[test]
    fn unrepresentable_expiry_is_malformed() {
        let duration = IsoDuration::parse("P99999999Y").expect("huge duration still parses");

        assert!(matches!(
            duration.expiry_from(at(2024, 1, 1)),
            Err(BrokerError::MalformedDuration { .. })
        ));
    }
}
