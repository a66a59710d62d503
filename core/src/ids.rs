// quinta/src/ids.rs

//! Identifier minting.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};

/// Mints a timestamp-derived id (milliseconds since the epoch) that is
/// strictly greater than every id already in use. Two records created in the
/// same millisecond therefore still get distinct ids.
pub(crate) fn mint_id<I>(existing: I, now: DateTime<Utc>) -> u64
where
  I: IntoIterator<Item = u64>,
{
  let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
  let next_free = existing.into_iter().max().map_or(0, |max| max.saturating_add(1));
  stamp.max(next_free)
}

const INVOICE_SPAN: u32 = 90_000;

/// Random five digit invoice number, 10000..=99999. Draws above the largest
/// multiple of the span are rejected so every number is equally likely.
pub(crate) fn invoice_number() -> u32 {
  loop {
    if let Some(number) = invoice_from_draw(OsRng.next_u32()) {
      return number;
    }
  }
}

fn invoice_from_draw(draw: u32) -> Option<u32> {
  let zone = u32::MAX - u32::MAX % INVOICE_SPAN;
  (draw < zone).then(|| 10_000 + draw % INVOICE_SPAN)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn minted_id_follows_the_clock() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(mint_id([1, 2, 3], now), now.timestamp_millis() as u64);
  }

  #[test]
  fn minted_id_never_collides_with_newer_ids() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let ahead = now.timestamp_millis() as u64 + 50;
    assert_eq!(mint_id([ahead], now), ahead + 1);
  }

  #[test]
  fn draws_past_the_last_full_span_are_rejected() {
    let zone = u32::MAX - u32::MAX % INVOICE_SPAN;
    assert_eq!(zone % INVOICE_SPAN, 0);
    assert_eq!(invoice_from_draw(0), Some(10_000));
    assert_eq!(invoice_from_draw(zone - 1), Some(99_999));
    assert_eq!(invoice_from_draw(zone), None);
    assert_eq!(invoice_from_draw(u32::MAX), None);
  }

  #[test]
  fn invoice_numbers_have_five_digits() {
    for _ in 0..200 {
      let n = invoice_number();
      assert!((10_000..=99_999).contains(&n), "{} is not five digits", n);
    }
  }
}
