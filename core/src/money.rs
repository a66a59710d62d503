// quinta/src/money.rs

//! Formatting of cêntimo amounts for display.

/// Renders cêntimos the way the shop shows prices: `115.000,00 Kz`.
pub fn format_kz(cents: i64) -> String {
  let negative = cents < 0;
  let abs = cents.unsigned_abs();
  let units = (abs / 100).to_string();
  let fraction = abs % 100;

  let mut grouped = String::with_capacity(units.len() + units.len() / 3);
  for (i, digit) in units.chars().enumerate() {
    if i > 0 && (units.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(digit);
  }
  format!("{}{},{:02} Kz", if negative { "-" } else { "" }, grouped, fraction)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn groups_thousands_with_dots() {
    assert_eq!(format_kz(11_500_000), "115.000,00 Kz");
    assert_eq!(format_kz(85_000_000), "850.000,00 Kz");
    assert_eq!(format_kz(99), "0,99 Kz");
    assert_eq!(format_kz(-123_456_789), "-1.234.567,89 Kz");
  }
}
