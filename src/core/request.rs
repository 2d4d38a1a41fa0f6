//! Request validation and URL construction for the rates service.
//!
//! Nothing here touches the network or the disk.

use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

use super::currency::Currency;
use super::error::InvalidInput;

pub const LATEST: &str = "latest";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The point in time a request asks rates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDate {
    Latest,
    On(NaiveDate),
}

impl RateDate {
    /// Resolves to a concrete `YYYY-MM-DD` key, mapping `Latest` to `today`.
    pub fn resolve(&self, today: NaiveDate) -> String {
        match self {
            RateDate::Latest => today.format(DATE_FORMAT).to_string(),
            RateDate::On(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl Display for RateDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateDate::Latest => f.write_str(LATEST),
            RateDate::On(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

// Matches `20\d{2}-[0-1]\d-[0-3]\d` over exactly ten characters.
fn matches_date_pattern(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[0] == b'2'
        && b[1] == b'0'
        && b[2].is_ascii_digit()
        && b[3].is_ascii_digit()
        && b[4] == b'-'
        && (b'0'..=b'1').contains(&b[5])
        && b[6].is_ascii_digit()
        && b[7] == b'-'
        && (b'0'..=b'3').contains(&b[8])
        && b[9].is_ascii_digit()
}

impl FromStr for RateDate {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LATEST {
            return Ok(RateDate::Latest);
        }
        if s.chars().count() != 10 {
            return Err(InvalidInput::WrongLength(s.to_string()));
        }
        if !matches_date_pattern(s) {
            return Err(InvalidInput::NoDateFound(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(RateDate::On)
            .map_err(|_| InvalidInput::NotACalendarDate(s.to_string()))
    }
}

/// A validated request for one day's rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesRequest {
    pub when: RateDate,
    pub base: Option<Currency>,
}

impl RatesRequest {
    /// Validates the base currency first, then the date.
    pub fn parse(from_when: &str, base_currency: Option<&str>) -> Result<Self, InvalidInput> {
        let base = base_currency.map(str::parse::<Currency>).transpose()?;
        let when = from_when.parse()?;
        Ok(Self { when, base })
    }

    pub fn url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        let mut url = format!("{base_url}/{}", self.when);
        if let Some(base) = &self.base {
            url.push_str(&format!("?base={base}"));
        }
        url
    }
}

/// Builds the request URL for `from_when`, optionally quoting against `base_currency`.
pub fn build_url(
    base_url: &str,
    from_when: &str,
    base_currency: Option<&str>,
) -> Result<String, InvalidInput> {
    Ok(RatesRequest::parse(from_when, base_currency)?.url(base_url))
}
