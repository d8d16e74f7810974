//! Page-number pagination primitives.
//!
//! Remote listing endpoints in this workspace paginate with 1-indexed page
//! numbers and report how many pages exist. This crate keeps those numbers
//! typed: [`PageNumber`] can never be zero, [`PageBounds`] answers which
//! neighbouring pages are reachable, and [`PageEnvelope`] decodes the
//! `{ "data": [...], "total_pages": n }` response shape.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageNumberError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    Zero,
    /// The raw value was not an unsigned integer.
    #[error("page number must be a positive integer, got '{value}'")]
    NotANumber {
        /// Raw input that failed to parse.
        value: String,
    },
}

/// A 1-indexed page number.
///
/// # Examples
///
/// ```
/// use pagination::PageNumber;
///
/// let page = PageNumber::new(2)?;
/// assert_eq!(page.get(), 2);
/// assert_eq!(page.previous(), Some(PageNumber::FIRST));
/// assert!(PageNumber::new(0).is_err());
/// # Ok::<(), pagination::PageNumberError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PageNumberError::Zero`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PageNumberError> {
        match NonZeroU32::new(value) {
            Some(inner) => Ok(Self(inner)),
            None => Err(PageNumberError::Zero),
        }
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page after this one, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The page before this one, or `None` on the first page.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match NonZeroU32::new(self.0.get().saturating_sub(1)) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PageNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl FromStr for PageNumber {
    type Err = PageNumberError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| PageNumberError::NotANumber {
                value: raw.to_owned(),
            })?;
        Self::new(value)
    }
}

/// The current page and the total page count reported by the service.
///
/// The total is authoritative; the current page is whatever was last
/// loaded successfully. Navigation helpers never step outside
/// `[1, total]`.
///
/// # Examples
///
/// ```
/// use pagination::{PageBounds, PageNumber};
///
/// let bounds = PageBounds::from_service_total(PageNumber::FIRST, 2);
/// assert_eq!(bounds.next().map(PageNumber::get), Some(2));
/// assert_eq!(bounds.previous(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    current: PageNumber,
    total: PageNumber,
}

impl PageBounds {
    /// Build bounds from validated parts.
    #[must_use]
    pub const fn new(current: PageNumber, total: PageNumber) -> Self {
        Self { current, total }
    }

    /// Build bounds from a raw `total_pages` value; an empty listing (`0`)
    /// still counts as one page.
    #[must_use]
    pub const fn from_service_total(current: PageNumber, total_pages: u32) -> Self {
        let total = match NonZeroU32::new(total_pages) {
            Some(total) => PageNumber(total),
            None => PageNumber::FIRST,
        };
        Self { current, total }
    }

    /// Page currently displayed.
    #[must_use]
    pub const fn current(&self) -> PageNumber {
        self.current
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total(&self) -> PageNumber {
        self.total
    }

    /// Whether `page` lies within `[1, total]`.
    #[must_use]
    pub const fn contains(&self, page: PageNumber) -> bool {
        page.get() <= self.total.get()
    }

    /// The next page, or `None` when already on (or past) the last page.
    #[must_use]
    pub const fn next(&self) -> Option<PageNumber> {
        if self.current.get() < self.total.get() {
            Some(self.current.next())
        } else {
            None
        }
    }

    /// The previous page, or `None` on the first page.
    #[must_use]
    pub const fn previous(&self) -> Option<PageNumber> {
        self.current.previous()
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        Self::new(PageNumber::FIRST, PageNumber::FIRST)
    }
}

impl fmt::Display for PageBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current, self.total)
    }
}

/// A single page of items as returned by a listing endpoint.
///
/// Only `data` and `total_pages` are required; the remaining counters are
/// decoded when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageEnvelope<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Number of pages the listing spans.
    pub total_pages: u32,
    /// Page number echoed by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size used by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Total number of items across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

impl<T> PageEnvelope<T> {
    /// Build an envelope carrying only the required fields.
    #[must_use]
    pub const fn new(data: Vec<T>, total_pages: u32) -> Self {
        Self {
            data,
            total_pages,
            page: None,
            per_page: None,
            total: None,
        }
    }

    /// Convert every item, failing on the first conversion error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `convert`.
    pub fn try_map<U, E, F>(self, convert: F) -> Result<PageEnvelope<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let data = self
            .data
            .into_iter()
            .map(convert)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageEnvelope {
            data,
            total_pages: self.total_pages,
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page primitives.

    use super::*;
    use rstest::rstest;

    fn page(value: u32) -> PageNumber {
        PageNumber::new(value).expect("non-zero page")
    }

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 7 ", Ok(7))]
    #[case("0", Err(PageNumberError::Zero))]
    #[case("-1", Err(PageNumberError::NotANumber { value: "-1".to_owned() }))]
    #[case("two", Err(PageNumberError::NotANumber { value: "two".to_owned() }))]
    fn parses_page_numbers(#[case] raw: &str, #[case] expected: Result<u32, PageNumberError>) {
        let parsed = raw.parse::<PageNumber>().map(PageNumber::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case(1, 2, Some(2), None)]
    #[case(2, 2, None, Some(1))]
    #[case(2, 3, Some(3), Some(1))]
    #[case(1, 1, None, None)]
    fn neighbours_stay_within_bounds(
        #[case] current: u32,
        #[case] total: u32,
        #[case] next: Option<u32>,
        #[case] previous: Option<u32>,
    ) {
        let bounds = PageBounds::new(page(current), page(total));
        assert_eq!(bounds.next().map(PageNumber::get), next);
        assert_eq!(bounds.previous().map(PageNumber::get), previous);
    }

    #[test]
    fn empty_listing_counts_as_one_page() {
        let bounds = PageBounds::from_service_total(PageNumber::FIRST, 0);
        assert_eq!(bounds.total(), PageNumber::FIRST);
        assert_eq!(bounds.next(), None);
    }

    #[test]
    fn current_past_total_has_no_next_page() {
        let bounds = PageBounds::from_service_total(page(4), 2);
        assert_eq!(bounds.next(), None);
        assert_eq!(bounds.previous(), Some(page(3)));
        assert!(!bounds.contains(page(3)));
        assert!(bounds.contains(page(2)));
    }

    #[test]
    fn bounds_render_as_page_x_of_y() {
        let bounds = PageBounds::new(page(2), page(5));
        assert_eq!(bounds.to_string(), "Page 2 of 5");
    }

    #[test]
    fn decodes_envelope_with_optional_counters() {
        let body = r#"{
            "page": 2,
            "per_page": 6,
            "total": 12,
            "total_pages": 2,
            "data": [1, 2, 3],
            "support": { "url": "https://example.invalid" }
        }"#;

        let envelope: PageEnvelope<u8> = serde_json::from_str(body).expect("envelope decodes");
        assert_eq!(envelope.data, vec![1, 2, 3]);
        assert_eq!(envelope.total_pages, 2);
        assert_eq!(envelope.per_page, Some(6));
    }

    #[test]
    fn rejects_envelope_without_total_pages() {
        let result = serde_json::from_str::<PageEnvelope<u8>>(r#"{ "data": [] }"#);
        assert!(result.is_err(), "total_pages is required");
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let envelope = PageEnvelope::new(vec![1_i32, -2, 3], 1);
        let result = envelope.try_map(|value| u8::try_from(value).map_err(|_| value));
        assert_eq!(result, Err(-2));
    }

    #[test]
    fn page_number_rejects_zero_when_deserialised() {
        let result = serde_json::from_str::<PageNumber>("0");
        assert!(result.is_err());
    }
}
