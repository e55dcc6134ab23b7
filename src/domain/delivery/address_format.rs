//! Normalization of reverse-geocoder output into a short display address.
//!
//! Geocoders return the most specific component first and the country last
//! (`"123, Main Street, District, City, Region, Country"`). Customers see the
//! reverse order with the two most administrative parts removed:
//! `"City, District, Main Street, 123"`.

/// Number of leading components dropped after reversal (country, region).
pub const DROPPED_ADMINISTRATIVE_COMPONENTS: usize = 2;

/// Reverses the comma-separated components, drops the two broadest ones and
/// rejoins the rest with `", "`.
///
/// Fewer than three components yield an empty string; callers must treat
/// that as an unresolved address.
pub fn normalize_address(display_address: &str) -> String {
    display_address
        .split(',')
        .rev()
        .skip(DROPPED_ADMINISTRATIVE_COMPONENTS)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
