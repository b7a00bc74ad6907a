//! Release version ordering
//!
//! Versions are compared on their first two dot-separated components only.
//! A component that is missing, empty or not a number ranks below any numeric
//! component, and two such components are equal. Later components never
//! influence the order, so `1.2.9` and `1.2` compare equal and keep their
//! relative order under a stable sort.

use std::cmp::Ordering;

use super::models::ReleaseEntry;

/// Number of leading components that take part in the comparison
const COMPARED_COMPONENTS: usize = 2;

/// Parse one version component as a number
///
/// Only plain ASCII digits count; empty, missing and other components yield
/// `None`. Digit runs too long for `f64` become infinity and still compare
/// above any shorter number.
fn component_value(component: Option<&str>) -> Option<f64> {
    let component = component?;
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse::<f64>().ok()
}

/// Compare two version strings in ascending order
///
/// `Ordering::Greater` means `a` is the newer version.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut parts_a = a.split('.');
    let mut parts_b = b.split('.');

    for _ in 0..COMPARED_COMPONENTS {
        let ordering = match (component_value(parts_a.next()), component_value(parts_b.next())) {
            (Some(na), Some(nb)) => na.partial_cmp(&nb).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Compare two version strings newest first
pub fn compare_versions_desc(a: &str, b: &str) -> Ordering {
    compare_versions(b, a)
}

/// Sort release entries newest first
///
/// The sort is stable: entries whose versions compare equal stay in the
/// order they were produced in.
pub fn sort_releases(entries: &mut [ReleaseEntry]) {
    entries.sort_by(|a, b| compare_versions_desc(&a.version, &b.version));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(versions: &[&str]) -> Vec<String> {
        let mut versions: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        versions.sort_by(|a, b| compare_versions_desc(a, b));
        versions
    }

    #[test]
    fn test_numeric_components() {
        assert_eq!(compare_versions("2.0", "1.10"), Ordering::Greater);
        assert_eq!(compare_versions("1.10", "1.2"), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.10"), Ordering::Less);
        assert_eq!(compare_versions("1.02", "1.2"), Ordering::Equal);
    }

    #[test]
    fn test_only_two_components_count() {
        assert_eq!(compare_versions("1.2.9", "1.2"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.9", "1.2.10"), Ordering::Equal);
        assert_eq!(compare_versions("3.1.0", "3.1.99"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_outranks_missing_or_non_numeric() {
        assert_eq!(compare_versions("2.1", "2"), Ordering::Greater);
        assert_eq!(compare_versions("2", "2.1"), Ordering::Less);
        assert_eq!(compare_versions("0", "abc"), Ordering::Greater);
        assert_eq!(compare_versions("1.", "1.0"), Ordering::Less);
    }

    #[test]
    fn test_non_numeric_components_are_equal() {
        assert_eq!(compare_versions("abc", "def"), Ordering::Equal);
        assert_eq!(compare_versions("", "."), Ordering::Equal);
        assert_eq!(compare_versions("1.x", "1.y"), Ordering::Equal);
    }

    #[test]
    fn test_overlong_components_stay_numeric() {
        let huge = "9".repeat(400);
        assert_eq!(compare_versions(&huge, "1"), Ordering::Greater);
        assert_eq!(compare_versions(&format!("1.{}", huge), "1.5"), Ordering::Greater);
        assert_eq!(compare_versions(&huge, "abc"), Ordering::Greater);
    }

    #[test]
    fn test_float_spellings_are_not_numbers() {
        assert_eq!(compare_versions("inf", "nan"), Ordering::Equal);
        assert_eq!(compare_versions("1e5", "1"), Ordering::Less);
        assert_eq!(compare_versions("+1", "0"), Ordering::Less);
        assert_eq!(compare_versions("1.-2", "1.0"), Ordering::Less);
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(compare_versions("1.2", "1.2"), Ordering::Equal);
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }

    #[test]
    fn test_descending_sort() {
        assert_eq!(
            sorted(&["1.2", "1.10", "2.0", "1.2.9", "abc"]),
            vec!["2.0", "1.10", "1.2", "1.2.9", "abc"]
        );
        assert_eq!(
            sorted(&["1.2.9", "1.2", "abc", "2.0", "1.10"]),
            vec!["2.0", "1.10", "1.2.9", "1.2", "abc"]
        );
    }

    #[test]
    fn test_degenerate_versions() {
        assert_eq!(
            sorted(&["", "1..2", "1.", "0.1"]),
            vec!["1..2", "1.", "0.1", ""]
        );
    }
}
