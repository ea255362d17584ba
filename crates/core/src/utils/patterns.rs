//! Platform URL validation and scrape-field parsing helpers
//!
//! The URL patterns mirror the write-time validators on the profile model:
//! a linked URL must sit on the platform's own domain, while an absent or
//! empty value is always accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use solvetrack_domain::{Platform, Result, SolveTrackError};

fn compile(pattern: &str) -> Regex {
    #[allow(clippy::expect_used)]
    Regex::new(pattern).expect("static pattern compiles")
}

static LEETCODE_URL: Lazy<Regex> = Lazy::new(|| compile(r"^https?://(www\.)?leetcode\.com/"));
static HACKERRANK_URL: Lazy<Regex> = Lazy::new(|| compile(r"^https?://(www\.)?hackerrank\.com/"));
static GEEKSFORGEEKS_URL: Lazy<Regex> = Lazy::new(|| {
    compile(r"^https?://(www\.)?(auth\.geeksforgeeks\.org/user/|geeksforgeeks\.org/user/)")
});

/// Human-readable domain hint used in validation error messages.
fn expected_domain(platform: Platform) -> &'static str {
    match platform {
        Platform::Leetcode => "leetcode.com",
        Platform::Hackerrank => "hackerrank.com",
        Platform::Geeksforgeeks => "geeksforgeeks.org/user/ or auth.geeksforgeeks.org/user/",
    }
}

/// Validate a profile URL against its platform's domain pattern.
///
/// Empty strings are accepted; they mean "not linked".
pub fn validate_profile_url(platform: Platform, url: &str) -> Result<()> {
    if url.is_empty() {
        return Ok(());
    }

    let pattern = match platform {
        Platform::Leetcode => &LEETCODE_URL,
        Platform::Hackerrank => &HACKERRANK_URL,
        Platform::Geeksforgeeks => &GEEKSFORGEEKS_URL,
    };

    if pattern.is_match(url) {
        Ok(())
    } else {
        Err(SolveTrackError::Validation(format!(
            "invalid {platform} URL: expected a {} profile link",
            expected_domain(platform)
        )))
    }
}

/// Final non-empty path segment of a profile URL, used as the username.
pub fn username_from_url(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(':'))
        .map(str::to_string)
}

/// Parse an integer out of free-form text by dropping every non-digit first.
///
/// Returns `None` when no digits remain or the value parses to zero, matching
/// the scraper behavior of treating "Rank 0"/missing ranks as unranked.
pub fn parse_rank_text(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Parse a counter out of scraped text, defaulting to zero.
///
/// Takes the leading run of digits so "123 solved" parses as 123.
pub fn parse_count_text(text: &str) -> i64 {
    let digits: String = text.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leetcode_urls_validate_against_their_domain() {
        assert!(validate_profile_url(Platform::Leetcode, "https://leetcode.com/someuser").is_ok());
        assert!(validate_profile_url(Platform::Leetcode, "http://www.leetcode.com/u/x/").is_ok());
        assert!(validate_profile_url(Platform::Leetcode, "https://notleetcode.com/someuser").is_err());
    }

    #[test]
    fn empty_url_is_always_accepted() {
        for platform in Platform::ALL {
            assert!(validate_profile_url(platform, "").is_ok());
        }
    }

    #[test]
    fn geeksforgeeks_accepts_both_domains() {
        assert!(validate_profile_url(
            Platform::Geeksforgeeks,
            "https://auth.geeksforgeeks.org/user/someone"
        )
        .is_ok());
        assert!(validate_profile_url(
            Platform::Geeksforgeeks,
            "https://www.geeksforgeeks.org/user/someone/"
        )
        .is_ok());
        assert!(
            validate_profile_url(Platform::Geeksforgeeks, "https://geeksforgeeks.org/someone")
                .is_err()
        );
    }

    #[test]
    fn validation_error_names_the_expected_domain() {
        let err = validate_profile_url(Platform::Hackerrank, "https://example.com/x").unwrap_err();
        assert!(err.to_string().contains("hackerrank.com"));
    }

    #[test]
    fn username_is_final_non_empty_segment() {
        assert_eq!(username_from_url("https://leetcode.com/someuser"), Some("someuser".into()));
        assert_eq!(username_from_url("https://leetcode.com/u/someuser/"), Some("someuser".into()));
        assert_eq!(username_from_url("https://"), None);
    }

    #[test]
    fn rank_text_strips_non_digits() {
        assert_eq!(parse_rank_text("Rank #1,234"), Some(1234));
        assert_eq!(parse_rank_text("unranked"), None);
        assert_eq!(parse_rank_text("Rank 0"), None);
    }

    #[test]
    fn count_text_takes_leading_digits() {
        assert_eq!(parse_count_text(" 42 "), 42);
        assert_eq!(parse_count_text("123 solved"), 123);
        assert_eq!(parse_count_text("n/a"), 0);
    }
}
