//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Title-cases an HTTP header name (`user-agent` becomes `User-Agent`).
///
/// Usage in templates: `{{ name|header_case }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn header_case(name: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(title_case_header(&name.to_string()))
}

fn title_case_header(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_header() {
        assert_eq!(title_case_header("user-agent"), "User-Agent");
        assert_eq!(title_case_header("host"), "Host");
        assert_eq!(title_case_header("x-forwarded-for"), "X-Forwarded-For");
        assert_eq!(title_case_header("dnt"), "Dnt");
    }
}
