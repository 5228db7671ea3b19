//! Reading values out of a `Cookie` header string.

use cookie::Cookie;

/// Returns the percent-decoded value of the first cookie called `name`
///
/// Pairs are separated by `;`; pairs without `=` are skipped. A pair of
/// double quotes around the value is stripped. A value that does not
/// decode to UTF-8 is returned as written.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    let raw = Cookie::split_parse(cookie_header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)?;

    let decoded = Cookie::parse_encoded(format!("{name}={}", raw.value()))
        .map_or_else(|_| raw.value_trimmed().to_string(), |c| c.value_trimmed().to_string());
    Some(decoded)
}
