//! Explicit cookie accumulation for the login handshake
//!
//! The portal's handshake depends on exactly which cookies are replayed, so the
//! HTTP client's automatic cookie store is not used. Only the `name=value` token
//! of each `Set-Cookie` header is kept; attributes (path, expiry, flags) are
//! dropped. Names are unique within a jar: a later value replaces an earlier one
//! in place.

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Ordered, duplicate-free set of `name=value` cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a jar from static pairs, e.g. the protocol's baseline cookies
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut jar = Self::new();
        for (name, value) in pairs {
            jar.insert(name, value);
        }
        jar
    }

    /// Inserts a cookie, replacing any existing cookie of the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.cookies.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.cookies.push((name, value)),
        }
    }

    /// Merges another jar into this one; `other` wins on name clashes
    pub fn merge(&mut self, other: &CookieJar) {
        for (name, value) in &other.cookies {
            self.insert(name.clone(), value.clone());
        }
    }

    /// Captures every `Set-Cookie` header of a response
    ///
    /// Returns the number of cookies captured. Headers that do not contain a
    /// usable `name=value` token are skipped.
    pub fn absorb_set_cookie_headers(&mut self, headers: &HeaderMap) -> usize {
        let mut captured = 0;
        for raw in headers.get_all(SET_COOKIE) {
            let Ok(raw) = raw.to_str() else {
                tracing::debug!("Skipping non-ASCII Set-Cookie header");
                continue;
            };
            if let Some((name, value)) = parse_set_cookie(raw) {
                self.insert(name, value);
                captured += 1;
            }
        }
        captured
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value whose cookie name satisfies `predicate`
    pub fn find_value(&self, predicate: impl Fn(&str) -> bool) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, v)| !v.is_empty() && predicate(n))
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders the jar as a `Cookie` request header value
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Extracts the `name=value` token from a raw `Set-Cookie` header value
pub fn parse_set_cookie(raw: &str) -> Option<(String, String)> {
    let token = raw.split(';').next()?.trim();
    let (name, value) = token.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
