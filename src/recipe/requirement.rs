// src/recipe/requirement.rs

//! Dependency references
//!
//! A requirement names another package, the versions it accepts and the
//! provider it comes from:
//!
//! ```text
//! sdl2/[~=2.0.5]@bincrafters/stable
//! zlib/1.2.11@conan/stable
//! fmt/[>=9.0 <11]
//! ```
//!
//! Requirements are consumed, not fetched: the dependency manager that
//! invokes us resolves and builds them before the build phase runs.

use crate::error::{Error, Result};
use semver::{Version, VersionReq};
use std::fmt;
use std::str::FromStr;

/// Versions accepted by a requirement
#[derive(Debug, Clone, PartialEq)]
pub enum VersionSpec {
    /// A single pinned version
    Exact(String),
    /// A bracketed range expression
    Range(VersionRange),
}

impl VersionSpec {
    /// Check whether a concrete version is accepted
    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionSpec::Exact(pinned) => {
                pinned == version
                    || matches!(
                        (parse_lenient(pinned), parse_lenient(version)),
                        (Some(a), Some(b)) if a == b
                    )
            }
            VersionSpec::Range(range) => range.matches(version),
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Exact(v) => write!(f, "{}", v),
            VersionSpec::Range(r) => write!(f, "[{}]", r.raw),
        }
    }
}

/// A version range expression
///
/// Clauses are separated by whitespace or commas and must all hold.
/// `~=X.Y.Z` is a compatible release (`>=X.Y.Z, <X.(Y+1).0`) and `~=X.Y`
/// accepts anything in `X.*` from `X.Y` upward. A bare version is an exact
/// match.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRange {
    raw: String,
    req: VersionReq,
}

impl VersionRange {
    /// Parse a range expression (without the surrounding brackets)
    pub fn parse(expr: &str) -> Result<Self> {
        let clauses = split_clauses(expr);
        if clauses.is_empty() {
            return Err(Error::ParseError("Empty version range".to_string()));
        }

        let mut comparators = Vec::with_capacity(clauses.len() + 1);
        for clause in &clauses {
            comparators.extend(translate_clause(clause)?);
        }

        let joined = comparators.join(", ");
        let req = VersionReq::parse(&joined).map_err(|e| {
            Error::ParseError(format!("Invalid version range '{}': {}", expr, e))
        })?;

        Ok(Self {
            raw: expr.trim().to_string(),
            req,
        })
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether a concrete version falls inside the range
    pub fn matches(&self, version: &str) -> bool {
        parse_lenient(version).is_some_and(|v| self.req.matches(&v))
    }
}

/// Split a range into clauses, gluing detached operators to their operand
fn split_clauses(expr: &str) -> Vec<String> {
    let mut clauses: Vec<String> = Vec::new();
    let mut pending_op: Option<String> = None;

    for token in expr
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let is_operator = token.chars().all(|c| "<>=~^!".contains(c));
        match (pending_op.take(), is_operator) {
            (None, true) => pending_op = Some(token.to_string()),
            (Some(op), _) => clauses.push(format!("{}{}", op, token)),
            (None, false) => clauses.push(token.to_string()),
        }
    }

    if let Some(op) = pending_op {
        clauses.push(op);
    }
    clauses
}

/// Translate one clause into semver comparators
fn translate_clause(clause: &str) -> Result<Vec<String>> {
    if clause == "*" {
        return Ok(vec!["*".to_string()]);
    }

    if let Some(base) = clause.strip_prefix("~=") {
        return compatible_release(base);
    }

    if let Some(exact) = clause.strip_prefix("==") {
        return Ok(vec![format!("={}", padded(exact))]);
    }

    // `~` and `^` keep semver's own meaning for partial versions
    for op in ["~", "^"] {
        if clause.starts_with(op) {
            return Ok(vec![clause.to_string()]);
        }
    }

    for op in [">=", "<=", ">", "<", "="] {
        if let Some(operand) = clause.strip_prefix(op) {
            return Ok(vec![format!("{}{}", op, padded(operand))]);
        }
    }

    if clause.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(vec![format!("={}", padded(clause))]);
    }

    Err(Error::ParseError(format!(
        "Unsupported version range clause: {}",
        clause
    )))
}

/// Pad a partial operand to three components; anything else is left to semver
fn padded(operand: &str) -> String {
    match parse_lenient(operand) {
        Some(version) => version.to_string(),
        None => operand.to_string(),
    }
}

fn compatible_release(base: &str) -> Result<Vec<String>> {
    let parts: Vec<u64> = base
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::ParseError(format!("Invalid compatible-release version: {}", base)))?;

    let overflow = || Error::ParseError(format!("Compatible release out of range: ~={}", base));

    match parts.as_slice() {
        [major, minor] => Ok(vec![
            format!(">={}.{}.0", major, minor),
            format!("<{}.0.0", major.checked_add(1).ok_or_else(overflow)?),
        ]),
        [major, minor, patch] => Ok(vec![
            format!(">={}.{}.{}", major, minor, patch),
            format!("<{}.{}.0", major, minor.checked_add(1).ok_or_else(overflow)?),
        ]),
        _ => Err(Error::ParseError(format!(
            "Compatible release needs two or three components: ~={}",
            base
        ))),
    }
}

/// Parse a version, padding `1` and `1.2` to three components
pub fn parse_lenient(version: &str) -> Option<Version> {
    let version = version.trim().trim_start_matches('v');
    if let Ok(v) = Version::parse(version) {
        return Some(v);
    }

    let parts: Vec<u64> = version
        .split('.')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<_>>()?;

    match parts.as_slice() {
        [major] => Some(Version::new(*major, 0, 0)),
        [major, minor] => Some(Version::new(*major, *minor, 0)),
        _ => None,
    }
}

/// A dependency on another package
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub name: String,
    pub version: VersionSpec,
    /// Provider namespace (`bincrafters` in `...@bincrafters/stable`)
    pub user: Option<String>,
    /// Provider channel (`stable` in `...@bincrafters/stable`)
    pub channel: Option<String>,
}

impl Requirement {
    /// Check whether a concrete version of the dependency satisfies this requirement
    pub fn satisfied_by(&self, version: &str) -> bool {
        self.version.matches(version)
    }
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        let invalid = |why: &str| {
            Error::ParseError(format!("Invalid requirement '{}': {}", reference, why))
        };

        let (package, provider) = match reference.split_once('@') {
            Some((package, provider)) => (package, Some(provider)),
            None => (reference, None),
        };

        let (name, version) = package
            .split_once('/')
            .ok_or_else(|| invalid("expected name/version"))?;

        if name.is_empty() {
            return Err(invalid("missing package name"));
        }
        if version.is_empty() {
            return Err(invalid("missing version"));
        }

        let version = match version.strip_prefix('[') {
            Some(inner) => {
                let expr = inner
                    .strip_suffix(']')
                    .ok_or_else(|| invalid("unterminated version range"))?;
                VersionSpec::Range(VersionRange::parse(expr)?)
            }
            None => VersionSpec::Exact(version.to_string()),
        };

        let (user, channel) = match provider {
            Some(provider) => {
                let (user, channel) = provider
                    .split_once('/')
                    .ok_or_else(|| invalid("expected user/channel after '@'"))?;
                if user.is_empty() || channel.is_empty() {
                    return Err(invalid("empty user or channel"));
                }
                (Some(user.to_string()), Some(channel.to_string()))
            }
            None => (None, None),
        };

        Ok(Self {
            name: name.to_string(),
            version,
            user,
            channel,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let (Some(user), Some(channel)) = (&self.user, &self.channel) {
            write!(f, "@{}/{}", user, channel)?;
        }
        Ok(())
    }
}
