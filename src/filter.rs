//! Input filters
//!
//! A filter turns raw operator text into a validated value or rejects it.
//! Rejections are [`PromptError::Validation`] and make the prompt ask again;
//! any other error means the filter itself was built wrong.
//!
//! # Example
//!
//! ```
//! use operator_prompt::filter::{self, Filter, FilterExt};
//!
//! let port = filter::integer("Port");
//! assert_eq!(port.apply(" 1247 ").unwrap(), 1247);
//!
//! let zone = filter::length(Some(1), Some(16), "Zone name")
//!     .and_then(filter::membership(["tempZone", "demoZone"], "Zone name"));
//! assert!(zone.apply("otherZone").is_err());
//! ```

use std::num::IntErrorKind;

use crate::error::{PromptError, Result};

/// Validates and transforms raw input.
///
/// Implementations must be pure: the same input always gives the same outcome.
pub trait Filter {
    type Output;

    fn apply(&self, input: &str) -> Result<Self::Output>;
}

impl<T, F> Filter for F
where
    F: Fn(&str) -> Result<T>,
{
    type Output = T;

    fn apply(&self, input: &str) -> Result<T> {
        self(input)
    }
}

/// Combinators available on every filter
pub trait FilterExt: Filter + Sized {
    /// Run `next` on this filter's output.
    fn and_then<N>(self, next: N) -> AndThen<Self, N>
    where
        Self::Output: AsRef<str>,
        N: Filter,
    {
        AndThen { first: self, next }
    }

    /// Transform an accepted value.
    fn map<T, M>(self, f: M) -> Map<Self, M>
    where
        M: Fn(Self::Output) -> T,
    {
        Map { inner: self, f }
    }
}

impl<F: Filter> FilterExt for F {}

#[derive(Debug, Clone)]
pub struct AndThen<A, B> {
    first: A,
    next: B,
}

impl<A, B> Filter for AndThen<A, B>
where
    A: Filter,
    A::Output: AsRef<str>,
    B: Filter,
{
    type Output = B::Output;

    fn apply(&self, input: &str) -> Result<B::Output> {
        let value = self.first.apply(input)?;
        self.next.apply(value.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct Map<F, M> {
    inner: F,
    f: M,
}

impl<F, M, T> Filter for Map<F, M>
where
    F: Filter,
    M: Fn(F::Output) -> T,
{
    type Output = T;

    fn apply(&self, input: &str) -> Result<T> {
        self.inner.apply(input).map(&self.f)
    }
}

/// Accepts anything unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Filter for Identity {
    type Output = String;

    fn apply(&self, input: &str) -> Result<String> {
        Ok(input.to_string())
    }
}

pub fn identity() -> Identity {
    Identity
}

/// Base-10 integer after trimming whitespace.
#[derive(Debug, Clone)]
pub struct Integer {
    field: String,
}

impl Filter for Integer {
    type Output = i64;

    fn apply(&self, input: &str) -> Result<i64> {
        input.trim().parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => PromptError::validation(
                format!("{} must be between {} and {}.", self.field, i64::MIN, i64::MAX),
            ),
            _ => PromptError::validation(format!("{} must be an integer.", self.field)),
        })
    }
}

pub fn integer(field: impl Into<String>) -> Integer {
    Integer {
        field: field.into(),
    }
}

/// Input must be one of a fixed set of strings.
#[derive(Debug, Clone)]
pub struct Membership {
    allowed: Vec<String>,
    field: String,
}

impl Membership {
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Filter for Membership {
    type Output = String;

    fn apply(&self, input: &str) -> Result<String> {
        if self.allowed.iter().any(|a| a == input) {
            return Ok(input.to_string());
        }
        Err(PromptError::validation(format!(
            "{} must be chosen from {:?}.",
            self.field, self.allowed
        )))
    }
}

/// Allowed values keep their first-seen order; repeats are dropped.
pub fn membership<I, T>(allowed: I, field: impl Into<String>) -> Membership
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for value in allowed {
        let value = value.into();
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    Membership {
        allowed: unique,
        field: field.into(),
    }
}

/// Character-count bounds, either side optional.
#[derive(Debug, Clone)]
pub struct Length {
    minimum: Option<i64>,
    maximum: Option<i64>,
    field: String,
}

impl Length {
    fn rejection(&self) -> PromptError {
        let field = &self.field;
        let minimum = self.minimum.map(|m| m.max(0));

        match (minimum, self.maximum) {
            (Some(min), Some(max)) if min == max => PromptError::validation(format!(
                "{field} must be exactly {max} {} in length.",
                characters(max)
            )),
            (Some(min), Some(max)) if min < max => PromptError::validation(format!(
                "{field} must be between {min} and {max} characters in length."
            )),
            (Some(min), Some(max)) => PromptError::config(format!(
                "Minimum character count {min} must not be greater than maximum character count {max}."
            )),
            (Some(min), None) => PromptError::validation(format!(
                "{field} must be at least {min} {} in length.",
                characters(min)
            )),
            (None, Some(max)) => PromptError::validation(format!(
                "{field} may be at most {max} {} in length.",
                characters(max)
            )),
            // Unbounded on both sides never rejects
            (None, None) => PromptError::config("Length filter without bounds rejected input."),
        }
    }
}

impl Filter for Length {
    type Output = String;

    fn apply(&self, input: &str) -> Result<String> {
        let len = input.chars().count() as i64;
        let above_min = self.minimum.is_none_or(|min| len >= min);
        let below_max = self.maximum.is_none_or(|max| len <= max);
        if above_min && below_max {
            return Ok(input.to_string());
        }
        Err(self.rejection())
    }
}

pub fn length(minimum: Option<i64>, maximum: Option<i64>, field: impl Into<String>) -> Length {
    Length {
        minimum,
        maximum,
        field: field.into(),
    }
}

fn characters(count: i64) -> &'static str {
    if count == 1 { "character" } else { "characters" }
}
