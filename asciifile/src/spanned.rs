use crate::Span;
use failure::Fail;
use std::{fmt, ops::Deref};

/// A value together with the part of the source it was read from.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub span: Span,
    pub data: T,
}

impl<T> Eq for Spanned<T> where T: Eq {}
impl<T> PartialEq for Spanned<T>
where
    T: PartialEq,
{
    /// Spans are ignored: a token read at two places in the source is still
    /// the same token.
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> fmt::Display for Spanned<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.data, self.span)
    }
}

impl<T> Fail for Spanned<T>
where
    T: Fail,
{
    fn cause(&self) -> Option<&dyn Fail> {
        Some(&self.data)
    }
}

impl<T> Spanned<T> {
    pub fn new(span: Span, data: T) -> Self {
        Self { span, data }
    }

    pub fn map<U, F>(&self, f: F) -> Spanned<U>
    where
        F: FnOnce(&T) -> U,
    {
        Spanned {
            span: self.span,
            data: f(&self.data),
        }
    }
}
