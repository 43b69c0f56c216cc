use std::fmt;
use std::ops::Deref;

/// Maximum number of characters a module may display.
pub const MODULE_TEXT_CAPACITY: usize = 64;

/// An owned string holding at most `N` characters.
///
/// Longer input is cut after the `N`th character (Unicode scalar value, so a
/// multi-byte sequence is never split). The same input always yields the same
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedText<const N: usize = MODULE_TEXT_CAPACITY> {
    inner: String,
}

impl<const N: usize> BoundedText<N> {
    /// Copy `text`, truncating it to `N` characters.
    pub fn new(text: &str) -> Self {
        let inner = match text.char_indices().nth(N) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
        Self { inner }
    }

    /// Take ownership of `text`, truncating it in place to `N` characters.
    pub fn from_string(mut text: String) -> Self {
        if let Some((cut, _)) = text.char_indices().nth(N) {
            text.truncate(cut);
        }
        Self { inner: text }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Number of characters held (not bytes).
    pub fn char_count(&self) -> usize {
        self.inner.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The character bound `N`.
    #[inline]
    pub const fn capacity() -> usize {
        N
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl<const N: usize> From<String> for BoundedText<N> {
    fn from(text: String) -> Self {
        Self::from_string(text)
    }
}

impl<const N: usize> From<&str> for BoundedText<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
