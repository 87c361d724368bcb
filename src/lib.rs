// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]
#![cfg_attr(doc_cfg, feature(doc_cfg, doc_auto_cfg))]

//! Uniform virtual paths.
//!
//! `upath` provides [`UniformPathBuf`] and [`UniformPath`], an owned and a borrowed path type that
//! look the same on every platform: segments are separated by `/`, an absolute path starts with a
//! single `/`, and there is exactly one way to spell any given location. They are the currency of
//! the [`fs`] module, which describes a pluggable virtual filesystem (physical disk, memory,
//! archives, ...) in terms of uniform paths rather than OS paths.
//!
//! Every uniform path is *canonical*:
//! * `\` is accepted as a separator on input, and rewritten to `/`.
//! * Runs of separators collapse into one, and a trailing separator is dropped (except for the
//!   root, `/`).
//! * `.` segments disappear and `..` segments resolve against the segment before them. A relative
//!   path may keep a leading run of `..`; an absolute path can never go above its root.
//! * A segment made of three or more dots and nothing else is rejected.
//!
//! Canonicalization happens once, when a path is created from text, and never again. Equality,
//! ordering and hashing are plain string comparisons of the canonical text, and everything derived
//! from a path (its directory, its relative form, ...) is canonical as well.
//!
//! ```
//! use upath::UniformPathBuf;
//!
//! let path: UniformPathBuf = "a///b/c//d".parse()?;
//! assert_eq!(path, "a/b/c/d");
//! assert_eq!(path.directory(), "a/b/c");
//! assert_eq!(path.name(), "d");
//! # Ok::<(), upath::PathError>(())
//! ```
//!
//! None of the operations in this crate touch the disk: they are pure transformations of text, and
//! are safe to use from any number of threads.

use std::{
    borrow::{Borrow, Cow},
    cmp::Ordering,
    fmt, io,
    iter::FusedIterator,
    ops::{Deref, Div},
    rc::Rc,
    str::FromStr,
    sync::Arc,
};

pub mod fs;
mod normalize;
#[cfg(feature = "proptest1")]
mod proptest_impls;
#[cfg(feature = "serde1")]
mod serde_impls;
#[cfg(test)]
mod tests;

use normalize::{normalize, SEPARATOR};

/// An owned, immutable uniform path (akin to [`String`]).
///
/// A `UniformPathBuf` always holds canonical text. It implements [`Deref`] to [`UniformPath`],
/// meaning that all methods on [`UniformPath`] slices are available on `UniformPathBuf` values as
/// well.
///
/// # Examples
///
/// Paths are parsed from text, which may use either separator:
///
/// ```
/// use upath::UniformPathBuf;
///
/// let path: UniformPathBuf = r"\data\..\assets\textures\".parse()?;
/// assert_eq!(path, "/assets/textures");
/// # Ok::<(), upath::PathError>(())
/// ```
///
/// Invalid text is rejected up front:
///
/// ```
/// use upath::{PathError, UniformPathBuf};
///
/// assert!(matches!(
///     UniformPathBuf::parse("/assets/../.."),
///     Err(PathError::RootParent { .. })
/// ));
/// ```
///
/// Paths are built up with [`UniformPath::combine`] or the `/` operator:
///
/// ```
/// use upath::UniformPathBuf;
///
/// let assets = UniformPathBuf::parse("/assets")?;
/// let texture = UniformPathBuf::parse("textures/wood.png")?;
/// assert_eq!((&assets / &texture)?, "/assets/textures/wood.png");
/// # Ok::<(), upath::PathError>(())
/// ```
// NB: the inner String must always be canonical
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "String", into = "String"))]
pub struct UniformPathBuf(String);

impl UniformPathBuf {
    /// Allocates an empty `UniformPathBuf`.
    ///
    /// The empty path denotes "no path": it is relative, and combining it with another path
    /// yields the other path.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let path = UniformPathBuf::new();
    /// assert!(path.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> UniformPathBuf {
        UniformPathBuf(String::new())
    }

    /// Allocates the root path, `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert!(UniformPathBuf::root().is_root());
    /// ```
    #[must_use]
    pub fn root() -> UniformPathBuf {
        UniformPathBuf(SEPARATOR.to_string())
    }

    /// Parses and normalizes `path`.
    ///
    /// Both `/` and `\` are accepted as separators. This is equivalent to the [`FromStr`] and
    /// `TryFrom<&str>` impls.
    ///
    /// # Errors
    ///
    /// * [`PathError::InvalidDots`] if a segment consists of three or more dots and nothing else.
    /// * [`PathError::RootParent`] if a `..` segment would climb above the root of an absolute
    ///   path.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("a/b/../c")?, "a/c");
    /// assert_eq!(UniformPathBuf::parse("../../a/..")?, "../..");
    /// assert!(UniformPathBuf::parse("a/.../b").is_err());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn parse(path: &str) -> Result<UniformPathBuf, PathError> {
        normalize(path).map(|canonical| UniformPathBuf(canonical.into_owned()))
    }

    /// Wraps text that is known to be canonical.
    #[inline]
    pub(crate) fn from_canonical_unchecked(path: String) -> UniformPathBuf {
        debug_assert!(
            normalize(&path).map_or(false, |canonical| canonical == path.as_str()),
            "{:?} is not canonical",
            path
        );
        UniformPathBuf(path)
    }

    /// Coerces to a [`UniformPath`] slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::{UniformPath, UniformPathBuf};
    ///
    /// let p = UniformPathBuf::parse("/test")?;
    /// assert_eq!(Some(p.as_path()), UniformPath::from_canonical("/test"));
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn as_path(&self) -> &UniformPath {
        UniformPath::coerce(&self.0)
    }

    /// Consumes the `UniformPathBuf`, yielding its canonical [`String`].
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let p = UniformPathBuf::parse("foo//bar/")?;
    /// assert_eq!(p.into_string(), "foo/bar");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Converts this `UniformPathBuf` into a [boxed](Box) [`UniformPath`].
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_boxed_path(self) -> Box<UniformPath> {
        let ptr = Box::into_raw(self.0.into_boxed_str()) as *mut UniformPath;
        // SAFETY:
        // * ptr was created by consuming a Box<str> holding canonical text
        // * UniformPath is marked as #[repr(transparent)] so the conversion from *mut str to
        //   *mut UniformPath is valid
        unsafe { Box::from_raw(ptr) }
    }
}

impl Deref for UniformPathBuf {
    type Target = UniformPath;

    fn deref(&self) -> &UniformPath {
        self.as_path()
    }
}

impl fmt::Debug for UniformPathBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl fmt::Display for UniformPathBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// A slice of a uniform path (akin to [`str`]).
///
/// This type supports the inspection and decomposition operations of uniform paths: testing
/// whether a path is absolute, extracting its directory and name, splitting it into segments,
/// combining it with other paths, and checking whether it lies inside a directory.
///
/// This is an *unsized* type, meaning that it must always be used behind a pointer like `&` or
/// [`Box`]. For an owned version of this type, see [`UniformPathBuf`].
///
/// # Examples
///
/// ```
/// use upath::UniformPathBuf;
///
/// let path = UniformPathBuf::parse("/a/b/c.txt")?;
///
/// assert_eq!(path.directory(), "/a/b");
/// assert_eq!(path.name(), "c.txt");
/// assert_eq!(path.name_without_extension(), "c");
/// assert_eq!(path.extension(), Some("txt"));
/// assert_eq!(path.split(), ["a", "b", "c.txt"]);
/// # Ok::<(), upath::PathError>(())
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UniformPath(str);

impl UniformPath {
    /// Wraps a string slice as a `UniformPath` slice, if it is already canonical.
    ///
    /// This is a cost-free conversion: nothing is copied. Text that would be changed by
    /// normalization (or that is invalid) returns `None`; use [`UniformPathBuf::parse`] for it
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPath;
    ///
    /// assert!(UniformPath::from_canonical("/a/b").is_some());
    /// assert!(UniformPath::from_canonical("../a").is_some());
    /// assert!(UniformPath::from_canonical("/a/b/").is_none());
    /// assert!(UniformPath::from_canonical(r"a\b").is_none());
    /// assert!(UniformPath::from_canonical("a/./b").is_none());
    /// ```
    #[must_use]
    pub fn from_canonical(path: &str) -> Option<&UniformPath> {
        match normalize(path) {
            Ok(canonical) if canonical == path => Some(UniformPath::coerce(path)),
            _ => None,
        }
    }

    /// The empty path.
    #[must_use]
    pub fn empty() -> &'static UniformPath {
        UniformPath::coerce("")
    }

    /// The root path, `/`.
    #[must_use]
    pub fn root() -> &'static UniformPath {
        UniformPath::coerce("/")
    }

    #[inline]
    fn coerce(path: &str) -> &UniformPath {
        // SAFETY: UniformPath is marked as #[repr(transparent)] over str, and every caller hands
        // in canonical text
        unsafe { &*(path as *const str as *const UniformPath) }
    }

    /// Yields the underlying canonical [`str`] slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let s = UniformPathBuf::parse(r"foo\bar.txt")?;
    /// assert_eq!(s.as_str(), "foo/bar.txt");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts a `UniformPath` to an owned [`UniformPathBuf`].
    #[must_use = "this returns the result of the operation, \
                  without modifying the original"]
    pub fn to_path_buf(&self) -> UniformPathBuf {
        UniformPathBuf(self.0.to_owned())
    }

    /// Returns `true` for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the path starts with the root separator `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert!(UniformPathBuf::parse("/x")?.is_absolute());
    /// assert!(!UniformPathBuf::parse("x")?.is_absolute());
    /// assert!(!UniformPathBuf::new().is_absolute());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with(SEPARATOR)
    }

    /// Returns `true` if the path is not absolute. The empty path is relative.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns `true` if the path is exactly the root, `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        &self.0 == "/"
    }

    fn starts_with_parent(&self) -> bool {
        &self.0 == ".." || self.0.starts_with("../")
    }

    /// Combines two paths into a new path.
    ///
    /// If one of the paths is empty, the other one is returned. If `path2` is absolute it replaces
    /// `path1` entirely. Otherwise `path2` is appended to `path1`, and any leading `..` in `path2`
    /// resolves against the end of `path1`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::RootParent`] if `path2` climbs above the root of an absolute `path1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::{UniformPath, UniformPathBuf};
    ///
    /// let a = UniformPathBuf::parse("/a")?;
    /// let b = UniformPathBuf::parse("b/")?;
    /// assert_eq!(UniformPath::combine(&a, &b)?, "/a/b");
    ///
    /// let absolute = UniformPathBuf::parse("/b")?;
    /// assert_eq!(UniformPath::combine(&a, &absolute)?, "/b");
    ///
    /// let up = UniformPathBuf::parse("../..")?;
    /// assert!(UniformPath::combine(&a, &up).is_err());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn combine(
        path1: impl AsRef<UniformPath>,
        path2: impl AsRef<UniformPath>,
    ) -> Result<UniformPathBuf, PathError> {
        let (path1, path2) = (path1.as_ref(), path2.as_ref());
        if path2.is_absolute() || path1.is_empty() {
            return Ok(path2.to_path_buf());
        }
        if path2.is_empty() {
            return Ok(path1.to_path_buf());
        }

        let mut combined = String::with_capacity(path1.0.len() + path2.0.len() + 1);
        combined.push_str(&path1.0);
        if !path1.is_root() {
            combined.push(SEPARATOR);
        }
        combined.push_str(&path2.0);

        // Only a `.` on either side or a leading `..` on the right can make the joined text
        // non-canonical.
        if &path1.0 == "." || &path2.0 == "." || path2.starts_with_parent() {
            UniformPathBuf::try_from(combined)
        } else {
            Ok(UniformPathBuf::from_canonical_unchecked(combined))
        }
    }

    /// Combines three paths, left to right.
    ///
    /// Equivalent to `combine(combine(path1, path2)?, path3)`.
    pub fn combine3(
        path1: impl AsRef<UniformPath>,
        path2: impl AsRef<UniformPath>,
        path3: impl AsRef<UniformPath>,
    ) -> Result<UniformPathBuf, PathError> {
        UniformPath::combine(UniformPath::combine(path1, path2)?, path3)
    }

    /// Combines four paths, left to right.
    pub fn combine4(
        path1: impl AsRef<UniformPath>,
        path2: impl AsRef<UniformPath>,
        path3: impl AsRef<UniformPath>,
        path4: impl AsRef<UniformPath>,
    ) -> Result<UniformPathBuf, PathError> {
        UniformPath::combine(UniformPath::combine3(path1, path2, path3)?, path4)
    }

    /// Combines `self` with `path`. See [`UniformPath::combine`].
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let dir = UniformPathBuf::parse("a/b")?;
    /// assert_eq!(dir.join(UniformPathBuf::parse("../c")?)?, "a/c");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn join(&self, path: impl AsRef<UniformPath>) -> Result<UniformPathBuf, PathError> {
        UniformPath::combine(self, path)
    }

    /// Returns the directory part of the path: everything before the last separator.
    ///
    /// The root and single-segment relative paths have an empty directory; a path directly under
    /// the root has the root as its directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("/a/b/c.txt")?.directory(), "/a/b");
    /// assert_eq!(UniformPathBuf::parse("/a")?.directory(), "/");
    /// assert_eq!(UniformPathBuf::parse("../a")?.directory(), "..");
    /// assert_eq!(UniformPathBuf::parse("a")?.directory(), "");
    /// assert_eq!(UniformPathBuf::root().directory(), "");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn directory(&self) -> &UniformPath {
        if self.is_root() {
            return UniformPath::empty();
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) => UniformPath::root(),
            Some(index) => UniformPath::coerce(&self.0[..index]),
            None => UniformPath::empty(),
        }
    }

    /// Returns the last segment of the path, or `""` for the root and the empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("/a/b/c.txt")?.name(), "c.txt");
    /// assert_eq!(UniformPathBuf::parse("../../a/b")?.name(), "b");
    /// assert_eq!(UniformPathBuf::root().name(), "");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }

    /// Returns [`name`](UniformPath::name) without its final `.` suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("/a/b/c.txt")?.name_without_extension(), "c");
    /// assert_eq!(UniformPathBuf::parse("/a/b/c.tar.gz")?.name_without_extension(), "c.tar");
    /// assert_eq!(UniformPathBuf::parse("/a/b")?.name_without_extension(), "b");
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn name_without_extension(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(index) => &name[..index],
            None => name,
        }
    }

    /// Returns the text after the final `.` of [`name`](UniformPath::name), if there is one.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.name();
        name.rfind('.').map(|index| &name[index + 1..])
    }

    /// Produces an iterator over the segments of the path.
    ///
    /// Absoluteness is not represented: the root and the empty path both yield nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let path = UniformPathBuf::parse("/tmp/foo.txt")?;
    /// let mut it = path.segments();
    ///
    /// assert_eq!(it.next(), Some("tmp"));
    /// assert_eq!(it.next(), Some("foo.txt"));
    /// assert_eq!(it.next(), None);
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            inner: self.0.split(SEPARATOR),
        }
    }

    /// Collects the segments of the path. See [`segments`](UniformPath::segments).
    #[must_use]
    pub fn split(&self) -> Vec<&str> {
        self.segments().collect()
    }

    /// Returns the first segment of the path, or `None` for the root and the empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("/a/b")?.first_directory(), Some("a"));
    /// assert_eq!(UniformPathBuf::parse("a/b")?.first_directory(), Some("a"));
    /// assert_eq!(UniformPathBuf::root().first_directory(), None);
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn first_directory(&self) -> Option<&str> {
        self.segments().next()
    }

    /// Returns the path without its leading `/`. The root becomes the empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("/a/b")?.to_relative(), "a/b");
    /// assert_eq!(UniformPathBuf::parse("a/b")?.to_relative(), "a/b");
    /// assert!(UniformPathBuf::root().to_relative().is_empty());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    #[must_use]
    pub fn to_relative(&self) -> &UniformPath {
        match self.0.strip_prefix(SEPARATOR) {
            Some(rest) => UniformPath::coerce(rest),
            None => self,
        }
    }

    /// Returns the path anchored at the root. The empty path becomes the root.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::RootParent`] for a relative path that starts with `..`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// assert_eq!(UniformPathBuf::parse("a/b")?.to_absolute()?, "/a/b");
    /// assert_eq!(UniformPathBuf::new().to_absolute()?, "/");
    /// assert!(UniformPathBuf::parse("../a")?.to_absolute().is_err());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn to_absolute(&self) -> Result<UniformPathBuf, PathError> {
        UniformPath::combine(UniformPath::root(), self)
    }

    /// Returns `true` if this path is located inside `directory`.
    ///
    /// A path is inside a directory equal to itself. With `recursive` set to `false` the path must
    /// be a direct child of `directory`. A relative path that climbs above a relative `directory`
    /// with `..` is never inside it.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MixedAbsoluteness`] if one path is absolute and the other relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::UniformPathBuf;
    ///
    /// let path = UniformPathBuf::parse("/a/b/c")?;
    /// let a = UniformPathBuf::parse("/a")?;
    /// assert!(path.in_directory(&a, true)?);
    /// assert!(!path.in_directory(&a, false)?);
    ///
    /// let sibling = UniformPathBuf::parse("/a/bc")?;
    /// assert!(!sibling.in_directory(UniformPathBuf::parse("/a/b")?, true)?);
    ///
    /// assert!(path.in_directory(UniformPathBuf::parse("a")?, true).is_err());
    /// # Ok::<(), upath::PathError>(())
    /// ```
    pub fn in_directory(
        &self,
        directory: impl AsRef<UniformPath>,
        recursive: bool,
    ) -> Result<bool, PathError> {
        let directory = directory.as_ref();
        if self.is_absolute() != directory.is_absolute() {
            return Err(PathError::MixedAbsoluteness {
                path: self.to_path_buf(),
                directory: directory.to_path_buf(),
            });
        }

        // `.` and the empty path both stand for the current directory.
        let dir = if &directory.0 == "." { "" } else { &directory.0 };
        let rest = match self.0.strip_prefix(dir) {
            Some(rest) => rest,
            None => return Ok(false),
        };
        if rest.is_empty() {
            return Ok(true);
        }

        let rest = if dir.is_empty() || dir.ends_with(SEPARATOR) {
            rest
        } else {
            match rest.strip_prefix(SEPARATOR) {
                Some(rest) => rest,
                None => return Ok(false),
            }
        };

        // A leading `..` after the boundary climbs out of `directory` instead of descending.
        if rest == ".." || rest.starts_with("../") {
            return Ok(false);
        }
        Ok(recursive || !rest.contains(SEPARATOR))
    }
}

impl Clone for Box<UniformPath> {
    fn clone(&self) -> Self {
        self.to_path_buf().into_boxed_path()
    }
}

impl fmt::Display for UniformPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for UniformPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// An iterator over the segments of a [`UniformPath`].
///
/// This `struct` is created by the [`segments`] method on [`UniformPath`].
/// See its documentation for more.
///
/// [`segments`]: UniformPath::segments
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Segments<'a> {
    inner: std::str::Split<'a, char>,
}

impl fmt::Debug for Segments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Segments")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.by_ref().find(|segment| !segment.is_empty())
    }
}

impl<'a> DoubleEndedIterator for Segments<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        loop {
            match self.inner.next_back()? {
                "" => continue,
                segment => return Some(segment),
            }
        }
    }
}

impl FusedIterator for Segments<'_> {}

// ---
// Errors
// ---

/// An error produced while creating or relating uniform paths.
///
/// # Examples
///
/// ```
/// use upath::{PathError, UniformPathBuf};
///
/// let err = UniformPathBuf::parse("/..").unwrap_err();
/// assert_eq!(err, PathError::RootParent { path: "/..".to_owned() });
/// assert_eq!(err.into_io_error().kind(), std::io::ErrorKind::InvalidInput);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A segment consists of three or more dots and nothing else.
    #[error("the path contains invalid dots: {path:?}")]
    InvalidDots {
        /// The text that was being normalized.
        path: String,
    },

    /// A `..` segment would go above the root of an absolute path.
    #[error("the path cannot go to the parent of a root path: {path:?}")]
    RootParent {
        /// The text that was being normalized.
        path: String,
    },

    /// An absolute path was related to a relative one, or the other way around.
    #[error("cannot mix absolute and relative paths: {path} and {directory}")]
    MixedAbsoluteness {
        /// The path being tested.
        path: UniformPathBuf,
        /// The directory it was tested against.
        directory: UniformPathBuf,
    },
}

impl PathError {
    /// Converts self into a [`std::io::Error`] with kind
    /// [`InvalidInput`](io::ErrorKind::InvalidInput).
    pub fn into_io_error(self) -> io::Error {
        // NOTE: we don't implement `From<PathError> for io::Error` because we want to ensure the
        // user actually desires that conversion.
        io::Error::new(io::ErrorKind::InvalidInput, self)
    }
}

/// A string slice that is not a canonical uniform path.
///
/// Produced by the `TryFrom<&str>` implementation for [`&UniformPath`](UniformPath). The text may
/// still be a valid path; [`UniformPathBuf::parse`] normalizes it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("string is not a canonical uniform path")]
pub struct NotCanonicalError(());

// ---
// From/TryFrom impls
// ---

impl FromStr for UniformPathBuf {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniformPathBuf::parse(s)
    }
}

impl TryFrom<&str> for UniformPathBuf {
    type Error = PathError;

    fn try_from(path: &str) -> Result<UniformPathBuf, PathError> {
        UniformPathBuf::parse(path)
    }
}

impl TryFrom<String> for UniformPathBuf {
    type Error = PathError;

    /// Normalizes `path`, reusing its allocation when it is already canonical.
    fn try_from(path: String) -> Result<UniformPathBuf, PathError> {
        let canonical_len = match normalize(&path)? {
            Cow::Borrowed(canonical) => canonical.len(),
            Cow::Owned(canonical) => return Ok(UniformPathBuf(canonical)),
        };
        let mut path = path;
        path.truncate(canonical_len);
        Ok(UniformPathBuf(path))
    }
}

impl<'a> TryFrom<&'a str> for &'a UniformPath {
    type Error = NotCanonicalError;

    fn try_from(path: &'a str) -> Result<&'a UniformPath, NotCanonicalError> {
        UniformPath::from_canonical(path).ok_or(NotCanonicalError(()))
    }
}

impl From<&UniformPath> for UniformPathBuf {
    fn from(path: &UniformPath) -> UniformPathBuf {
        path.to_path_buf()
    }
}

impl<'a> From<&'a UniformPath> for Cow<'a, UniformPath> {
    fn from(path: &'a UniformPath) -> Cow<'a, UniformPath> {
        Cow::Borrowed(path)
    }
}

impl From<&'_ UniformPath> for Box<UniformPath> {
    fn from(path: &UniformPath) -> Box<UniformPath> {
        path.to_path_buf().into_boxed_path()
    }
}

impl From<&'_ UniformPath> for Arc<UniformPath> {
    fn from(path: &UniformPath) -> Arc<UniformPath> {
        let arc: Arc<str> = Arc::from(&path.0);
        let ptr = Arc::into_raw(arc) as *const UniformPath;
        // SAFETY:
        // * path is canonical
        // * ptr was created by consuming an Arc<str> so it represents an arced pointer
        // * UniformPath is marked as #[repr(transparent)] so the conversion from *const str to
        //   *const UniformPath is valid
        unsafe { Arc::from_raw(ptr) }
    }
}

impl From<&'_ UniformPath> for Rc<UniformPath> {
    fn from(path: &UniformPath) -> Rc<UniformPath> {
        let rc: Rc<str> = Rc::from(&path.0);
        let ptr = Rc::into_raw(rc) as *const UniformPath;
        // SAFETY:
        // * path is canonical
        // * ptr was created by consuming an Rc<str> so it represents an rced pointer
        // * UniformPath is marked as #[repr(transparent)] so the conversion from *const str to
        //   *const UniformPath is valid
        unsafe { Rc::from_raw(ptr) }
    }
}

impl From<Box<UniformPath>> for UniformPathBuf {
    fn from(path: Box<UniformPath>) -> UniformPathBuf {
        let ptr = Box::into_raw(path) as *mut str;
        // SAFETY: the reverse of `into_boxed_path`, UniformPath is #[repr(transparent)] over str
        let boxed: Box<str> = unsafe { Box::from_raw(ptr) };
        UniformPathBuf(boxed.into_string())
    }
}

impl From<UniformPathBuf> for Box<UniformPath> {
    fn from(path: UniformPathBuf) -> Box<UniformPath> {
        path.into_boxed_path()
    }
}

impl<'a> From<Cow<'a, UniformPath>> for UniformPathBuf {
    fn from(path: Cow<'a, UniformPath>) -> UniformPathBuf {
        path.into_owned()
    }
}

impl From<UniformPathBuf> for String {
    fn from(path: UniformPathBuf) -> String {
        path.into_string()
    }
}

impl<'a> From<UniformPathBuf> for Cow<'a, UniformPath> {
    fn from(path: UniformPathBuf) -> Cow<'a, UniformPath> {
        Cow::Owned(path)
    }
}

impl From<UniformPathBuf> for Arc<UniformPath> {
    fn from(path: UniformPathBuf) -> Arc<UniformPath> {
        Arc::from(path.as_path())
    }
}

impl From<UniformPathBuf> for Rc<UniformPath> {
    fn from(path: UniformPathBuf) -> Rc<UniformPath> {
        Rc::from(path.as_path())
    }
}

// ---
// AsRef impls
// ---

impl AsRef<UniformPath> for UniformPath {
    fn as_ref(&self) -> &UniformPath {
        self
    }
}

impl AsRef<UniformPath> for UniformPathBuf {
    fn as_ref(&self) -> &UniformPath {
        self.as_path()
    }
}

impl AsRef<str> for UniformPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for UniformPathBuf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ---
// Borrow and ToOwned
// ---

impl Borrow<UniformPath> for UniformPathBuf {
    fn borrow(&self) -> &UniformPath {
        self.as_path()
    }
}

impl ToOwned for UniformPath {
    type Owned = UniformPathBuf;

    fn to_owned(&self) -> UniformPathBuf {
        self.to_path_buf()
    }
}

// ---
// Operators and iteration
// ---

impl<P: AsRef<UniformPath>> Div<P> for &UniformPath {
    type Output = Result<UniformPathBuf, PathError>;

    /// Same as [`UniformPath::combine`].
    fn div(self, rhs: P) -> Self::Output {
        UniformPath::combine(self, rhs)
    }
}

impl<P: AsRef<UniformPath>> Div<P> for &UniformPathBuf {
    type Output = Result<UniformPathBuf, PathError>;

    /// Same as [`UniformPath::combine`].
    fn div(self, rhs: P) -> Self::Output {
        UniformPath::combine(self, rhs)
    }
}

impl<'a> IntoIterator for &'a UniformPathBuf {
    type Item = &'a str;
    type IntoIter = Segments<'a>;
    fn into_iter(self) -> Segments<'a> {
        self.segments()
    }
}

impl<'a> IntoIterator for &'a UniformPath {
    type Item = &'a str;
    type IntoIter = Segments<'a>;
    fn into_iter(self) -> Segments<'a> {
        self.segments()
    }
}

// ---
// [Partial]Eq and [Partial]Ord across the path types and strings
// ---

macro_rules! impl_cmp {
    ($lhs:ty, $rhs: ty) => {
        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialEq<$rhs> for $lhs {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                <UniformPath as PartialEq>::eq(self, other)
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialEq<$lhs> for $rhs {
            #[inline]
            fn eq(&self, other: &$lhs) -> bool {
                <UniformPath as PartialEq>::eq(self, other)
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialOrd<$rhs> for $lhs {
            #[inline]
            fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> {
                <UniformPath as PartialOrd>::partial_cmp(self, other)
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialOrd<$lhs> for $rhs {
            #[inline]
            fn partial_cmp(&self, other: &$lhs) -> Option<Ordering> {
                <UniformPath as PartialOrd>::partial_cmp(self, other)
            }
        }
    };
}

impl_cmp!(UniformPathBuf, UniformPath);
impl_cmp!(UniformPathBuf, &'a UniformPath);
impl_cmp!(Cow<'a, UniformPath>, UniformPath);
impl_cmp!(Cow<'a, UniformPath>, &'b UniformPath);
impl_cmp!(Cow<'a, UniformPath>, UniformPathBuf);

macro_rules! impl_cmp_str {
    ($lhs:ty, $rhs: ty) => {
        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialEq<$rhs> for $lhs {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                <str as PartialEq>::eq(self.as_ref(), other.as_ref())
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialEq<$lhs> for $rhs {
            #[inline]
            fn eq(&self, other: &$lhs) -> bool {
                <str as PartialEq>::eq(self.as_ref(), other.as_ref())
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialOrd<$rhs> for $lhs {
            #[inline]
            fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> {
                <str as PartialOrd>::partial_cmp(self.as_ref(), other.as_ref())
            }
        }

        #[allow(clippy::extra_unused_lifetimes)]
        impl<'a, 'b> PartialOrd<$lhs> for $rhs {
            #[inline]
            fn partial_cmp(&self, other: &$lhs) -> Option<Ordering> {
                <str as PartialOrd>::partial_cmp(self.as_ref(), other.as_ref())
            }
        }
    };
}

impl_cmp_str!(UniformPathBuf, str);
impl_cmp_str!(UniformPathBuf, &'a str);
impl_cmp_str!(UniformPathBuf, String);
impl_cmp_str!(UniformPath, str);
impl_cmp_str!(UniformPath, &'a str);
impl_cmp_str!(UniformPath, String);
impl_cmp_str!(&'a UniformPath, str);
impl_cmp_str!(&'a UniformPath, String);
