// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The normalization pass that turns raw text into the canonical uniform form.

use crate::PathError;
use std::borrow::Cow;

pub(crate) const SEPARATOR: char = '/';

#[inline]
fn is_separator(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

#[inline]
fn is_only_dots(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b == b'.')
}

/// Normalizes `path` into its canonical form.
///
/// The result borrows `path` whenever the canonical form is a prefix of it, which is the case for
/// every input that is already canonical apart from a single trailing `/`.
pub(crate) fn normalize(path: &str) -> Result<Cow<'_, str>, PathError> {
    if !needs_rewrite(path) {
        let trimmed = match path.strip_suffix(SEPARATOR) {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        return Ok(Cow::Borrowed(trimmed));
    }

    log::trace!("rewriting path {:?}", path);
    rewrite(path).map(Cow::Owned)
}

/// Single scan deciding whether `path` can be returned (almost) as is.
///
/// Rewriting is needed for backslashes, runs of separators, and segments made only of dots.
fn needs_rewrite(path: &str) -> bool {
    let mut previous_was_separator = false;
    let mut segment_len = 0usize;
    let mut dot_count = 0usize;

    for &b in path.as_bytes() {
        if is_separator(b) {
            if b == b'\\' || previous_was_separator {
                return true;
            }
            if segment_len > 0 && segment_len == dot_count {
                return true;
            }
            previous_was_separator = true;
            segment_len = 0;
            dot_count = 0;
        } else {
            previous_was_separator = false;
            segment_len += 1;
            if b == b'.' {
                dot_count += 1;
            }
        }
    }

    segment_len > 0 && segment_len == dot_count
}

fn rewrite(path: &str) -> Result<String, PathError> {
    let absolute = path.bytes().next().map_or(false, is_separator);
    let mut segment_count = 0usize;
    let mut kept: Vec<&str> = Vec::new();
    for segment in path
        .split(|c: char| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty())
    {
        segment_count += 1;
        match segment {
            "." => {}
            ".." => match kept.last() {
                None if absolute => {
                    return Err(PathError::RootParent {
                        path: path.to_owned(),
                    })
                }
                None | Some(&"..") => kept.push(segment),
                Some(_) => {
                    kept.pop();
                }
            },
            _ if is_only_dots(segment) => {
                return Err(PathError::InvalidDots {
                    path: path.to_owned(),
                })
            }
            _ => kept.push(segment),
        }
    }

    // Only a lone `.` can leave a single-segment relative path with nothing kept.
    if !absolute && segment_count == 1 && kept.is_empty() {
        return Ok(".".to_owned());
    }

    let capacity = kept.iter().map(|segment| segment.len() + 1).sum();
    let mut canonical = String::with_capacity(capacity);
    if absolute {
        canonical.push(SEPARATOR);
    }
    for (i, segment) in kept.iter().enumerate() {
        if i > 0 {
            canonical.push(SEPARATOR);
        }
        canonical.push_str(segment);
    }
    Ok(canonical)
}
