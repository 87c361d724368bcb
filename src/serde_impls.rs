// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde support for the unsized [`UniformPath`].
//!
//! `UniformPathBuf` derives its impls in the crate root: it serializes as a string, and
//! deserializing normalizes that string. A borrowed `&UniformPath` can only be deserialized from
//! text that is already canonical, since there is nowhere to store a rewritten form.

use crate::UniformPath;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for UniformPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct CanonicalVisitor;

impl<'de> de::Visitor<'de> for CanonicalVisitor {
    type Value = &'de UniformPath;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a borrowed string holding a canonical uniform path")
    }

    fn visit_borrowed_str<E: de::Error>(self, v: &'de str) -> Result<Self::Value, E> {
        UniformPath::from_canonical(v)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_borrowed_bytes<E: de::Error>(self, v: &'de [u8]) -> Result<Self::Value, E> {
        let text = std::str::from_utf8(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &self))?;
        self.visit_borrowed_str(text)
    }
}

impl<'de: 'a, 'a> Deserialize<'de> for &'a UniformPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CanonicalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{UniformPath, UniformPathBuf};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Entry {
        source: UniformPathBuf,
        target: UniformPathBuf,
    }

    #[derive(Deserialize)]
    struct BorrowedEntry<'a> {
        #[serde(borrow)]
        source: &'a UniformPath,
    }

    fn encode_raw(source: &str, target: &str) -> Vec<u8> {
        bincode::serialize(&(source, target)).expect("strings always serialize")
    }

    #[test]
    fn owned_paths_normalize_when_read() {
        let bytes = encode_raw("a\\b//c/", "/x/./y/../z");
        let entry: Entry = bincode::deserialize(&bytes).expect("valid paths");
        assert_eq!(entry.source, "a/b/c");
        assert_eq!(entry.target, "/x/z");

        let written = bincode::serialize(&entry).expect("paths serialize");
        assert_eq!(written, encode_raw("a/b/c", "/x/z"));
    }

    #[test]
    fn invalid_paths_are_rejected() {
        for input in &["a/.../b", "/.."] {
            let bytes = encode_raw(input, "b");
            let result: Result<Entry, _> = bincode::deserialize(&bytes);
            assert!(result.is_err(), "{:?} should not deserialize", input);
        }
    }

    #[test]
    fn borrowed_path_requires_canonical_text() {
        let path = UniformPath::from_canonical("/a/b").expect("canonical");
        let bytes = bincode::serialize(path).expect("path serializes");
        let entry: BorrowedEntry<'_> = bincode::deserialize(&bytes).expect("canonical text");
        assert_eq!(entry.source, path);

        let bytes = bincode::serialize("/a//b").expect("strings serialize");
        let result: Result<BorrowedEntry<'_>, _> = bincode::deserialize(&bytes);
        assert!(result.is_err());
    }
}
