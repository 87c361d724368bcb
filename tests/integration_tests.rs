// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
};
use upath::{UniformPath, UniformPathBuf};

static PATH_CORPUS: &[&str] = &[
    "",
    ".",
    "..",
    "foo",
    "foo/bar",
    "foo//bar",
    "foo\\bar",
    "foo/bar/baz",
    "foo/bar/./baz",
    "foo/bar/../baz",
    "../foo/bar/./../baz",
    "/foo",
    "/foo/bar",
    "\\foo\\bar\\",
    "/",
    "///",
    "\\",
];

#[test]
fn test_borrow_eq_ord() {
    // UniformPathBuf implements Borrow<UniformPath> so equality and ordering comparisons should
    // match.
    for (idx, &text1) in PATH_CORPUS.iter().enumerate() {
        for &text2 in &PATH_CORPUS[idx..] {
            let owned1 = UniformPathBuf::parse(text1).unwrap();
            let owned2 = UniformPathBuf::parse(text2).unwrap();
            let borrowed1 = owned1.as_path();
            let borrowed2 = owned2.as_path();

            assert_eq!(
                borrowed1 == borrowed2,
                owned1 == owned2,
                "Eq impls match: {} == {}",
                borrowed1,
                borrowed2
            );
            assert_eq!(
                borrowed1.cmp(borrowed2),
                owned1.cmp(&owned2),
                "Ord impls match: {} and {}",
                borrowed1,
                borrowed2
            );

            // Comparisons are plain comparisons of the canonical text.
            assert_eq!(owned1, borrowed1);
            assert_eq!(
                borrowed1 == borrowed2,
                borrowed1.as_str() == borrowed2.as_str(),
                "Eq impl matches str: {} == {}",
                borrowed1,
                borrowed2
            );
            assert_eq!(
                borrowed1.cmp(borrowed2),
                borrowed1.as_str().cmp(borrowed2.as_str()),
                "Ord impl matches str: {} and {}",
                borrowed1,
                borrowed2
            );
        }
    }
}

#[test]
fn test_borrow_hash() {
    // UniformPathBuf implements Borrow<UniformPath> so hash comparisons should match.
    fn hash_output(x: impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        x.hash(&mut hasher);
        hasher.finish()
    }

    for &text in PATH_CORPUS {
        let owned = UniformPathBuf::parse(text).unwrap();
        let borrowed = UniformPath::from_canonical(owned.as_str()).unwrap();

        assert_eq!(
            hash_output(&owned),
            hash_output(borrowed),
            "consistent Hash: {}",
            borrowed
        );
    }
}

#[test]
fn test_equivalent_spellings_collapse() {
    let unique: HashSet<UniformPathBuf> = PATH_CORPUS
        .iter()
        .map(|text| UniformPathBuf::parse(text).unwrap())
        .collect();
    assert!(unique.contains(UniformPath::from_canonical("foo/bar").unwrap()));
    assert!(unique.contains(UniformPath::root()));
    // Duplicates: two extra spellings of "foo/bar", one of "foo/bar/baz", one of "/foo/bar" and
    // two of "/".
    assert_eq!(unique.len(), PATH_CORPUS.len() - 6);
}

#[test]
fn test_end_to_end() {
    let path = UniformPathBuf::parse("a///b/c//d").unwrap();
    assert_eq!(path, "a/b/c/d");
    assert_eq!(path.directory(), "a/b/c");
    assert_eq!(path.name(), "d");
    assert!(path.in_directory(path.directory(), false).unwrap());
    assert!(path.in_directory(UniformPath::empty(), true).unwrap());

    let anchored = path.to_absolute().unwrap();
    assert_eq!(anchored, "/a/b/c/d");
    assert_eq!(anchored.to_relative(), path);
    assert_eq!(
        UniformPath::combine(
            anchored.directory(),
            UniformPath::from_canonical(path.name()).unwrap()
        )
        .unwrap(),
        anchored
    );
}
