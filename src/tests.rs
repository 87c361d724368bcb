// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

// Test that all required impls exist, and the path operations against fixed tables.

use crate::{PathError, UniformPath, UniformPathBuf};
use std::{borrow::Cow, rc::Rc, sync::Arc};

macro_rules! all_into {
    ($t:ty, $x:ident) => {
        test_into::<$t, UniformPathBuf>($x.clone());
        test_into::<$t, Box<UniformPath>>($x.clone());
        test_into::<$t, Arc<UniformPath>>($x.clone());
        test_into::<$t, Rc<UniformPath>>($x.clone());
        test_into::<$t, Cow<'_, UniformPath>>($x.clone());
    };
}

fn p(text: &str) -> UniformPathBuf {
    UniformPathBuf::parse(text).unwrap_or_else(|err| panic!("{:?}: {}", text, err))
}

#[test]
fn test_borrowed_into() {
    let path = UniformPath::from_canonical("test/path").unwrap();
    all_into!(&UniformPath, path);
}

#[test]
fn test_owned_into() {
    let path_buf = p("test/path");
    all_into!(UniformPathBuf, path_buf);
    test_into::<UniformPathBuf, String>(path_buf);
}

fn test_into<T, U>(orig: T)
where
    T: Into<U>,
{
    let _ = orig.into();
}

#[test]
fn test_smart_pointers_keep_text() {
    let path = p(r"a\b\..\c");
    let boxed: Box<UniformPath> = path.clone().into();
    let arc: Arc<UniformPath> = path.as_path().into();
    let rc: Rc<UniformPath> = path.as_path().into();
    assert_eq!(&*boxed, path.as_path());
    assert_eq!(&*arc, path.as_path());
    assert_eq!(&*rc, path.as_path());
    assert_eq!(boxed.clone(), boxed);
    assert_eq!(UniformPathBuf::from(boxed), "a/c");
}

#[test]
fn test_string_conversions() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(UniformPathBuf::try_from(String::from("a//b/"))?, "a/b");
    assert_eq!(<&UniformPath>::try_from("a/b")?, "a/b");
    assert!(<&UniformPath>::try_from("a/b/").is_err());
    assert_eq!("/x/./y".parse::<UniformPathBuf>()?, "/x/y");
    assert_eq!(p("a\\b").to_string(), "a/b");
    assert_eq!(format!("{:?}", p("a\\b")), "\"a/b\"");
    Ok(())
}

static COMBINE_TABLE: &[(&str, &str, &str)] = &[
    ("", "", ""),
    ("/", "", "/"),
    ("\\", "", "/"),
    ("//", "", "/"),
    ("\\\\", "", "/"),
    ("/", "/", "/"),
    ("\\", "\\", "/"),
    ("//", "//", "/"),
    ("", "/", "/"),
    ("a", "b", "a/b"),
    ("a/b", "c", "a/b/c"),
    ("", "b", "b"),
    ("a", "", "a"),
    ("a/b", "", "a/b"),
    ("/a", "b/", "/a/b"),
    ("/a", "/b", "/b"),
    ("/a", "", "/a"),
    ("//a", "", "/a"),
    ("a/", "", "a"),
    ("a//", "", "a"),
    ("a/", "b", "a/b"),
    ("a/", "b/", "a/b"),
    ("a//", "b//", "a/b"),
    ("a", "../b", "b"),
    ("a/../", "b", "b"),
    ("/a/..", "b", "/b"),
    ("/a/..", "", "/"),
    ("//a//..//", "", "/"),
    ("\\a", "", "/a"),
    ("\\\\a", "", "/a"),
    ("/", "a", "/a"),
    (".", "a", "a"),
    ("a", ".", "a"),
    ("..", "a", "../a"),
    ("a/b", "../..", ""),
    ("a", "../..", ".."),
    ("../a", "..", ".."),
];

#[test]
fn test_combine() {
    for &(path1, path2, expected) in COMBINE_TABLE {
        let (path1, path2) = (p(path1), p(path2));
        let combined = UniformPath::combine(&path1, &path2)
            .unwrap_or_else(|err| panic!("{:?} + {:?}: {}", path1, path2, err));
        assert_eq!(combined, expected, "combining {:?} and {:?}", path1, path2);
        assert_eq!((&path1 / &path2).unwrap(), expected);
        assert_eq!(path1.join(&path2).unwrap(), expected);
        assert_eq!(combined, p(expected));
    }
}

#[test]
fn test_combine_above_root() {
    for &(path1, path2) in &[("/", ".."), ("/a", "../.."), ("/a/b", "../../../c")] {
        let result = UniformPath::combine(p(path1), p(path2));
        assert!(
            matches!(result, Err(PathError::RootParent { .. })),
            "{:?} + {:?} gave {:?}",
            path1,
            path2,
            result
        );
    }
}

#[test]
fn test_combine3() {
    let table: &[(&str, &str, &str, &str)] = &[
        ("", "", "", ""),
        ("a", "b", "c", "a/b/c"),
        ("a/b", "c", "d", "a/b/c/d"),
        ("", "b", "", "b"),
        ("a", "", "", "a"),
        ("a/b", "", "", "a/b"),
        ("/a", "b/", "c/", "/a/b/c"),
        ("/a", "/b", "/c", "/c"),
    ];
    for &(path1, path2, path3, expected) in table {
        let combined = UniformPath::combine3(p(path1), p(path2), p(path3)).unwrap();
        assert_eq!(combined, expected, "{:?} + {:?} + {:?}", path1, path2, path3);
    }

    assert_eq!(
        UniformPath::combine4(p("/a"), p("b"), p("../c"), p("d")).unwrap(),
        "/a/c/d"
    );
}

#[test]
fn test_directory() {
    let table: &[(&str, &str)] = &[
        ("", ""),
        ("/", ""),
        ("/a", "/"),
        ("/a/b", "/a"),
        ("/a/b/c.txt", "/a/b"),
        ("a", ""),
        ("../a", ".."),
        ("../../a/b", "../../a"),
    ];
    for &(path, expected) in table {
        assert_eq!(p(path).directory(), expected, "directory of {:?}", path);
    }
}

#[test]
fn test_name() {
    let table: &[(&str, &str, &str, Option<&str>)] = &[
        ("", "", "", None),
        ("/", "", "", None),
        ("/a", "a", "a", None),
        ("/a/b", "b", "b", None),
        ("/a/b/c.txt", "c.txt", "c", Some("txt")),
        ("a", "a", "a", None),
        ("../a", "a", "a", None),
        ("../../a/b", "b", "b", None),
        ("a/.hidden", ".hidden", "", Some("hidden")),
        ("a/archive.tar.gz", "archive.tar.gz", "archive.tar", Some("gz")),
        ("a/b..", "b..", "b.", Some("")),
    ];
    for &(path, name, stem, extension) in table {
        let path = p(path);
        assert_eq!(path.name(), name, "name of {:?}", path);
        assert_eq!(path.name_without_extension(), stem, "stem of {:?}", path);
        assert_eq!(path.extension(), extension, "extension of {:?}", path);
    }
}

#[test]
fn test_split() {
    let empty: [&str; 0] = [];
    assert_eq!(UniformPathBuf::new().split(), empty);
    assert_eq!(UniformPathBuf::root().split(), empty);
    assert_eq!(p("/a").split(), ["a"]);
    assert_eq!(p("/a/b/c").split(), ["a", "b", "c"]);
    assert_eq!(p("a").split(), ["a"]);
    assert_eq!(p("a/b").split(), ["a", "b"]);
    assert_eq!(p("a/b/c").split(), ["a", "b", "c"]);

    let path = p("../x/y");
    assert_eq!(path.segments().rev().collect::<Vec<_>>(), ["y", "x", ".."]);
    assert_eq!((&path).into_iter().count(), 3);
    assert_eq!(path.first_directory(), Some(".."));
    assert_eq!(UniformPathBuf::new().first_directory(), None);
}

#[test]
fn test_relative_and_absolute() {
    let table: &[(&str, &str, &str)] = &[
        ("", "", "/"),
        ("/", "", "/"),
        ("/a/b", "a/b", "/a/b"),
        ("a/b", "a/b", "/a/b"),
        (".", ".", "/"),
    ];
    for &(path, relative, absolute) in table {
        let path = p(path);
        assert_eq!(path.to_relative(), relative, "relative form of {:?}", path);
        assert_eq!(path.to_relative().to_relative(), relative);
        let anchored = path.to_absolute().unwrap();
        assert_eq!(anchored, absolute, "absolute form of {:?}", path);
        assert_eq!(anchored.to_absolute().unwrap(), anchored);
    }

    assert!(matches!(
        p("../a").to_absolute(),
        Err(PathError::RootParent { .. })
    ));
}

#[test]
fn test_in_directory() {
    let table: &[(&str, &str, bool, bool)] = &[
        ("/a/b/c", "/a/b", false, true),
        ("/a/bc", "/a/b", false, false),
        ("/a/b/", "/a", false, true),
        ("/a/b", "/a/", false, true),
        ("/a/b/", "/a/", false, true),
        ("/a/b/c", "/a", true, true),
        ("/a/b/c", "/a", false, false),
        ("a/b", "a", false, true),
        ("/a/b/", "/a/b/", false, true),
        ("/a/b/", "/a/b/", true, true),
        ("/a/b", "/a/b", false, true),
        ("/a/b", "/a/b", true, true),
        ("/a", "/", false, true),
        ("/a/b", "/", false, false),
        ("/a/b", "/", true, true),
        ("/", "/", false, true),
        ("/a", "/a/b", true, false),
        ("a", "", false, true),
        ("a/b", ".", true, true),
        ("../a", "", true, false),
        ("../a", "..", false, true),
        ("../..", "..", false, false),
        ("../..", "..", true, false),
        ("../../a", "..", true, false),
        ("../../a", "", true, false),
        ("..", ".", false, false),
        ("../a/b", "../a", false, true),
    ];
    for &(path, directory, recursive, expected) in table {
        let actual = p(path).in_directory(p(directory), recursive).unwrap();
        assert_eq!(
            actual, expected,
            "{:?} in {:?} (recursive: {})",
            path, directory, recursive
        );
    }
}

#[test]
fn test_in_directory_mixed_absoluteness() {
    match p("/a/b").in_directory(p("a"), true) {
        Err(PathError::MixedAbsoluteness { path, directory }) => {
            assert_eq!(path, "/a/b");
            assert_eq!(directory, "a");
        }
        other => panic!("expected mixed absoluteness, got {:?}", other),
    }
    assert!(p("a").in_directory(UniformPath::root(), false).is_err());

    let io = PathError::RootParent {
        path: "/..".to_owned(),
    }
    .into_io_error();
    assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);
}
