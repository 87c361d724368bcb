// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The filesystem contract that uniform paths are exchanged across.
//!
//! [`FileSystem`] is implemented by backends (a physical directory, an in-memory tree, an archive,
//! ...). Backends only implement the primitive operations; the whole-file helpers and the
//! cross-filesystem copy and move are provided on top of them.
//!
//! None of the backends live in this crate.

use crate::{PathError, UniformPath, UniformPathBuf};
use std::{
    fmt,
    io::{self, BufRead, BufReader, Read, Seek, Write},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
    time::SystemTime,
};

/// Result type of filesystem operations.
pub type FsResult<T> = Result<T, FsError>;

/// An error raised by a [`FileSystem`] operation.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// A path could not be built.
    #[error(transparent)]
    Path(#[from] PathError),

    /// An operation that requires an absolute path was given a relative one.
    #[error("{what} must be an absolute path: {path}")]
    NotAbsolute {
        /// Which argument was relative.
        what: &'static str,
        /// The offending path.
        path: UniformPathBuf,
    },

    /// A file or directory that must exist does not.
    #[error("{what} must exist: {path}")]
    NotFound {
        /// What was looked for.
        what: &'static str,
        /// The missing path.
        path: UniformPathBuf,
    },

    /// A search pattern could not be compiled.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The destination exists and overwriting it was not allowed.
    #[error("the destination file path already exists and overwrite is false: {path}")]
    AlreadyExists {
        /// The existing destination.
        path: UniformPathBuf,
    },

    /// The backend failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// Converts self into a [`std::io::Error`] of the matching kind.
    pub fn into_io_error(self) -> io::Error {
        let kind = match self {
            FsError::Io(err) => return err,
            FsError::Path(_) | FsError::Pattern(_) | FsError::NotAbsolute { .. } => {
                io::ErrorKind::InvalidInput
            }
            FsError::NotFound { .. } => io::ErrorKind::NotFound,
            FsError::AlreadyExists { .. } => io::ErrorKind::AlreadyExists,
        };
        io::Error::new(kind, self)
    }
}

/// How [`FileSystem::open_file`] treats an existing or missing file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FileMode {
    /// Create a new file; fail if it already exists.
    CreateNew,
    /// Create a new file, overwriting an existing one.
    Create,
    /// Open an existing file; fail if it is missing.
    Open,
    /// Open the file if it exists, create it otherwise.
    OpenOrCreate,
    /// Open an existing file and truncate it to zero bytes.
    Truncate,
    /// Open or create the file and position the stream at its end.
    Append,
}

impl FileMode {
    /// Returns `true` if opening a file in this mode with `access` is meaningful.
    ///
    /// Every mode that creates, truncates or appends needs write access.
    ///
    /// # Examples
    ///
    /// ```
    /// use upath::fs::{FileAccess, FileMode};
    ///
    /// assert!(FileMode::Open.supports(FileAccess::READ));
    /// assert!(FileMode::Append.supports(FileAccess::WRITE));
    /// assert!(!FileMode::Append.supports(FileAccess::READ));
    /// ```
    #[must_use]
    pub fn supports(self, access: FileAccess) -> bool {
        match self {
            FileMode::CreateNew | FileMode::Create | FileMode::Truncate | FileMode::Append => {
                access.contains(FileAccess::WRITE)
            }
            FileMode::Open | FileMode::OpenOrCreate => !access.is_empty(),
        }
    }
}

/// Read and write access requested from [`FileSystem::open_file`], as a bitmask.
///
/// # Examples
///
/// ```
/// use upath::fs::FileAccess;
///
/// let access = FileAccess::READ | FileAccess::WRITE;
/// assert_eq!(access, FileAccess::READ_WRITE);
/// assert_eq!(access.bits(), 0x11);
/// assert!(access.contains(FileAccess::WRITE));
/// assert_eq!(access & FileAccess::READ, FileAccess::READ);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FileAccess(u8);

impl FileAccess {
    /// Read access.
    pub const READ: FileAccess = FileAccess(0x01);
    /// Write access.
    pub const WRITE: FileAccess = FileAccess(0x10);
    /// Read and write access.
    pub const READ_WRITE: FileAccess = FileAccess(0x01 | 0x10);

    /// The raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: FileAccess) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FileAccess::READ => f.write_str("READ"),
            FileAccess::WRITE => f.write_str("WRITE"),
            FileAccess::READ_WRITE => f.write_str("READ_WRITE"),
            FileAccess(bits) => write!(f, "FileAccess({:#04x})", bits),
        }
    }
}

impl BitOr for FileAccess {
    type Output = FileAccess;

    fn bitor(self, rhs: FileAccess) -> FileAccess {
        FileAccess(self.0 | rhs.0)
    }
}

impl BitOrAssign for FileAccess {
    fn bitor_assign(&mut self, rhs: FileAccess) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FileAccess {
    type Output = FileAccess;

    fn bitand(self, rhs: FileAccess) -> FileAccess {
        FileAccess(self.0 & rhs.0)
    }
}

impl BitAndAssign for FileAccess {
    fn bitand_assign(&mut self, rhs: FileAccess) {
        self.0 &= rhs.0;
    }
}

/// Whether enumeration descends into subdirectories.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SearchOption {
    /// Only the entries directly inside the directory.
    #[default]
    TopDirectoryOnly,
    /// The whole tree below the directory.
    AllDirectories,
}

/// The kind of entries enumeration yields.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SearchTarget {
    /// Files and directories.
    #[default]
    Both,
    /// Files only.
    File,
    /// Directories only.
    Directory,
}

/// A wildcard pattern matched against entry names during enumeration.
///
/// `*` matches any run of characters (including none), `?` matches exactly one character, and
/// `[...]` matches a character class; see [`glob::Pattern`]. The empty pattern matches every name,
/// like `*`.
///
/// # Examples
///
/// ```
/// use upath::fs::SearchPattern;
///
/// let pattern = SearchPattern::new("*.t?t")?;
/// assert!(pattern.matches("notes.txt"));
/// assert!(!pattern.matches("notes.md"));
/// assert!(SearchPattern::new("")?.matches("anything"));
/// assert!(SearchPattern::new("[a-").is_err());
/// # Ok::<(), upath::fs::FsError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchPattern {
    // None matches everything
    pattern: Option<glob::Pattern>,
}

impl SearchPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Pattern`] if `pattern` is not a valid wildcard pattern.
    pub fn new(pattern: &str) -> FsResult<SearchPattern> {
        let pattern = match pattern {
            "" => None,
            pattern => Some(glob::Pattern::new(pattern)?),
        };
        Ok(SearchPattern { pattern })
    }

    /// Returns `true` if `name` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern
            .as_ref()
            .map_or(true, |pattern| pattern.matches_with(name, options))
    }
}

/// An open file, as returned by [`FileSystem::open_file`].
pub trait FileStream: Read + Write + Seek {}

impl<T: Read + Write + Seek> FileStream for T {}

/// A change notification handle on a directory of a [`FileSystem`].
pub trait FileSystemWatcher {
    /// The directory being watched.
    fn path(&self) -> &UniformPath;

    /// Whether changes below subdirectories are reported.
    fn include_subdirectories(&self) -> bool;

    /// Sets whether changes below subdirectories are reported.
    fn set_include_subdirectories(&mut self, value: bool);
}

/// A filesystem addressed with uniform paths.
///
/// Implementors provide the primitive operations; the whole-file helpers (`read_all_*`,
/// `write_all_*`, ...) and [`copy_file_cross`](FileSystem::copy_file_cross) /
/// [`move_file_cross`](FileSystem::move_file_cross) are built on top of them.
///
/// All methods take `&self`; backends that mutate shared state use interior mutability.
pub trait FileSystem {
    /// Creates `path` and any missing parent directories.
    fn create_directory(&self, path: &UniformPath) -> FsResult<()>;

    /// Returns `true` if `path` is an existing directory.
    fn directory_exists(&self, path: &UniformPath) -> bool;

    /// Moves the directory `src` to `dest`.
    fn move_directory(&self, src: &UniformPath, dest: &UniformPath) -> FsResult<()>;

    /// Deletes the directory `path`, and its content if `recursive` is set.
    fn delete_directory(&self, path: &UniformPath, recursive: bool) -> FsResult<()>;

    /// Copies the file `src` to `dest`, replacing `dest` only if `overwrite` is set.
    fn copy_file(&self, src: &UniformPath, dest: &UniformPath, overwrite: bool) -> FsResult<()>;

    /// Replaces the content of `dest` with `src`, deleting `src`, and optionally keeping the
    /// previous `dest` as `backup`.
    fn replace_file(
        &self,
        src: &UniformPath,
        dest: &UniformPath,
        backup: Option<&UniformPath>,
        ignore_metadata_errors: bool,
    ) -> FsResult<()>;

    /// Returns the size of the file `path`, in bytes.
    fn file_length(&self, path: &UniformPath) -> FsResult<u64>;

    /// Returns `true` if `path` is an existing file.
    fn file_exists(&self, path: &UniformPath) -> bool;

    /// Moves the file `src` to `dest`.
    fn move_file(&self, src: &UniformPath, dest: &UniformPath) -> FsResult<()>;

    /// Deletes the file `path`.
    fn delete_file(&self, path: &UniformPath) -> FsResult<()>;

    /// Opens the file `path`.
    fn open_file(
        &self,
        path: &UniformPath,
        mode: FileMode,
        access: FileAccess,
    ) -> FsResult<Box<dyn FileStream>>;

    /// Returns the creation time of `path`.
    fn creation_time(&self, path: &UniformPath) -> FsResult<SystemTime>;

    /// Sets the creation time of `path`.
    fn set_creation_time(&self, path: &UniformPath, time: SystemTime) -> FsResult<()>;

    /// Returns the last access time of `path`.
    fn last_access_time(&self, path: &UniformPath) -> FsResult<SystemTime>;

    /// Sets the last access time of `path`.
    fn set_last_access_time(&self, path: &UniformPath, time: SystemTime) -> FsResult<()>;

    /// Returns the last write time of `path`.
    fn last_write_time(&self, path: &UniformPath) -> FsResult<SystemTime>;

    /// Sets the last write time of `path`.
    fn set_last_write_time(&self, path: &UniformPath, time: SystemTime) -> FsResult<()>;

    /// Enumerates the entries below `path` whose name matches `search_pattern` (see
    /// [`SearchPattern`]).
    fn enumerate_paths<'a>(
        &'a self,
        path: &UniformPath,
        search_pattern: &str,
        option: SearchOption,
        target: SearchTarget,
    ) -> FsResult<Box<dyn Iterator<Item = UniformPathBuf> + 'a>>;

    /// Returns `true` if [`watch`](FileSystem::watch) is supported for `path`.
    fn can_watch(&self, path: &UniformPath) -> bool;

    /// Starts watching `path` for changes.
    fn watch(&self, path: &UniformPath) -> FsResult<Box<dyn FileSystemWatcher>>;

    /// Converts a uniform path to the backend's own path representation.
    fn convert_path_to_internal(&self, path: &UniformPath) -> String;

    /// Converts a path in the backend's own representation to a uniform path.
    fn convert_path_from_internal(&self, system_path: &str) -> FsResult<UniformPathBuf>;

    /// Returns `true` if `other` is this very filesystem.
    ///
    /// The default compares the addresses and sizes of both objects. Zero-sized backends are never
    /// considered the same, since any two of them may share an address. Backends that wrap another
    /// filesystem, or that are handles onto shared state, should override this.
    fn is_same_filesystem(&self, other: &dyn FileSystem) -> bool {
        let size = std::mem::size_of_val(self);
        size != 0
            && size == std::mem::size_of_val(other)
            && std::ptr::addr_eq(self as *const Self, other as *const dyn FileSystem)
    }

    /// Enumerates the files below `path` whose name matches `search_pattern`.
    fn enumerate_files<'a>(
        &'a self,
        path: &UniformPath,
        search_pattern: &str,
        option: SearchOption,
    ) -> FsResult<Box<dyn Iterator<Item = UniformPathBuf> + 'a>> {
        self.enumerate_paths(path, search_pattern, option, SearchTarget::File)
    }

    /// Enumerates the directories below `path` whose name matches `search_pattern`.
    fn enumerate_directories<'a>(
        &'a self,
        path: &UniformPath,
        search_pattern: &str,
        option: SearchOption,
    ) -> FsResult<Box<dyn Iterator<Item = UniformPathBuf> + 'a>> {
        self.enumerate_paths(path, search_pattern, option, SearchTarget::Directory)
    }

    /// Creates a new file, failing if it already exists, and opens it for writing.
    fn create_file(&self, path: &UniformPath) -> FsResult<Box<dyn FileStream>> {
        self.open_file(path, FileMode::CreateNew, FileAccess::WRITE)
    }

    /// Reads the whole file `path`.
    fn read_all_bytes(&self, path: &UniformPath) -> FsResult<Vec<u8>> {
        let mut stream = self.open_file(path, FileMode::Open, FileAccess::READ)?;
        let mut content = Vec::new();
        stream.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Reads the whole file `path` as UTF-8 text.
    fn read_all_text(&self, path: &UniformPath) -> FsResult<String> {
        let mut stream = self.open_file(path, FileMode::Open, FileAccess::READ)?;
        let mut content = String::new();
        stream.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Reads the lines of the file `path`, without their terminators.
    ///
    /// A final line without a terminator is included.
    fn read_all_lines(&self, path: &UniformPath) -> FsResult<Vec<String>> {
        let stream = self.open_file(path, FileMode::Open, FileAccess::READ)?;
        BufReader::new(stream)
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .map_err(FsError::from)
    }

    /// Creates or overwrites the file `path` with `content`.
    fn write_all_bytes(&self, path: &UniformPath, content: &[u8]) -> FsResult<()> {
        let mut stream = self.open_file(path, FileMode::Create, FileAccess::WRITE)?;
        stream.write_all(content)?;
        stream.flush()?;
        Ok(())
    }

    /// Creates or overwrites the file `path` with `content`.
    fn write_all_text(&self, path: &UniformPath, content: &str) -> FsResult<()> {
        self.write_all_bytes(path, content.as_bytes())
    }

    /// Appends `content` to the file `path`, creating it if needed.
    fn append_all_text(&self, path: &UniformPath, content: &str) -> FsResult<()> {
        let mut stream = self.open_file(path, FileMode::Append, FileAccess::WRITE)?;
        stream.write_all(content.as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    /// Copies the file `src` of this filesystem to `dest` on `dest_fs`.
    ///
    /// When `dest_fs` is this very filesystem (see
    /// [`is_same_filesystem`](FileSystem::is_same_filesystem)) the call is forwarded to
    /// [`copy_file`](FileSystem::copy_file). Otherwise both paths must be absolute, `src` must
    /// exist, the directory of `dest` must exist on `dest_fs`, and an existing `dest` is only
    /// replaced if `overwrite` is set. The last write time of `src` is carried over.
    fn copy_file_cross(
        &self,
        dest_fs: &dyn FileSystem,
        src: &UniformPath,
        dest: &UniformPath,
        overwrite: bool,
    ) -> FsResult<()> {
        if self.is_same_filesystem(dest_fs) {
            return self.copy_file(src, dest, overwrite);
        }

        check_cross_transfer(self, dest_fs, src, dest, overwrite)?;
        log::debug!("copying {} to {} on another filesystem", src, dest);

        transfer_content(self, dest_fs, src, dest)?;
        dest_fs.set_last_write_time(dest, self.last_write_time(src)?)?;
        Ok(())
    }

    /// Moves the file `src` of this filesystem to `dest` on `dest_fs`.
    ///
    /// Same preconditions as [`copy_file_cross`](FileSystem::copy_file_cross), except that an
    /// existing `dest` is always an error. All three timestamps are carried over, then `src` is
    /// deleted.
    fn move_file_cross(
        &self,
        dest_fs: &dyn FileSystem,
        src: &UniformPath,
        dest: &UniformPath,
    ) -> FsResult<()> {
        if self.is_same_filesystem(dest_fs) {
            return self.move_file(src, dest);
        }

        check_cross_transfer(self, dest_fs, src, dest, false)?;
        log::debug!("moving {} to {} on another filesystem", src, dest);

        transfer_content(self, dest_fs, src, dest)?;
        dest_fs.set_creation_time(dest, self.creation_time(src)?)?;
        dest_fs.set_last_access_time(dest, self.last_access_time(src)?)?;
        dest_fs.set_last_write_time(dest, self.last_write_time(src)?)?;
        self.delete_file(src)?;
        Ok(())
    }
}

fn check_cross_transfer<S: FileSystem + ?Sized>(
    src_fs: &S,
    dest_fs: &dyn FileSystem,
    src: &UniformPath,
    dest: &UniformPath,
    overwrite: bool,
) -> FsResult<()> {
    if !src.is_absolute() {
        return Err(FsError::NotAbsolute {
            what: "src",
            path: src.to_path_buf(),
        });
    }
    if !src_fs.file_exists(src) {
        return Err(FsError::NotFound {
            what: "src file",
            path: src.to_path_buf(),
        });
    }
    if !dest.is_absolute() {
        return Err(FsError::NotAbsolute {
            what: "dest",
            path: dest.to_path_buf(),
        });
    }

    let dest_directory = dest.directory();
    if !dest_fs.directory_exists(dest_directory) {
        return Err(FsError::NotFound {
            what: "dest directory",
            path: dest_directory.to_path_buf(),
        });
    }
    if !overwrite && dest_fs.file_exists(dest) {
        return Err(FsError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }
    Ok(())
}

fn transfer_content<S: FileSystem + ?Sized>(
    src_fs: &S,
    dest_fs: &dyn FileSystem,
    src: &UniformPath,
    dest: &UniformPath,
) -> FsResult<()> {
    let mut reader = src_fs.open_file(src, FileMode::Open, FileAccess::READ)?;
    let mut writer = dest_fs.open_file(dest, FileMode::Create, FileAccess::WRITE)?;
    let copied = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    log::trace!("transferred {} bytes from {} to {}", copied, src, dest);
    Ok(())
}
