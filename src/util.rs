//! Misc utility stuff : errors, input and output files, line collection

use flate2::read::MultiGzDecoder;
use fs_err as fs;
use std::error;
use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Shorthand for returning an error Result
#[macro_export]
macro_rules! err {
    ($e:literal) => {Err($crate::util::Error::Error($e.to_string()))};
    ($e:expr) => {Err($crate::util::Error::Error($e))};
    ($($e:expr),+) => {Err($crate::util::Error::Error(format!($($e),+)))}
}
pub use err;
// Shorthand for implementing a pass-through error
macro_rules! err_type {
    ($x:path, $i:path) => {
        impl From<$x> for Error {
            fn from(kind: $x) -> Error {
                $i(kind)
            }
        }
    };
}

/// Various errors
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Custom urlsort error
    Error(String),
    /// pass through io::Error
    IoError(std::io::Error),
    /// be an error, but don't report anything
    Silent,
}
/// Result type for urlsort
pub type Result<T> = core::result::Result<T, Error>;
impl error::Error for Error {}

impl Error {
    /// return true if this error should be treated as not an error
    pub fn suppress(&self) -> bool {
        match self {
            Error::IoError(err) => err.kind() == io::ErrorKind::BrokenPipe,
            _ => false,
        }
    }
    /// return true if this error should be treated as an error, but silently
    pub const fn silent(&self) -> bool {
        matches!(self, Error::Silent)
    }
}

err_type!(std::io::Error, Error::IoError);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Error(s) => write!(f, "{}", s)?,
            Error::IoError(s) => write!(f, "IoError : {}", s)?,
            Error::Silent => write!(f, "Silent")?,
        }
        Ok(())
    }
}

/// Input file. Wrapped in a type so I can 'impl Debug'
pub struct Infile(
    /// The file being read
    pub io::BufReader<Box<dyn Read>>,
);

impl Infile {
    /// create a new input file
    pub fn new(f: io::BufReader<Box<dyn Read>>) -> Self {
        Self(f)
    }
}

impl Default for Infile {
    fn default() -> Self {
        Self::new(io::BufReader::new(Box::new(io::empty())))
    }
}

impl fmt::Debug for Infile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Infile")
    }
}

impl Deref for Infile {
    type Target = io::BufReader<Box<dyn Read>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Infile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// output file type
pub type Outfile = io::BufWriter<Box<dyn Write>>;

/// Make an Outfile from a file name. "-" is standard output.
/// Named files are created, or truncated if they already exist.
pub fn get_writer<P: AsRef<Path>>(name: P) -> Result<Outfile> {
    let name = name.as_ref();
    let inner: Box<dyn Write> = {
        if name.as_os_str() == "-" {
            Box::new(io::stdout())
        } else {
            Box::new(fs::File::create(name)?)
        }
    };
    Ok(io::BufWriter::new(inner))
}

/// Make an Infile from a file name. "-" is standard input.
/// gzipped input is decompressed on the fly.
pub fn get_reader(name: &str) -> Result<Infile> {
    let inner: Box<dyn Read> = {
        if name == "-" {
            Box::new(io::stdin())
        } else {
            Box::new(fs::File::open(name)?)
        }
    };
    let mut outer = io::BufReader::new(inner);
    let start = outer.fill_buf()?;
    if start.starts_with(&[0x1fu8, 0x8bu8, 0x08u8]) {
        outer = io::BufReader::new(Box::new(MultiGzDecoder::new(outer)));
    }
    Ok(Infile::new(outer))
}

/// Read one line, without its trailing newline, into `line`.
/// Return true at end of file.
pub fn read_line<T: BufRead>(f: &mut T, line: &mut Vec<u8>) -> Result<bool> {
    line.clear();
    let sz = f.read_until(b'\n', line)?;
    if sz == 0 {
        return Ok(true);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(false)
}

/// Append every line of `f` to `lines`, returning the number of lines read
pub fn read_lines<T: BufRead>(f: &mut T, lines: &mut Vec<Vec<u8>>) -> Result<usize> {
    let mut count = 0;
    let mut line = Vec::new();
    while !read_line(f, &mut line)? {
        lines.push(std::mem::take(&mut line));
        count += 1;
    }
    Ok(count)
}

/// Read all the lines of all the named sources, in order.
/// "-" reads standard input at that position.
/// A source that can't be opened or read fails the whole collection.
pub fn collect_lines(files: &[String]) -> Result<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    for name in files {
        let mut f = match get_reader(name) {
            Ok(f) => f,
            Err(e) => return err!("Error reading {} : {}", name, e),
        };
        match read_lines(&mut *f, &mut lines) {
            Ok(n) => tracing::info!(source = %name, lines = n, "read input"),
            Err(e) => return err!("Error reading {} : {}", name, e),
        }
    }
    Ok(lines)
}

/// write a line followed by a newline
pub fn write_line(w: &mut impl Write, line: &[u8]) -> Result<()> {
    w.write_all(line)?;
    w.write_all(b"\n")?;
    Ok(())
}

/// print a bunch of u8 to stderr, adding a newline
pub fn prerr(data: &[&[u8]]) -> Result<()> {
    let mut e = io::stderr().lock();
    for x in data {
        e.write_all(x)?;
    }
    e.write_all(b"\n")?;
    Ok(())
}

/// lossy conversion of bytes to a String
pub fn u2s(v: &[u8]) -> String {
    String::from_utf8_lossy(v).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines() {
        let mut data: &[u8] = b"one\ntwo\r\n\nthree";
        let mut v = Vec::new();
        assert_eq!(read_lines(&mut data, &mut v).unwrap(), 4);
        assert_eq!(v[0], b"one");
        assert_eq!(v[1], b"two\r");
        assert_eq!(v[2], b"");
        assert_eq!(v[3], b"three");
    }

    #[test]
    fn empty_input() {
        let mut data: &[u8] = b"";
        let mut v = Vec::new();
        assert_eq!(read_lines(&mut data, &mut v).unwrap(), 0);
        assert!(v.is_empty());
        let mut data: &[u8] = b"\n";
        assert_eq!(read_lines(&mut data, &mut v).unwrap(), 1);
        assert_eq!(v[0], b"");
    }

    #[test]
    fn missing_file() {
        let files = vec!["/no/such/dir/urls.txt".to_string()];
        let e = collect_lines(&files).unwrap_err();
        assert!(e.to_string().contains("/no/such/dir/urls.txt"));
        assert!(!e.suppress());
    }

    #[test]
    fn broken_pipe() {
        let e = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(e.suppress());
        assert!(Error::Silent.silent());
    }
}
