use std::fs::File;
use std::io::{self, BufRead};

pub fn open_file(path: &std::path::Path) -> io::Result<File> {
    std::fs::File::open(path)
}

/// Drop a trailing `\n` and then a trailing `\r`, once.
#[inline]
pub fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

/// Read one physical line into `buf` without its line ending.
/// Returns the number of bytes consumed, terminator included; 0 at EOF.
pub fn read_line<R: BufRead + ?Sized>(rdr: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    buf.clear();
    let n = rdr.read_until(b'\n', buf)?;
    strip_line_ending(buf);
    Ok(n)
}

#[inline]
pub fn trim(line: &[u8]) -> &[u8] {
    line.trim_ascii()
}

/// Header and sequence bytes are almost always ASCII; anything else is
/// replaced rather than rejected.
pub fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
