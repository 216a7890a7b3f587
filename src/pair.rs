//! Helpers for working with paired-end FASTQ files: checking that two
//! records are mates, and advancing two raw buffers in lock-step on
//! complete-record boundaries.

use memchr::memchr;

use crate::error::Error;
use crate::util::{encode_latin1, shorten};

/// Checks whether two record names belong to mates of a read pair.
///
/// The names are compared up to the first space or tab. If both ids end
/// with '1', '2' or '3' (the common paired-end suffix after `/` or `.`),
/// that final digit is ignored.
///
/// ```
/// use fqio::pair::record_names_match;
///
/// assert!(record_names_match(b"read/1 comment", b"read/2 other"));
/// assert!(!record_names_match(b"readA", b"readB"));
/// ```
pub fn record_names_match(name1: &[u8], name2: &[u8]) -> bool {
    let id2_end = name2
        .iter()
        .position(|&b| b == b' ' || b == b'\t')
        .unwrap_or_else(|| name2.len());
    if name1.len() < id2_end {
        return false;
    }
    // id1 must end where id2 ends, otherwise the ids differ in length
    match name1.get(id2_end) {
        None | Some(&b' ') | Some(&b'\t') => {}
        Some(_) => return false,
    }
    let mut id_end = id2_end;
    if id_end > 0 {
        let tail1 = name1[id_end - 1];
        let tail2 = name2[id_end - 1];
        if (b'1'..=b'3').contains(&tail1) && (b'1'..=b'3').contains(&tail2) {
            id_end -= 1;
        }
    }
    name1[..id_end] == name2[..id_end]
}

/// Like [`record_names_match`](record_names_match), but for text names.
/// Names must consist of chars at most U+00FF (so that they have a
/// single-byte encoding); other input fails with
/// [`Error::Encode`](crate::Error::Encode).
pub fn record_names_match_str(name1: &str, name2: &str) -> Result<bool, Error> {
    let bytes1 = encode_latin1(name1).ok_or_else(|| Error::Encode {
        field: "name",
        id: shorten(name1, 100),
    })?;
    let bytes2 = encode_latin1(name2).ok_or_else(|| Error::Encode {
        field: "name",
        id: shorten(name2, 100),
    })?;
    Ok(record_names_match(&bytes1, &bytes2))
}

/// Given two buffers of raw FASTQ data, returns the length of the largest
/// prefix of each that contains the same number of complete four-line
/// records.
///
/// This allows keeping two paired FASTQ streams synchronized on record
/// boundaries when processing them chunk by chunk: the returned prefixes
/// hold the same number of records, and both remaining tails begin at a
/// record boundary.
pub fn paired_heads(buf1: &[u8], buf2: &[u8]) -> (usize, usize) {
    let mut pos1 = 0;
    let mut pos2 = 0;
    let mut cut1 = 0;
    let mut cut2 = 0;
    let mut newlines = 0;
    loop {
        match memchr(b'\n', &buf1[pos1..]) {
            Some(n) => pos1 += n + 1,
            None => break,
        }
        match memchr(b'\n', &buf2[pos2..]) {
            Some(n) => pos2 += n + 1,
            None => break,
        }
        newlines += 1;
        if newlines == 4 {
            newlines = 0;
            cut1 = pos1;
            cut2 = pos2;
        }
    }
    (cut1, cut2)
}
