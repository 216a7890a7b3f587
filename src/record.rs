//! FASTQ record value types.
//!
//! Two flavors are provided: [`SequenceRecord`](SequenceRecord) holds its
//! fields as text, [`ByteRecord`](ByteRecord) as uninterpreted bytes. Both
//! own their data and can be serialized back to FASTQ with a single exact
//! allocation. The [`FromFastq`](FromFastq) trait is the seam through
//! which the reader materializes records; implement it to have
//! [`Reader`](crate::Reader) produce custom types.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pair;
use crate::util::{decode_latin1, latin1_len, push_latin1, shorten};

// Character cap for record ids quoted in error messages
const ID_DISPLAY_LIMIT: usize = 100;

/// Conversion from the raw lines of a parsed FASTQ record into a record
/// value. The slices are the line contents with the line terminators
/// (including a trailing `\r`, if any) already removed.
///
/// The reader validates the record structure and the sequence/quality
/// length equality *before* calling this, so implementations can rely on
/// `seq.len() == qual.len()`.
pub trait FromFastq: Sized {
    fn from_fastq(head: &[u8], seq: &[u8], qual: &[u8]) -> Self;
}

/// A FASTQ record holding its fields as text.
///
/// The strings are 8-bit clean: the reader decodes input bytes as Latin-1,
/// one `char` per byte. Qualities are optional to allow representing
/// FASTA-origin values without per-base qualities; the reader always
/// produces them. If present, the qualities have the same length as the
/// sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    name: String,
    sequence: String,
    qualities: Option<String>,
}

impl SequenceRecord {
    /// Creates a record, validating that qualities (if present) have the
    /// same length as the sequence.
    pub fn new(
        name: String,
        sequence: String,
        qualities: Option<String>,
    ) -> Result<Self, Error> {
        if let Some(qual) = qualities.as_ref() {
            if qual.len() != sequence.len() {
                return Err(Error::UnequalLengths {
                    seq: sequence.len(),
                    qual: qual.len(),
                    id: Some(shorten(&name, ID_DISPLAY_LIMIT)),
                    line: None,
                });
            }
        }
        Ok(SequenceRecord {
            name,
            sequence,
            qualities,
        })
    }

    /// Full name line of the record (without the leading '@').
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[inline]
    pub fn qualities(&self) -> Option<&str> {
        self.qualities.as_deref()
    }

    /// The id part of the name: everything before the first space or tab.
    #[inline]
    pub fn id(&self) -> &str {
        self.name
            .split(|c| c == ' ' || c == '\t')
            .next()
            .unwrap()
    }

    /// Length of the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns a new record with the same name, the given subrange of the
    /// sequence and (if present) the identically sliced qualities.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds, like string slicing does.
    pub fn slice(&self, range: Range<usize>) -> SequenceRecord {
        SequenceRecord {
            name: self.name.clone(),
            sequence: self.sequence[range.clone()].to_string(),
            qualities: self.qualities.as_ref().map(|q| q[range].to_string()),
        }
    }

    /// Whether `other` is the mate of this record in a paired-end pair,
    /// based on the record names (see
    /// [`record_names_match_str`](crate::pair::record_names_match_str)).
    /// Fails if either name contains characters above U+00FF.
    pub fn is_mate(&self, other: &SequenceRecord) -> Result<bool, Error> {
        pair::record_names_match_str(&self.name, &other.name)
    }

    /// Qualities as an ASCII byte string. Fails if the record has no
    /// qualities or they are not ASCII.
    pub fn qualities_bytes(&self) -> Result<Vec<u8>, Error> {
        let qual = self.qualities.as_deref().ok_or_else(|| Error::MissingQualities {
            id: shorten(self.id(), ID_DISPLAY_LIMIT),
        })?;
        if !qual.is_ascii() {
            return Err(Error::Encode {
                field: "qualities",
                id: shorten(self.id(), ID_DISPLAY_LIMIT),
            });
        }
        Ok(qual.as_bytes().to_vec())
    }

    /// Serializes the record to FASTQ:
    /// `@NAME\nSEQ\n+\nQUAL\n`, or `@NAME\nSEQ\n+NAME\nQUAL\n` if
    /// `two_headers` is given.
    ///
    /// The output is allocated once at its exact final size. The name is
    /// encoded as Latin-1; sequence and qualities must be ASCII.
    pub fn fastq_bytes(&self, two_headers: bool) -> Result<Vec<u8>, Error> {
        let qual = self.qualities.as_deref().ok_or_else(|| Error::MissingQualities {
            id: shorten(self.id(), ID_DISPLAY_LIMIT),
        })?;
        let name_len = latin1_len(&self.name).ok_or_else(|| Error::Encode {
            field: "name",
            id: shorten(self.id(), ID_DISPLAY_LIMIT),
        })?;
        if !self.sequence.is_ascii() {
            return Err(Error::Encode {
                field: "sequence",
                id: shorten(self.id(), ID_DISPLAY_LIMIT),
            });
        }
        if !qual.is_ascii() {
            return Err(Error::Encode {
                field: "qualities",
                id: shorten(self.id(), ID_DISPLAY_LIMIT),
            });
        }
        let extra = if two_headers { name_len } else { 0 };
        let mut out =
            Vec::with_capacity(name_len + self.sequence.len() + qual.len() + 6 + extra);
        out.push(b'@');
        push_latin1(&mut out, &self.name);
        out.push(b'\n');
        out.extend_from_slice(self.sequence.as_bytes());
        out.push(b'\n');
        out.push(b'+');
        if two_headers {
            push_latin1(&mut out, &self.name);
        }
        out.push(b'\n');
        out.extend_from_slice(qual.as_bytes());
        out.push(b'\n');
        Ok(out)
    }
}

impl FromFastq for SequenceRecord {
    #[inline]
    fn from_fastq(head: &[u8], seq: &[u8], qual: &[u8]) -> Self {
        SequenceRecord {
            name: decode_latin1(head),
            sequence: decode_latin1(seq),
            qualities: Some(decode_latin1(qual)),
        }
    }
}

/// A FASTQ record holding its fields as raw bytes.
///
/// In contrast to [`SequenceRecord`](SequenceRecord), qualities are always
/// present and no text encoding is implied, so serialization cannot fail.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRecord {
    name: Vec<u8>,
    sequence: Vec<u8>,
    qualities: Vec<u8>,
}

impl ByteRecord {
    /// Creates a record, validating that qualities have the same length as
    /// the sequence.
    pub fn new(name: Vec<u8>, sequence: Vec<u8>, qualities: Vec<u8>) -> Result<Self, Error> {
        if qualities.len() != sequence.len() {
            return Err(Error::UnequalLengths {
                seq: sequence.len(),
                qual: qualities.len(),
                id: Some(shorten(&decode_latin1(&name), ID_DISPLAY_LIMIT)),
                line: None,
            });
        }
        Ok(ByteRecord {
            name,
            sequence,
            qualities,
        })
    }

    /// Full name line of the record (without the leading '@').
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    #[inline]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[inline]
    pub fn qualities(&self) -> &[u8] {
        &self.qualities
    }

    /// The id part of the name: everything before the first space or tab.
    #[inline]
    pub fn id(&self) -> &[u8] {
        self.name
            .split(|&b| b == b' ' || b == b'\t')
            .next()
            .unwrap()
    }

    /// Length of the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns a new record with the same name and the given subrange of
    /// sequence and qualities.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> ByteRecord {
        ByteRecord {
            name: self.name.clone(),
            sequence: self.sequence[range.clone()].to_vec(),
            qualities: self.qualities[range].to_vec(),
        }
    }

    /// Whether `other` is the mate of this record in a paired-end pair,
    /// based on the record names (see
    /// [`record_names_match`](crate::pair::record_names_match)).
    #[inline]
    pub fn is_mate(&self, other: &ByteRecord) -> bool {
        pair::record_names_match(&self.name, &other.name)
    }

    /// Serializes the record to FASTQ:
    /// `@NAME\nSEQ\n+\nQUAL\n`, or `@NAME\nSEQ\n+NAME\nQUAL\n` if
    /// `two_headers` is given. The output is allocated once at its exact
    /// final size.
    pub fn fastq_bytes(&self, two_headers: bool) -> Vec<u8> {
        let extra = if two_headers { self.name.len() } else { 0 };
        let mut out = Vec::with_capacity(
            self.name.len() + self.sequence.len() + self.qualities.len() + 6 + extra,
        );
        out.push(b'@');
        out.extend_from_slice(&self.name);
        out.push(b'\n');
        out.extend_from_slice(&self.sequence);
        out.push(b'\n');
        out.push(b'+');
        if two_headers {
            out.extend_from_slice(&self.name);
        }
        out.push(b'\n');
        out.extend_from_slice(&self.qualities);
        out.push(b'\n');
        out
    }
}

impl FromFastq for ByteRecord {
    #[inline]
    fn from_fastq(head: &[u8], seq: &[u8], qual: &[u8]) -> Self {
        ByteRecord {
            name: head.to_vec(),
            sequence: seq.to_vec(),
            qualities: qual.to_vec(),
        }
    }
}
