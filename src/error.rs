//! Error type shared by the reader, the record types and the pairing
//! helpers.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Errors which can occur while parsing FASTQ input or serializing
/// records.
///
/// Line numbers are 0-based offsets into the input and point at the
/// offending line; `Display` renders them 1-based.
#[derive(Debug)]
pub enum Error {
    /// Error from the underlying byte source. Also reported (with kind
    /// `InvalidData`) if a source returns more bytes than were requested.
    Io(io::Error),
    /// Invalid start byte encountered (expected '@')
    InvalidStart {
        /// Byte found instead.
        found: u8,
        /// Line of the record header.
        line: u64,
    },
    /// Invalid separator byte encountered (expected '+')
    InvalidSep {
        /// Byte found instead.
        found: u8,
        /// Line of the separator.
        line: u64,
    },
    /// The separator line repeats a name, but it differs from the record
    /// name.
    SeparatorMismatch {
        /// Name from the header line.
        head: String,
        /// Name from the separator line.
        sep_head: String,
        /// Line of the separator.
        line: u64,
    },
    /// Sequence and quality lengths are not equal
    UnequalLengths {
        /// Length of the sequence.
        seq: usize,
        /// Length of the qualities.
        qual: usize,
        /// Shortened record id, if known.
        id: Option<String>,
        /// Line of the quality line for reader errors, `None` when the
        /// mismatch was detected while constructing a record directly.
        line: Option<u64>,
    },
    /// Truncated record at the end of the input
    UnexpectedEnd {
        /// Shortened rendering of the incomplete final record.
        tail: String,
        /// Line at which the input broke off.
        line: u64,
    },
    /// A record field contains characters that cannot be encoded for
    /// FASTQ output (names allow Latin-1, sequence and qualities only
    /// ASCII).
    Encode {
        /// Which field could not be encoded.
        field: &'static str,
        /// Shortened record id.
        id: String,
    },
    /// FASTQ output was requested for a record without qualities
    MissingQualities {
        /// Shortened record id.
        id: String,
    },
    /// Buffer size limit reached, which happens if `BufPolicy::grow_limited()`
    /// returned `None` (not the case with the default policy).
    BufferLimit,
}

impl Error {
    /// Returns the 0-based line number associated with this error, if any.
    pub fn line(&self) -> Option<u64> {
        match self {
            Error::InvalidStart { line, .. }
            | Error::InvalidSep { line, .. }
            | Error::SeparatorMismatch { line, .. }
            | Error::UnexpectedEnd { line, .. } => Some(*line),
            Error::UnequalLengths { line, .. } => *line,
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => e.fmt(f),
            Error::InvalidStart { found, line } => write!(
                f,
                "FASTQ parse error: expected '@' at record start but found '{}' (line {})",
                (*found as char).escape_default(),
                line + 1
            ),
            Error::InvalidSep { found, line } => write!(
                f,
                "FASTQ parse error: expected '+' at separator line start but found '{}' (line {})",
                (*found as char).escape_default(),
                line + 1
            ),
            Error::SeparatorMismatch {
                head,
                sep_head,
                line,
            } => write!(
                f,
                "FASTQ parse error: sequence descriptions don't match ('{}' != '{}'); \
                 the second description must be either empty or equal to the first (line {})",
                head,
                sep_head,
                line + 1
            ),
            Error::UnequalLengths {
                seq,
                qual,
                id,
                line,
            } => {
                write!(
                    f,
                    "FASTQ parse error: sequence length is {}, but quality length is {}",
                    seq, qual
                )?;
                if let Some(id) = id {
                    write!(f, " (record '{}')", id)?;
                }
                if let Some(line) = line {
                    write!(f, " (line {})", line + 1)?;
                }
                Ok(())
            }
            Error::UnexpectedEnd { tail, line } => write!(
                f,
                "FASTQ parse error: premature end of input at line {}; \
                 the incomplete final record was: '{}'",
                line + 1,
                tail
            ),
            Error::Encode { field, id } => write!(
                f,
                "FASTQ write error: the {} of record '{}' contains characters \
                 that cannot be encoded",
                field, id
            ),
            Error::MissingQualities { id } => {
                write!(f, "FASTQ write error: record '{}' has no qualities", id)
            }
            Error::BufferLimit => write!(f, "FASTQ parse error: buffer limit reached"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}
