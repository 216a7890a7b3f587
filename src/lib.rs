//! Streaming FASTQ parsing with growable buffers, owned record types and
//! paired-end utilities.
//!
//! The central type is the [`Reader`](Reader), a pull-based parser over
//! any `io::Read` byte source. Record length is not limited by the buffer
//! size: the buffer grows until the record fits (how it grows can be
//! configured, see the [`policy`](policy) module). Records are produced as
//! owned values, either as text ([`SequenceRecord`](SequenceRecord)), as
//! raw bytes ([`ByteRecord`](ByteRecord)), or as any custom type
//! implementing [`FromFastq`](FromFastq).
//!
//! File opening, decompression and format detection are left to the
//! caller; the reader consumes bytes and yields records.
//!
//! # Example
//!
//! This code prints the name of each record:
//!
//! ```
//! use fqio::{Event, Reader};
//!
//! let fastq = &b"@read1 some description\nACGT\n+\nII#I\n"[..];
//! let mut reader = Reader::new(fastq);
//!
//! while let Some(event) = reader.next() {
//!     match event.expect("parse error") {
//!         Event::Header(two_headers) => assert!(!two_headers),
//!         Event::Record(record) => println!("{}", record.name()),
//!     }
//! }
//! ```
//!
//! The one-shot [`Event::Header`](Event::Header) before the first record
//! reports whether the input repeats record names on the separator lines.
//! Code that only cares about the records can use
//! [`Reader::records`](Reader::records) instead of matching on events.
//!
//! # Paired-end input
//!
//! The [`pair`](pair) module keeps two FASTQ streams aligned:
//! [`record_names_match`](pair::record_names_match) tests whether two
//! records are mates, and [`paired_heads`](pair::paired_heads) advances
//! two raw buffers in lock-step on complete-record boundaries.

mod util;

pub mod error;
pub mod pair;
pub mod policy;
pub mod reader;
pub mod record;
pub mod write;

pub use crate::error::Error;
pub use crate::pair::{paired_heads, record_names_match, record_names_match_str};
pub use crate::policy::{BufPolicy, DoubleUntil, DoubleUntilLimited, StdPolicy};
pub use crate::reader::{Event, Reader, RecordsIntoIter, RecordsIter, BUFSIZE};
pub use crate::record::{ByteRecord, FromFastq, SequenceRecord};
