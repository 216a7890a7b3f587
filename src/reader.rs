//! Streaming FASTQ parser.
//!
//! The [`Reader`](Reader) pulls bytes from any `io::Read` source into a
//! growable buffer and yields one owned record per complete four-line
//! FASTQ record. The buffer is compacted on record boundaries and grows
//! (according to the configured [`BufPolicy`](crate::policy::BufPolicy))
//! only when a single record does not fit, so committed bytes are never
//! scanned twice.

use std::io;
use std::marker::PhantomData;

use memchr::{memchr, memchr_iter};

use crate::error::Error;
use crate::policy::{BufPolicy, StdPolicy};
use crate::record::{FromFastq, SequenceRecord};
use crate::util::{decode_latin1, shorten, trim_cr};

/// The default initial buffer size for readers.
pub const BUFSIZE: usize = 64 * 1024;

// Character cap for the stranded tail quoted in premature-end errors
const TAIL_DISPLAY_LIMIT: usize = 500;

/// One value produced by [`Reader::next`](Reader::next).
///
/// Before the first record, the reader emits exactly one `Header` event
/// reporting whether the first record repeats its name on the separator
/// line. End of stream is signalled by `next()` returning `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    /// Whether the first record uses the repeated-name form
    /// (`+NAME` instead of a bare `+`).
    Header(bool),
    /// A parsed record.
    Record(T),
}

// Which of the four line terminators of the current record is searched
// next. Ordered so that terminators already found can be compared against.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum SearchPos {
    Head,
    Seq,
    Sep,
    Qual,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum State {
    New,
    // The first record has been located and validated for the Header
    // event, but not yet emitted
    Positioned,
    Parsing,
    Finished,
}

// Buffer offsets of the newline bytes terminating the four lines of the
// current record
#[derive(Debug, Clone, Copy, Default)]
struct RecordEnds {
    head: usize,
    seq: usize,
    sep: usize,
    qual: usize,
}

/// Streaming FASTQ parser over any `io::Read` byte source.
///
/// The record type produced is chosen through the
/// [`FromFastq`](crate::record::FromFastq) parameter `T`
/// ([`SequenceRecord`](crate::SequenceRecord) by default).
///
/// # Example
///
/// ```
/// use fqio::{Event, Reader};
///
/// let fastq = &b"@id1\nACGT\n+\nIIII\n@id2\nTGCA\n+\nIIII\n"[..];
/// let mut reader = Reader::new(fastq);
///
/// while let Some(event) = reader.next() {
///     match event.expect("parse error") {
///         Event::Header(two_headers) => assert!(!two_headers),
///         Event::Record(record) => println!("{}", record.name()),
///     }
/// }
/// assert_eq!(reader.records_read(), 2);
/// ```
pub struct Reader<R, P = StdPolicy, T = SequenceRecord>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    source: R,
    policy: P,
    // `buf.len()` is the capacity; only `buf[..filled]` holds data
    buf: Vec<u8>,
    filled: usize,
    // First byte of the record currently being scanned. Bytes before it
    // have been emitted and are never looked at again.
    start: usize,
    ends: RecordEnds,
    search_pos: SearchPos,
    state: State,
    n_records: u64,
    extra_newline: bool,
    _record: PhantomData<T>,
}

impl<R> Reader<R, StdPolicy, SequenceRecord>
where
    R: io::Read,
{
    /// Creates a new reader with the default initial buffer size of 64 KiB.
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, BUFSIZE)
    }

    /// Creates a new reader with the given initial buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Any capacity of at least one byte
    /// works for arbitrarily large records, since the buffer grows on
    /// demand.
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        assert!(capacity >= 1, "reader buffer capacity must be >= 1");
        Reader {
            source,
            policy: StdPolicy,
            buf: vec![0; capacity],
            filled: 0,
            start: 0,
            ends: RecordEnds::default(),
            search_pos: SearchPos::Head,
            state: State::New,
            n_records: 0,
            extra_newline: false,
            _record: PhantomData,
        }
    }
}

impl<R, P, T> Reader<R, P, T>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    /// Applies a different buffer growth policy
    /// (see the [`policy`](crate::policy) module).
    pub fn set_policy<Q: BufPolicy>(self, policy: Q) -> Reader<R, Q, T> {
        Reader {
            source: self.source,
            policy,
            buf: self.buf,
            filled: self.filled,
            start: self.start,
            ends: self.ends,
            search_pos: self.search_pos,
            state: self.state,
            n_records: self.n_records,
            extra_newline: self.extra_newline,
            _record: PhantomData,
        }
    }

    /// Switches the record type produced by this reader.
    ///
    /// ```
    /// use fqio::{ByteRecord, Reader};
    ///
    /// let fastq = &b"@id1\nACGT\n+\nIIII\n"[..];
    /// let mut reader = Reader::new(fastq).set_record_kind::<ByteRecord>();
    /// let records: Result<Vec<ByteRecord>, _> = reader.records().collect();
    /// assert_eq!(records.unwrap()[0].sequence(), b"ACGT");
    /// ```
    pub fn set_record_kind<U: FromFastq>(self) -> Reader<R, P, U> {
        Reader {
            source: self.source,
            policy: self.policy,
            buf: self.buf,
            filled: self.filled,
            start: self.start,
            ends: self.ends,
            search_pos: self.search_pos,
            state: self.state,
            n_records: self.n_records,
            extra_newline: self.extra_newline,
            _record: PhantomData,
        }
    }

    /// Number of records yielded so far. The initial
    /// [`Event::Header`](Event::Header) is not counted.
    #[inline]
    pub fn records_read(&self) -> u64 {
        self.n_records
    }

    /// Returns the next event: the one-shot [`Event::Header`](Event::Header)
    /// on the first call, then one [`Event::Record`](Event::Record) per
    /// record, and `None` at the end of the input.
    ///
    /// Errors are terminal: after `Some(Err(_))`, all further calls return
    /// `None`.
    pub fn next(&mut self) -> Option<Result<Event<T>, Error>> {
        match self.state {
            State::Finished => return None,
            State::New => {
                return match self.next_complete() {
                    Ok(true) => {
                        self.state = State::Positioned;
                        Some(Ok(Event::Header(!self.sep_head().is_empty())))
                    }
                    Ok(false) => {
                        self.state = State::Finished;
                        None
                    }
                    Err(e) => {
                        self.state = State::Finished;
                        Some(Err(e))
                    }
                };
            }
            State::Positioned => {
                // the record announced by the Header event is still pending
                self.state = State::Parsing;
            }
            State::Parsing => match self.next_complete() {
                Ok(true) => {}
                Ok(false) => {
                    self.state = State::Finished;
                    return None;
                }
                Err(e) => {
                    self.state = State::Finished;
                    return Some(Err(e));
                }
            },
        }
        let record = T::from_fastq(self.head(), self.seq(), self.qual());
        self.start = self.ends.qual + 1;
        self.search_pos = SearchPos::Head;
        self.n_records += 1;
        Some(Ok(Event::Record(record)))
    }

    /// Returns a borrowed iterator over all records, skipping the header
    /// event.
    ///
    /// # Example
    ///
    /// ```
    /// use fqio::{Reader, SequenceRecord};
    ///
    /// let fastq = &b"@id1\nACGT\n+\nIIII\n@id2\nTGCA\n+\nIIII\n"[..];
    /// let mut reader = Reader::new(fastq);
    ///
    /// let records: Result<Vec<_>, _> = reader.records().collect();
    /// assert_eq!(
    ///     records.unwrap(),
    ///     vec![
    ///         SequenceRecord::new("id1".into(), "ACGT".into(), Some("IIII".into())).unwrap(),
    ///         SequenceRecord::new("id2".into(), "TGCA".into(), Some("IIII".into())).unwrap(),
    ///     ]
    /// );
    /// ```
    pub fn records(&mut self) -> RecordsIter<R, P, T> {
        RecordsIter { rdr: self }
    }

    /// Like [`records`](Reader::records), but takes ownership of the
    /// reader.
    pub fn into_records(self) -> RecordsIntoIter<R, P, T> {
        RecordsIntoIter { rdr: self }
    }

    // Scans for a complete record starting at `self.start`, refilling the
    // buffer as needed. Returns false at a clean end of input.
    fn next_complete(&mut self) -> Result<bool, Error> {
        loop {
            if self.find() {
                self.validate()?;
                return Ok(true);
            }
            if !self.refill()? {
                return Ok(false);
            }
        }
    }

    // Locates the four line terminators of the current record, resuming
    // at `search_pos` so that terminators found before an earlier refill
    // are not searched again. Returns false if the record is incomplete.
    fn find(&mut self) -> bool {
        if self.search_pos == SearchPos::Head {
            match self.find_line(self.start) {
                Some(pos) => {
                    self.ends.head = pos;
                    self.search_pos = SearchPos::Seq;
                }
                None => return false,
            }
        }
        if self.search_pos == SearchPos::Seq {
            match self.find_line(self.ends.head + 1) {
                Some(pos) => {
                    self.ends.seq = pos;
                    self.search_pos = SearchPos::Sep;
                }
                None => return false,
            }
        }
        if self.search_pos == SearchPos::Sep {
            match self.find_line(self.ends.seq + 1) {
                Some(pos) => {
                    self.ends.sep = pos;
                    self.search_pos = SearchPos::Qual;
                }
                None => return false,
            }
        }
        match self.find_line(self.ends.sep + 1) {
            Some(pos) => {
                self.ends.qual = pos;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn find_line(&self, from: usize) -> Option<usize> {
        memchr(b'\n', &self.buf[from..self.filled]).map(|pos| from + pos)
    }

    // Structural checks on a located record. Line numbers are 0-based.
    fn validate(&self) -> Result<(), Error> {
        let start_byte = self.buf[self.start];
        if start_byte != b'@' {
            return Err(Error::InvalidStart {
                found: start_byte,
                line: self.n_records * 4,
            });
        }
        let sep_byte = self.buf[self.ends.seq + 1];
        if sep_byte != b'+' {
            return Err(Error::InvalidSep {
                found: sep_byte,
                line: self.n_records * 4 + 2,
            });
        }
        let sep_head = self.sep_head();
        if !sep_head.is_empty() && sep_head != self.head() {
            return Err(Error::SeparatorMismatch {
                head: decode_latin1(self.head()),
                sep_head: decode_latin1(sep_head),
                line: self.n_records * 4 + 2,
            });
        }
        let seq_len = self.seq().len();
        let qual_len = self.qual().len();
        if seq_len != qual_len {
            // A short quality line whose terminator is only the synthetic
            // newline means the input broke off mid-record.
            if self.extra_newline && self.ends.qual + 1 == self.filled && qual_len < seq_len {
                return Err(self.premature_end());
            }
            return Err(Error::UnequalLengths {
                seq: seq_len,
                qual: qual_len,
                id: Some(decode_latin1(self.record_id())),
                line: Some(self.n_records * 4 + 3),
            });
        }
        Ok(())
    }

    #[inline]
    fn head(&self) -> &[u8] {
        trim_cr(&self.buf[self.start + 1..self.ends.head])
    }

    #[inline]
    fn seq(&self) -> &[u8] {
        trim_cr(&self.buf[self.ends.head + 1..self.ends.seq])
    }

    // Contents of the separator line after the '+'
    #[inline]
    fn sep_head(&self) -> &[u8] {
        trim_cr(&self.buf[self.ends.seq + 2..self.ends.sep])
    }

    #[inline]
    fn qual(&self) -> &[u8] {
        trim_cr(&self.buf[self.ends.sep + 1..self.ends.qual])
    }

    #[inline]
    fn record_id(&self) -> &[u8] {
        self.head()
            .split(|&b| b == b' ' || b == b'\t')
            .next()
            .unwrap()
    }

    // Makes room for more input and reads from the source. Returns false
    // at a clean end of input (nothing pending), true if the scan should
    // be retried. A truncated final record is an error.
    fn refill(&mut self) -> Result<bool, Error> {
        if self.start > 0 {
            self.make_room();
        } else if self.filled == self.buf.len() {
            // a single record fills the whole buffer
            self.grow()?;
        }
        let n = loop {
            match self.source.read(&mut self.buf[self.filled..]) {
                Ok(n) => break n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        };
        if n > self.buf.len() - self.filled {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "byte source returned more bytes than requested",
            )));
        }
        if n > 0 {
            self.filled += n;
            return Ok(true);
        }
        // end of input
        if self.filled == 0 {
            return Ok(false);
        }
        if self.buf[self.filled - 1] != b'\n' && !self.extra_newline {
            // final line has no terminator, add one (once)
            if self.filled == self.buf.len() {
                self.grow()?;
            }
            self.buf[self.filled] = b'\n';
            self.filled += 1;
            self.extra_newline = true;
            return Ok(true);
        }
        Err(self.premature_end())
    }

    fn premature_end(&self) -> Error {
        let mut tail = &self.buf[self.start..self.filled];
        if self.extra_newline {
            tail = &tail[..tail.len() - 1];
        }
        let line = self.n_records * 4 + memchr_iter(b'\n', tail).count() as u64;
        Error::UnexpectedEnd {
            tail: shorten(&decode_latin1(tail), TAIL_DISPLAY_LIMIT),
            line,
        }
    }

    // Moves the pending bytes to the start of the buffer, keeping already
    // located line terminators valid.
    fn make_room(&mut self) {
        let offset = self.start;
        self.buf.copy_within(self.start..self.filled, 0);
        self.filled -= offset;
        self.start = 0;
        if self.search_pos >= SearchPos::Seq {
            self.ends.head -= offset;
        }
        if self.search_pos >= SearchPos::Sep {
            self.ends.seq -= offset;
        }
        if self.search_pos == SearchPos::Qual {
            self.ends.sep -= offset;
        }
    }

    // Grows the buffer according to the policy, preserving its contents
    fn grow(&mut self) -> Result<(), Error> {
        let cap = self.buf.len();
        let new_size = self.policy.grow_limited(cap).ok_or(Error::BufferLimit)?;
        assert!(new_size > cap, "buffer policy did not grow the buffer");
        self.buf.resize(new_size, 0);
        Ok(())
    }
}

/// Borrowed iterator over all records of a reader, skipping the header
/// event.
pub struct RecordsIter<'a, R, P = StdPolicy, T = SequenceRecord>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    rdr: &'a mut Reader<R, P, T>,
}

impl<'a, R, P, T> Iterator for RecordsIter<'a, R, P, T>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rdr.next()? {
                Ok(Event::Record(record)) => return Some(Ok(record)),
                Ok(Event::Header(_)) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Iterator over all records that owns the underlying reader, skipping
/// the header event.
pub struct RecordsIntoIter<R, P = StdPolicy, T = SequenceRecord>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    rdr: Reader<R, P, T>,
}

impl<R, P, T> Iterator for RecordsIntoIter<R, P, T>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rdr.next()? {
                Ok(Event::Record(record)) => return Some(Ok(record)),
                Ok(Event::Header(_)) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
