//! Helper functions for writing FASTQ data to an `io::Write` instance.
//!
//! These operate on raw byte slices and are independent of the record
//! types; use [`SequenceRecord::fastq_bytes`](crate::SequenceRecord::fastq_bytes)
//! or [`ByteRecord::fastq_bytes`](crate::ByteRecord::fastq_bytes) to
//! obtain a record's serialization as an owned byte string instead.

use std::io;

/// Writes one FASTQ record with the given header, sequence and qualities.
/// The separator line is a bare `+`, line endings are LF.
pub fn write<W: io::Write>(
    mut writer: W,
    head: &[u8],
    seq: &[u8],
    qual: &[u8],
) -> io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(head)?;
    writer.write_all(b"\n")?;
    writer.write_all(seq)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(qual)?;
    writer.write_all(b"\n")
}

/// Writes one FASTQ record, with the ID and description parts of the
/// header supplied separately instead of as a whole header line.
pub fn write_parts<W: io::Write>(
    mut writer: W,
    id: &[u8],
    desc: Option<&[u8]>,
    seq: &[u8],
    qual: &[u8],
) -> io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(id)?;
    if let Some(d) = desc {
        writer.write_all(b" ")?;
        writer.write_all(d)?;
    }
    writer.write_all(b"\n")?;
    writer.write_all(seq)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(qual)?;
    writer.write_all(b"\n")
}
