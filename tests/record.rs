#[macro_use]
extern crate matches;

use fqio::{ByteRecord, Error, Event, Reader, SequenceRecord};

fn record(name: &str, seq: &str, qual: &str) -> SequenceRecord {
    SequenceRecord::new(name.into(), seq.into(), Some(qual.into())).unwrap()
}

#[test]
fn construction_validates_lengths() {
    let err = SequenceRecord::new("read1 comment".into(), "ACGT".into(), Some("!!".into()))
        .err()
        .expect("should be an error");
    assert_matches!(
        err,
        Error::UnequalLengths {
            seq: 4,
            qual: 2,
            line: None,
            ..
        }
    );
    assert!(err.to_string().contains("read1"));

    let err = ByteRecord::new(b"r".to_vec(), b"ACGT".to_vec(), b"!!!".to_vec())
        .err()
        .expect("should be an error");
    assert_matches!(err, Error::UnequalLengths { seq: 4, qual: 3, .. });
}

#[test]
fn qualities_are_optional_for_text_records() {
    let rec = SequenceRecord::new("r".into(), "ACGT".into(), None).unwrap();
    assert_eq!(rec.qualities(), None);
    assert_eq!(rec.len(), 4);
    assert_matches!(
        rec.fastq_bytes(false).err().expect("should be an error"),
        Error::MissingQualities { .. }
    );
    assert_matches!(
        rec.qualities_bytes().err().expect("should be an error"),
        Error::MissingQualities { .. }
    );
}

#[test]
fn accessors() {
    let rec = record("read1 length=4", "ACGT", "II#I");
    assert_eq!(rec.name(), "read1 length=4");
    assert_eq!(rec.id(), "read1");
    assert_eq!(rec.len(), 4);
    assert!(!rec.is_empty());
    assert_eq!(rec.qualities_bytes().unwrap(), b"II#I".to_vec());

    let rec = ByteRecord::new(b"read2\tdesc".to_vec(), b"AC".to_vec(), b"!!".to_vec()).unwrap();
    assert_eq!(rec.id(), b"read2");
    assert_eq!(rec.qualities(), b"!!");
}

#[test]
fn slicing() {
    let rec = record("r1 desc", "ACGTAC", "!!#!!#");
    let sub = rec.slice(1..4);
    assert_eq!(sub.name(), "r1 desc");
    assert_eq!(sub.sequence(), &rec.sequence()[1..4]);
    assert_eq!(sub.qualities().unwrap(), &rec.qualities().unwrap()[1..4]);

    // qualities stay absent
    let rec = SequenceRecord::new("r".into(), "ACGT".into(), None).unwrap();
    assert_eq!(rec.slice(0..2).qualities(), None);

    let rec = ByteRecord::new(b"r".to_vec(), b"ACGTAC".to_vec(), b"!!#!!#".to_vec()).unwrap();
    let sub = rec.slice(2..6);
    assert_eq!(sub.sequence(), b"GTAC");
    assert_eq!(sub.qualities(), b"#!!#");
}

#[test]
fn serialize_single_header() {
    let rec = record("r1 desc", "ACGT", "II#I");
    let out = rec.fastq_bytes(false).unwrap();
    assert_eq!(out, b"@r1 desc\nACGT\n+\nII#I\n".to_vec());
    // exact size: name + seq + qual + 6 bytes of framing
    assert_eq!(out.len(), 7 + 4 + 4 + 6);
}

#[test]
fn serialize_two_headers() {
    let rec = record("r1 desc", "ACGT", "II#I");
    let out = rec.fastq_bytes(true).unwrap();
    assert_eq!(out, b"@r1 desc\nACGT\n+r1 desc\nII#I\n".to_vec());
    assert_eq!(out.len(), 2 * 7 + 4 + 4 + 6);
}

#[test]
fn serialize_byte_record() {
    let rec = ByteRecord::new(b"r1".to_vec(), b"ACGT".to_vec(), b"II#I".to_vec()).unwrap();
    assert_eq!(rec.fastq_bytes(false), b"@r1\nACGT\n+\nII#I\n".to_vec());
    assert_eq!(rec.fastq_bytes(true), b"@r1\nACGT\n+r1\nII#I\n".to_vec());
}

#[test]
fn serialize_latin1_name() {
    let rec = record("r\u{e9}ad", "ACGT", "II#I");
    let out = rec.fastq_bytes(false).unwrap();
    // 'é' is encoded as the single byte 0xE9
    assert_eq!(out[0..5], [b'@', b'r', 0xE9, b'a', b'd']);
    assert_eq!(out.len(), 4 + 4 + 4 + 6);
}

#[test]
fn serialize_rejects_wide_name() {
    let rec = record("r\u{20ac}ad", "ACGT", "II#I");
    assert_matches!(
        rec.fastq_bytes(false).err().expect("should be an error"),
        Error::Encode { field: "name", .. }
    );
}

#[test]
fn serialize_rejects_non_ascii_sequence() {
    let rec = record("r1", "ACG\u{e4}", "II#I");
    assert_matches!(
        rec.fastq_bytes(false).err().expect("should be an error"),
        Error::Encode {
            field: "sequence",
            ..
        }
    );
    let rec = record("r1", "ACGT", "II#\u{e4}");
    assert_matches!(
        rec.fastq_bytes(false).err().expect("should be an error"),
        Error::Encode {
            field: "qualities",
            ..
        }
    );
}

#[test]
fn roundtrip_through_serialization() {
    let fq = &b"@r1 desc\nACGT\n+\nII#I\n@r2\nT\n+\n!\n"[..];
    let records: Vec<SequenceRecord> = Reader::new(fq)
        .into_records()
        .collect::<Result<_, _>>()
        .expect("parse error");
    for rec in &records {
        let bytes = rec.fastq_bytes(false).unwrap();
        let mut reader = Reader::new(&bytes[..]);
        assert_matches!(reader.next().unwrap().unwrap(), Event::Header(false));
        match reader.next().unwrap().unwrap() {
            Event::Record(reparsed) => assert_eq!(&reparsed, rec),
            ev => panic!("unexpected event: {:?}", ev),
        }
        assert!(reader.next().is_none());

        // the two-header form parses to the same record
        let bytes = rec.fastq_bytes(true).unwrap();
        let mut reader = Reader::new(&bytes[..]);
        assert_matches!(reader.next().unwrap().unwrap(), Event::Header(true));
        match reader.next().unwrap().unwrap() {
            Event::Record(reparsed) => assert_eq!(&reparsed, rec),
            ev => panic!("unexpected event: {:?}", ev),
        }
    }
}

#[test]
fn is_mate() {
    let r1 = record("read/1 first", "ACGT", "IIII");
    let r2 = record("read/2 second", "TGCA", "IIII");
    assert!(r1.is_mate(&r2).unwrap());
    assert!(r2.is_mate(&r1).unwrap());

    let other = record("other/1", "ACGT", "IIII");
    assert!(!r1.is_mate(&other).unwrap());

    // names that have no single-byte encoding are rejected
    let wide = record("read\u{20ac}/1", "ACGT", "IIII");
    assert!(wide.is_mate(&r1).is_err());

    let b1 = ByteRecord::new(b"read/1".to_vec(), b"A".to_vec(), b"!".to_vec()).unwrap();
    let b2 = ByteRecord::new(b"read/2".to_vec(), b"T".to_vec(), b"!".to_vec()).unwrap();
    assert!(b1.is_mate(&b2));
}

#[test]
fn write_helpers() {
    let mut out = Vec::new();
    fqio::write::write(&mut out, b"r1 desc", b"ACGT", b"II#I").unwrap();
    fqio::write::write_parts(&mut out, b"r2", Some(&b"desc"[..]), b"AC", b"!!").unwrap();
    assert_eq!(out, b"@r1 desc\nACGT\n+\nII#I\n@r2 desc\nAC\n+\n!!\n".to_vec());
}

#[test]
fn equality_is_componentwise() {
    let a = record("r", "ACGT", "IIII");
    let b = record("r", "ACGT", "IIII");
    let c = record("r", "ACGT", "III#");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, SequenceRecord::new("r".into(), "ACGT".into(), None).unwrap());
}
