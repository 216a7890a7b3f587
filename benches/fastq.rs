#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rand_isaac::isaac64::Isaac64Rng;

use fqio::{pair, ByteRecord, Reader};

use std::iter::repeat;

/// number of records for all benchmarks
const N: usize = 25_000;
/// standard deviation of sequence lengths relative to mean sequence length
const SEQLEN_SD_FRAC: f64 = 0.2;

/// generates 'nrecords' FASTQ records with given properties
fn gen_fastq(
    nrecords: usize,
    id_len: usize,
    desc_len: usize,
    seq_len: usize,
    sep_ids: bool,
    cr: bool,
) -> Vec<u8> {
    let newline = if cr { b"\r\n".to_vec() } else { b"\n".to_vec() };
    let mut head: Vec<u8> = repeat(b'i').take(id_len).collect();
    head.push(b' ');
    head.extend(repeat(b'd').take(desc_len));
    let mut rec: Vec<u8> = vec![b'@'];
    rec.extend(&head);
    rec.extend(&newline);

    let norm = Normal::new(seq_len as f64, seq_len as f64 * SEQLEN_SD_FRAC).unwrap();
    let rng = Isaac64Rng::from_seed([5; 32]);

    rng.sample_iter(&norm)
        .map(|slen| {
            let slen = slen.round() as usize;
            let mut r = rec.clone();
            r.extend(repeat(b'A').take(slen));
            r.extend(&newline);
            r.extend(b"+");
            if sep_ids {
                r.extend(head.iter().cloned());
            }
            r.extend(&newline);
            r.extend(repeat(66).take(slen));
            r.extend(&newline);
            r
        })
        .take(nrecords)
        .flat_map(|r| r)
        .collect()
}

fn readers(c: &mut Criterion) {
    let data = gen_fastq(N, 20, 50, 300, false, false);
    let mut group = c.benchmark_group("fastq");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_with_input(BenchmarkId::new("read", "text_records"), &data, |b, data| {
        b.iter(|| {
            let mut reader = Reader::new(&data[..]);
            while let Some(event) = reader.next() {
                black_box(event.unwrap());
            }
        })
    });

    group.bench_with_input(BenchmarkId::new("read", "byte_records"), &data, |b, data| {
        b.iter(|| {
            let mut reader = Reader::new(&data[..]).set_record_kind::<ByteRecord>();
            while let Some(event) = reader.next() {
                black_box(event.unwrap());
            }
        })
    });

    group.bench_with_input(BenchmarkId::new("read", "small_buffer"), &data, |b, data| {
        b.iter(|| {
            let mut reader = Reader::with_capacity(&data[..], 64);
            while let Some(event) = reader.next() {
                black_box(event.unwrap());
            }
        })
    });

    group.bench_with_input(BenchmarkId::new("write", "serialize"), &data, |b, data| {
        let records: Vec<ByteRecord> = Reader::new(&data[..])
            .set_record_kind::<ByteRecord>()
            .into_records()
            .collect::<Result<_, _>>()
            .unwrap();
        b.iter(|| {
            for rec in &records {
                black_box(rec.fastq_bytes(false));
            }
        })
    });

    group.finish();
}

fn pairing(c: &mut Criterion) {
    let buf1 = gen_fastq(N, 20, 50, 300, false, false);
    let buf2 = gen_fastq(N, 20, 50, 250, false, false);
    let mut group = c.benchmark_group("pair");
    group.throughput(Throughput::Bytes((buf1.len() + buf2.len()) as u64));

    group.bench_function("paired_heads", |b| {
        b.iter(|| black_box(pair::paired_heads(&buf1, &buf2)))
    });

    group.finish();
}

criterion_group!(benches, readers, pairing);
criterion_main!(benches);
