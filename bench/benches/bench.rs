use canon_uri::{decode, encode, EncodeSet, Uri};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

criterion_group!(
    benches,
    bench_parse,
    bench_parse_url,
    bench_to_text,
    bench_normalize,
    bench_normalize_url,
    bench_resolve,
    bench_resolve_url,
    bench_encode,
    bench_decode,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const NORMALIZE_CASE: &str = "eXAMPLE://a/./b/../b/%63/%7bfoo%7d";
const RESOLVE_CASE_BASE: &str = "http://example.com/foo/bar";
const RESOLVE_CASE_REF: &str = "../baz";
const ENCODE_CASE: &str = "name=\u{5f20}\u{4e09} & age=20/30?";
const DECODE_CASE: &str = "name%3D%E5%BC%A0%E4%B8%89%20%26%20age%3D20";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_parse_url(c: &mut Criterion) {
    c.bench_function("parse_url", |b| {
        b.iter(|| Url::parse(black_box(PARSE_CASE)))
    });
}

fn bench_to_text(c: &mut Criterion) {
    let uri = Uri::parse(PARSE_CASE).unwrap();
    c.bench_function("to_text", |b| b.iter(|| black_box(&uri).to_text()));
}

fn bench_normalize(c: &mut Criterion) {
    let uri = Uri::parse(NORMALIZE_CASE).unwrap();
    c.bench_function("normalize", |b| b.iter(|| black_box(&uri).normalize()));
}

fn bench_normalize_url(c: &mut Criterion) {
    // `url` normalizes while parsing.
    c.bench_function("normalize_url", |b| {
        b.iter(|| Url::parse(black_box(NORMALIZE_CASE)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let r = Uri::parse(RESOLVE_CASE_REF).unwrap();
    c.bench_function("resolve", |b| {
        b.iter(|| canon_uri::resolve(black_box(&base), black_box(&r)))
    });
}

fn bench_resolve_url(c: &mut Criterion) {
    let base = Url::parse(RESOLVE_CASE_BASE).unwrap();
    c.bench_function("resolve_url", |b| {
        b.iter(|| black_box(&base).join(black_box(RESOLVE_CASE_REF)))
    });
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode", |b| {
        b.iter(|| encode(black_box(ENCODE_CASE), EncodeSet::QueryFormValue))
    });
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| b.iter(|| decode(black_box(DECODE_CASE))));
}
