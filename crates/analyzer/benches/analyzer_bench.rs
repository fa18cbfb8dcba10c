//! 분석기 벤치마크
//!
//! 패키지 데이터베이스 파서와 레지스트리 디스패치의 처리량을 측정합니다.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bytes::Bytes;
use strata_analyzer::{AnalyzerRegistry, ApkAnalyzer, CargoLockAnalyzer, DpkgAnalyzer, NpmLockAnalyzer};
use strata_core::analyzer::{LibAnalyzer, PkgAnalyzer};
use strata_core::types::FileMap;

/// 작은 apk 데이터베이스 (3개 레코드)
const APK_DB_SMALL: &[u8] = b"P:musl\nV:1.2.4-r2\nA:x86_64\n\nP:busybox\nV:1.36.1-r4\nA:x86_64\n\nP:zlib\nV:1.2.13-r1\nA:x86_64\n";

/// 작은 dpkg 상태 파일 (3개 문단)
const DPKG_STATUS_SMALL: &[u8] = b"Package: libc6\nStatus: install ok installed\nSource: glibc\nVersion: 2.36-9+deb12u3\n\nPackage: bash\nStatus: install ok installed\nVersion: 5.2.15-2+b2\n\nPackage: coreutils\nStatus: install ok installed\nVersion: 9.1-1\n";

/// Cargo.lock 샘플
const CARGO_LOCK: &[u8] = br#"version = 3

[[package]]
name = "bytes"
version = "1.5.0"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "a2bd12c1caf447e69cd4528f47f94d203fd2582878ecb9e9465484c4148a8223"

[[package]]
name = "serde"
version = "1.0.193"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "25dd9975e68d0cb5aa1120c288333fc98731bd1dd12f561e468ea4728c042b89"

[[package]]
name = "tokio"
version = "1.35.0"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "841d45b238a16291a4e1584e61820b8ae57d696cc5015c459c229ccc6990ea57"
"#;

/// package-lock.json 샘플
const PACKAGE_LOCK: &[u8] = br#"{
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "demo", "version": "1.0.0" },
    "node_modules/lodash": { "version": "4.17.21" },
    "node_modules/express": { "version": "4.18.2" },
    "node_modules/express/node_modules/debug": { "version": "2.6.9" }
  }
}"#;

fn files_with(path: &str, content: Bytes) -> FileMap {
    let mut files = FileMap::new();
    files.insert(path.to_owned(), content);
    files
}

/// 지정 개수만큼 레코드를 가진 apk 데이터베이스를 생성합니다.
fn apk_db_large(count: usize) -> Bytes {
    let mut db = String::new();
    for i in 0..count {
        db.push_str(&format!(
            "P:package-{i}\nV:1.{i}.0-r0\nA:x86_64\nT:generated package\n\n"
        ));
    }
    Bytes::from(db.into_bytes())
}

/// 지정 개수만큼 문단을 가진 dpkg 상태 파일을 생성합니다.
fn dpkg_status_large(count: usize) -> Bytes {
    let mut status = String::new();
    for i in 0..count {
        status.push_str(&format!(
            "Package: package-{i}\nStatus: install ok installed\nVersion: 1.{i}-1\nDescription: generated package\n\n"
        ));
    }
    Bytes::from(status.into_bytes())
}

fn bench_apk_parser(c: &mut Criterion) {
    let analyzer = ApkAnalyzer;
    let small = files_with("lib/apk/db/installed", Bytes::from_static(APK_DB_SMALL));
    let large = files_with("lib/apk/db/installed", apk_db_large(500));

    let mut group = c.benchmark_group("apk_parser");

    group.throughput(Throughput::Elements(3));
    group.bench_function("small", |b| {
        b.iter(|| analyzer.analyze(black_box(&small)).unwrap())
    });

    group.throughput(Throughput::Elements(500));
    group.bench_function("records_500", |b| {
        b.iter(|| analyzer.analyze(black_box(&large)).unwrap())
    });

    group.finish();
}

fn bench_dpkg_parser(c: &mut Criterion) {
    let analyzer = DpkgAnalyzer;
    let small = files_with("var/lib/dpkg/status", Bytes::from_static(DPKG_STATUS_SMALL));
    let large = files_with("var/lib/dpkg/status", dpkg_status_large(500));

    let mut group = c.benchmark_group("dpkg_parser");

    group.throughput(Throughput::Elements(3));
    group.bench_function("small", |b| {
        b.iter(|| analyzer.analyze(black_box(&small)).unwrap())
    });

    group.throughput(Throughput::Elements(500));
    group.bench_function("paragraphs_500", |b| {
        b.iter(|| analyzer.analyze(black_box(&large)).unwrap())
    });

    group.finish();
}

fn bench_os_detection(c: &mut Criterion) {
    let registry = AnalyzerRegistry::with_defaults();

    // 첫 번째 분석기가 바로 성공하는 경우
    let alpine = files_with("etc/alpine-release", Bytes::from_static(b"3.18.4\n"));

    // 앞의 세 분석기를 건너뛰고 마지막에 성공하는 경우
    let redhat = files_with(
        "etc/redhat-release",
        Bytes::from_static(b"CentOS Linux release 8.1.1911 (Core)\n"),
    );

    let mut group = c.benchmark_group("os_detection");
    group.throughput(Throughput::Elements(1));

    group.bench_function("first_analyzer_matches", |b| {
        b.iter(|| registry.detect_os(black_box(&alpine)).unwrap())
    });

    group.bench_function("last_analyzer_matches", |b| {
        b.iter(|| registry.detect_os(black_box(&redhat)).unwrap())
    });

    group.finish();
}

fn bench_lockfile_comparison(c: &mut Criterion) {
    let cargo = CargoLockAnalyzer;
    let npm = NpmLockAnalyzer;

    let cargo_files = files_with("app/Cargo.lock", Bytes::from_static(CARGO_LOCK));
    let npm_files = files_with("app/package-lock.json", Bytes::from_static(PACKAGE_LOCK));

    let mut group = c.benchmark_group("lockfile_comparison");
    group.throughput(Throughput::Elements(3));

    group.bench_with_input(
        BenchmarkId::new("format", "cargo_lock"),
        &cargo_files,
        |b, files| b.iter(|| cargo.analyze(black_box(files)).unwrap()),
    );

    group.bench_with_input(
        BenchmarkId::new("format", "package_lock_json"),
        &npm_files,
        |b, files| b.iter(|| npm.analyze(black_box(files)).unwrap()),
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_apk_parser,
    bench_dpkg_parser,
    bench_os_detection,
    bench_lockfile_comparison
);
criterion_main!(benches);
