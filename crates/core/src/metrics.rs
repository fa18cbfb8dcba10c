//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `strata_`
//! - 영역명: `extract_`, `os_`, `pkg_`, `lib_`, `registry_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use strata_core::metrics;
//! use metrics::counter;
//!
//! counter!(strata_core::metrics::PKG_SCANS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 추출 소스 레이블 키 (image, archive)
pub const LABEL_SOURCE: &str = "source";

/// 결과 레이블 키 (success, failure, timeout, cancelled)
pub const LABEL_RESULT: &str = "result";

/// OS 패밀리 레이블 키 (alpine, debian, ubuntu, redhat 등)
pub const LABEL_FAMILY: &str = "family";

/// 분석기 카테고리 레이블 키 (os, pkg, lib)
pub const LABEL_CATEGORY: &str = "category";

/// 분석기 이름 레이블 키
pub const LABEL_ANALYZER: &str = "analyzer";

// ─── 추출 메트릭 ────────────────────────────────────────────────────

/// Extract: 수행된 추출 작업 수 (counter, labels: source, result)
pub const EXTRACT_RUNS_TOTAL: &str = "strata_extract_runs_total";

/// Extract: 추출 소요 시간 (histogram, 초)
pub const EXTRACT_DURATION_SECONDS: &str = "strata_extract_duration_seconds";

/// Extract: 마지막 추출에서 수집된 파일 수 (gauge)
pub const EXTRACT_FILES_COLLECTED: &str = "strata_extract_files_collected";

/// Extract: 크기 상한 초과로 버려진 파일 수 (counter)
pub const EXTRACT_OVERSIZED_DROPPED_TOTAL: &str = "strata_extract_oversized_dropped_total";

// ─── OS 탐지 메트릭 ─────────────────────────────────────────────────

/// OS: 성공한 OS 탐지 수 (counter, label: family)
pub const OS_DETECTIONS_TOTAL: &str = "strata_os_detections_total";

/// OS: 모든 분석기가 실패한 탐지 수 (counter)
pub const OS_DETECTION_FAILURES_TOTAL: &str = "strata_os_detection_failures_total";

// ─── 패키지 스캔 메트릭 ─────────────────────────────────────────────

/// Pkg: 성공한 패키지 스캔 수 (counter)
pub const PKG_SCANS_TOTAL: &str = "strata_pkg_scans_total";

/// Pkg: 모든 분석기가 실패한 스캔 수 (counter)
pub const PKG_SCAN_FAILURES_TOTAL: &str = "strata_pkg_scan_failures_total";

/// Pkg: 열거된 전체 패키지 수 (counter)
pub const PKG_PACKAGES_FOUND_TOTAL: &str = "strata_pkg_packages_found_total";

// ─── 라이브러리 스캔 메트릭 ─────────────────────────────────────────

/// Lib: 성공한 라이브러리 스캔 수 (counter)
pub const LIB_SCANS_TOTAL: &str = "strata_lib_scans_total";

/// Lib: 중단된 라이브러리 스캔 수 (counter)
pub const LIB_SCAN_FAILURES_TOTAL: &str = "strata_lib_scan_failures_total";

/// Lib: 수집된 전체 라이브러리 수 (counter)
pub const LIB_LIBRARIES_FOUND_TOTAL: &str = "strata_lib_libraries_found_total";

// ─── 레지스트리/디스패치 메트릭 ─────────────────────────────────────

/// Registry: 등록된 분석기 수 (gauge, label: category)
pub const REGISTRY_ANALYZERS_REGISTERED: &str = "strata_registry_analyzers_registered";

/// Dispatch: 건너뛴 분석기 수 — 개별 실패가 무시된 횟수 (counter, labels: category, analyzer)
pub const ANALYZER_SKIPS_TOTAL: &str = "strata_analyzer_skips_total";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 추출 소요 시간 히스토그램 버킷 (초)
///
/// 100ms ~ 600s 범위 (이미지 추출은 네트워크/디스크 I/O 포함)
pub const EXTRACT_DURATION_BUCKETS: [f64; 10] =
    [0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// `metrics::describe_counter!()`, `describe_gauge!()`, `describe_histogram!()`을
/// 호출하여 Prometheus HELP 텍스트를 설정합니다.
///
/// 이 함수는 전역 레코더 설치 후 한 번만 호출해야 합니다.
/// 레코더 설치는 이 라이브러리를 임베드하는 쪽의 몫입니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // Extract
    describe_counter!(
        EXTRACT_RUNS_TOTAL,
        "Total number of extraction runs by source and result"
    );
    describe_histogram!(
        EXTRACT_DURATION_SECONDS,
        "Time to extract required files from an image in seconds"
    );
    describe_gauge!(
        EXTRACT_FILES_COLLECTED,
        "Number of files collected by the most recent extraction"
    );
    describe_counter!(
        EXTRACT_OVERSIZED_DROPPED_TOTAL,
        "Total number of extracted files dropped for exceeding the size limit"
    );

    // OS detection
    describe_counter!(
        OS_DETECTIONS_TOTAL,
        "Total number of successful OS detections by family"
    );
    describe_counter!(
        OS_DETECTION_FAILURES_TOTAL,
        "Total number of OS detections where every analyzer failed"
    );

    // Package scan
    describe_counter!(
        PKG_SCANS_TOTAL,
        "Total number of successful package scans"
    );
    describe_counter!(
        PKG_SCAN_FAILURES_TOTAL,
        "Total number of package scans where every analyzer failed"
    );
    describe_counter!(
        PKG_PACKAGES_FOUND_TOTAL,
        "Total number of packages enumerated across all scans"
    );

    // Library scan
    describe_counter!(
        LIB_SCANS_TOTAL,
        "Total number of successful library scans"
    );
    describe_counter!(
        LIB_SCAN_FAILURES_TOTAL,
        "Total number of library scans aborted by an analyzer failure"
    );
    describe_counter!(
        LIB_LIBRARIES_FOUND_TOTAL,
        "Total number of libraries collected across all scans"
    );

    // Registry / dispatch
    describe_gauge!(
        REGISTRY_ANALYZERS_REGISTERED,
        "Number of analyzers registered by category"
    );
    describe_counter!(
        ANALYZER_SKIPS_TOTAL,
        "Total number of individual analyzer failures discarded by first-match dispatch"
    );
}
