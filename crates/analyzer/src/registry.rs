//! 분석기 레지스트리 — 등록과 디스패치
//!
//! [`AnalyzerRegistry`]는 세 종류의 분석기를 카테고리별 목록으로 보관하고,
//! 파일 맵에 대한 해석 요청을 등록 순서대로 디스패치합니다.
//!
//! # 디스패치 정책
//!
//! - **OS / 패키지**: 등록 순서대로 시도해 첫 성공을 반환 (first-match).
//!   개별 분석기의 실패는 debug 레벨로 기록만 하고 버립니다.
//! - **라이브러리**: 모든 분석기를 실행해 결과를 병합 (all-or-nothing).
//!   하나라도 실패하면 전체 결과를 버리고 에러를 반환합니다.
//!
//! # 등록 순서
//!
//! 목록은 append-only이며 중복 제거를 하지 않습니다. 같은 경로 집합을
//! 다루는 분석기는 더 구체적인 쪽을 먼저 등록해야 합니다 — 예를 들어
//! ubuntu 이미지에는 `etc/debian_version`도 들어 있으므로 ubuntu 분석기가
//! debian 분석기보다 앞에 와야 합니다.

use metrics::{counter, gauge};
use tracing::debug;

use strata_core::analyzer::{LibAnalyzer, OsAnalyzer, PkgAnalyzer};
use strata_core::error::StrataError;
use strata_core::metrics as m;
use strata_core::types::{FileMap, LibraryMap, OsInfo, Package};

use crate::error::AnalyzerError;
use crate::library::{CargoLockAnalyzer, NpmLockAnalyzer};
use crate::os::{AlpineOsAnalyzer, DebianOsAnalyzer, RedHatOsAnalyzer, UbuntuOsAnalyzer};
use crate::pkg::{ApkAnalyzer, DpkgAnalyzer};

/// 등록 순서대로 분석기를 시도해 첫 번째 성공 결과를 반환합니다.
///
/// 실패는 "이 분석기 담당이 아님"으로 간주되어 `on_skip`으로 전달된 뒤
/// 버려집니다. 모든 분석기가 실패하면 (또는 목록이 비어 있으면) `None`을
/// 반환하며, 그것을 어떤 에러로 보고할지는 호출자가 결정합니다.
fn first_success<'a, A, T>(
    analyzers: &'a [Box<A>],
    mut probe: impl FnMut(&'a A) -> Result<T, StrataError>,
    mut on_skip: impl FnMut(&'a A, &StrataError),
) -> Option<T>
where
    A: ?Sized,
{
    for analyzer in analyzers {
        match probe(analyzer) {
            Ok(found) => return Some(found),
            Err(e) => on_skip(analyzer, &e),
        }
    }
    None
}

/// 분석기 레지스트리
///
/// 분석기의 등록과 카테고리별 디스패치를 담당합니다. 전역 상태가 아니라
/// 명시적으로 주입되는 값이므로, 서로 다른 분석기 집합을 가진 레지스트리를
/// 한 프로세스 안에서 나란히 쓸 수 있습니다.
///
/// # 사용 예시
///
/// ```
/// use strata_analyzer::AnalyzerRegistry;
///
/// let registry = AnalyzerRegistry::with_defaults();
/// assert!(registry.os_count() > 0);
///
/// let filenames = registry.required_filenames();
/// assert!(filenames.iter().any(|f| f == "etc/alpine-release"));
/// ```
pub struct AnalyzerRegistry {
    os_analyzers: Vec<Box<dyn OsAnalyzer>>,
    pkg_analyzers: Vec<Box<dyn PkgAnalyzer>>,
    lib_analyzers: Vec<Box<dyn LibAnalyzer>>,
}

impl AnalyzerRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            os_analyzers: Vec::new(),
            pkg_analyzers: Vec::new(),
            lib_analyzers: Vec::new(),
        }
    }

    /// 기본 제공 분석기가 모두 등록된 레지스트리를 생성합니다.
    ///
    /// OS 분석기는 구체적인 배포판이 먼저 오도록 등록됩니다
    /// (alpine → ubuntu → debian → redhat). ubuntu가 debian보다 앞에
    /// 있어야 ubuntu 이미지가 debian으로 오인되지 않습니다.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_os(Box::new(AlpineOsAnalyzer));
        registry.register_os(Box::new(UbuntuOsAnalyzer));
        registry.register_os(Box::new(DebianOsAnalyzer));
        registry.register_os(Box::new(RedHatOsAnalyzer));
        registry.register_pkg(Box::new(ApkAnalyzer));
        registry.register_pkg(Box::new(DpkgAnalyzer));
        registry.register_lib(Box::new(CargoLockAnalyzer));
        registry.register_lib(Box::new(NpmLockAnalyzer));
        registry
    }

    /// OS 분석기를 목록 끝에 등록합니다.
    ///
    /// 중복 검사를 하지 않습니다. 같은 분석기를 두 번 등록하면 두 번
    /// 시도됩니다.
    pub fn register_os(&mut self, analyzer: Box<dyn OsAnalyzer>) {
        self.os_analyzers.push(analyzer);
        gauge!(m::REGISTRY_ANALYZERS_REGISTERED, m::LABEL_CATEGORY => "os")
            .set(self.os_analyzers.len() as f64);
    }

    /// 패키지 분석기를 목록 끝에 등록합니다.
    pub fn register_pkg(&mut self, analyzer: Box<dyn PkgAnalyzer>) {
        self.pkg_analyzers.push(analyzer);
        gauge!(m::REGISTRY_ANALYZERS_REGISTERED, m::LABEL_CATEGORY => "pkg")
            .set(self.pkg_analyzers.len() as f64);
    }

    /// 라이브러리 분석기를 목록 끝에 등록합니다.
    pub fn register_lib(&mut self, analyzer: Box<dyn LibAnalyzer>) {
        self.lib_analyzers.push(analyzer);
        gauge!(m::REGISTRY_ANALYZERS_REGISTERED, m::LABEL_CATEGORY => "lib")
            .set(self.lib_analyzers.len() as f64);
    }

    /// 등록된 OS 분석기 수를 반환합니다.
    pub fn os_count(&self) -> usize {
        self.os_analyzers.len()
    }

    /// 등록된 패키지 분석기 수를 반환합니다.
    pub fn pkg_count(&self) -> usize {
        self.pkg_analyzers.len()
    }

    /// 등록된 라이브러리 분석기 수를 반환합니다.
    pub fn lib_count(&self) -> usize {
        self.lib_analyzers.len()
    }

    /// 등록된 분석기가 하나도 없으면 true를 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.os_analyzers.is_empty()
            && self.pkg_analyzers.is_empty()
            && self.lib_analyzers.is_empty()
    }

    /// 모든 분석기가 필요로 하는 파일 이름을 모아 반환합니다.
    ///
    /// 순서는 OS → 패키지 → 라이브러리, 각 카테고리 안에서는 등록 순서입니다.
    /// 중복을 제거하지 않습니다 — 추출기가 같은 이름을 두 번 받아도
    /// 무해하며, 목록의 순서가 곧 분석기 우선순위의 기록이기 때문입니다.
    pub fn required_filenames(&self) -> Vec<String> {
        let mut filenames = Vec::new();
        for analyzer in &self.os_analyzers {
            filenames.extend(analyzer.required_files().iter().map(|f| (*f).to_owned()));
        }
        for analyzer in &self.pkg_analyzers {
            filenames.extend(analyzer.required_files().iter().map(|f| (*f).to_owned()));
        }
        for analyzer in &self.lib_analyzers {
            filenames.extend(analyzer.required_files().iter().map(|f| (*f).to_owned()));
        }
        filenames
    }

    /// 파일 맵에서 OS를 탐지합니다.
    ///
    /// 등록 순서대로 시도해 첫 성공을 반환합니다. 개별 분석기의 실패는
    /// 기록 후 무시됩니다.
    ///
    /// # Errors
    ///
    /// 모든 분석기가 실패하면 (빈 레지스트리 포함) `AnalyzerError::UnknownOs`
    pub fn detect_os(&self, files: &FileMap) -> Result<OsInfo, AnalyzerError> {
        let found = first_success(
            &self.os_analyzers,
            |analyzer| analyzer.analyze(files),
            |analyzer, e| {
                debug!(analyzer = analyzer.name(), error = %e, "os analyzer skipped");
                counter!(
                    m::ANALYZER_SKIPS_TOTAL,
                    m::LABEL_CATEGORY => "os",
                    m::LABEL_ANALYZER => analyzer.name().to_owned()
                )
                .increment(1);
            },
        );

        match found {
            Some(os) => {
                debug!(family = %os.family, name = %os.name, "os detected");
                counter!(m::OS_DETECTIONS_TOTAL, m::LABEL_FAMILY => os.family.clone())
                    .increment(1);
                Ok(os)
            }
            None => {
                counter!(m::OS_DETECTION_FAILURES_TOTAL).increment(1);
                Err(AnalyzerError::UnknownOs)
            }
        }
    }

    /// 파일 맵에서 설치된 패키지를 열거합니다.
    ///
    /// OS 탐지와 같은 first-match 정책을 따릅니다. 성공한 분석기의 결과가
    /// 빈 목록이어도 성공으로 취급합니다 — 패키지가 없는 이미지와 패키지
    /// 데이터베이스를 인식하지 못한 이미지는 다른 상태입니다.
    ///
    /// # Errors
    ///
    /// 모든 분석기가 실패하면 `AnalyzerError::UnknownPackageManager`
    pub fn scan_packages(&self, files: &FileMap) -> Result<Vec<Package>, AnalyzerError> {
        let found = first_success(
            &self.pkg_analyzers,
            |analyzer| analyzer.analyze(files),
            |analyzer, e| {
                debug!(analyzer = analyzer.name(), error = %e, "pkg analyzer skipped");
                counter!(
                    m::ANALYZER_SKIPS_TOTAL,
                    m::LABEL_CATEGORY => "pkg",
                    m::LABEL_ANALYZER => analyzer.name().to_owned()
                )
                .increment(1);
            },
        );

        match found {
            Some(packages) => {
                debug!(count = packages.len(), "packages enumerated");
                counter!(m::PKG_SCANS_TOTAL).increment(1);
                counter!(m::PKG_PACKAGES_FOUND_TOTAL)
                    .increment(u64::try_from(packages.len()).unwrap_or(u64::MAX));
                Ok(packages)
            }
            None => {
                counter!(m::PKG_SCAN_FAILURES_TOTAL).increment(1);
                Err(AnalyzerError::UnknownPackageManager)
            }
        }
    }

    /// 파일 맵에서 언어별 라이브러리를 수집합니다.
    ///
    /// first-match가 아니라 등록된 **모든** 분석기를 순서대로 실행하고
    /// 결과를 병합합니다. 서로 다른 락파일 경로는 나란히 합쳐지고, 같은
    /// 경로를 여러 분석기가 보고하면 나중 분석기의 목록이 통째로 대체합니다.
    ///
    /// # Errors
    ///
    /// 분석기 하나라도 실패하면 부분 결과를 버리고
    /// `AnalyzerError::LibraryScan`을 반환합니다 (all-or-nothing).
    pub fn scan_libraries(&self, files: &FileMap) -> Result<LibraryMap, AnalyzerError> {
        let mut merged = LibraryMap::new();

        for analyzer in &self.lib_analyzers {
            let partial = analyzer.analyze(files).map_err(|e| {
                counter!(m::LIB_SCAN_FAILURES_TOTAL).increment(1);
                AnalyzerError::LibraryScan {
                    analyzer: analyzer.name().to_owned(),
                    reason: e.to_string(),
                }
            })?;

            for (path, libraries) in partial {
                merged.insert(path, libraries);
            }
        }

        let total: usize = merged.values().map(Vec::len).sum();
        debug!(paths = merged.len(), libraries = total, "libraries collected");
        counter!(m::LIB_SCANS_TOTAL).increment(1);
        counter!(m::LIB_LIBRARIES_FOUND_TOTAL)
            .increment(u64::try_from(total).unwrap_or(u64::MAX));
        Ok(merged)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
