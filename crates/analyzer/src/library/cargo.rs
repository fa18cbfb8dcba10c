//! Cargo.lock 파서
//!
//! 이미지 안의 모든 `Cargo.lock`을 찾아 `[[package]]` 항목을 라이브러리
//! 목록으로 변환합니다. 결과 맵의 키는 락파일의 전체 경로입니다.

use serde::Deserialize;

use strata_core::analyzer::LibAnalyzer;
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FileMap, FilePath, Library, LibraryMap};

use super::matches_basename;

const LOCKFILE_NAME: &str = "Cargo.lock";
const REQUIRED_FILES: &[&str] = &[LOCKFILE_NAME];

/// Cargo.lock 구조 (파싱용)
#[derive(Deserialize)]
struct CargoLockFile {
    #[serde(default)]
    package: Vec<CargoLockEntry>,
}

/// Cargo.lock 내 개별 패키지 (파싱용)
#[derive(Deserialize)]
struct CargoLockEntry {
    name: String,
    version: String,
}

/// Cargo.lock 라이브러리 분석기
pub struct CargoLockAnalyzer;

impl LibAnalyzer for CargoLockAnalyzer {
    fn name(&self) -> &str {
        "cargo"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<LibraryMap, StrataError> {
        let mut results = LibraryMap::new();

        for (path, content) in files {
            if !matches_basename(path, LOCKFILE_NAME) {
                continue;
            }

            let text =
                std::str::from_utf8(content).map_err(|_| AnalysisError::ParseFailed {
                    path: path.clone(),
                    reason: "not valid utf-8".to_owned(),
                })?;

            let lock_file: CargoLockFile =
                toml::from_str(text).map_err(|e| AnalysisError::ParseFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            let libraries = lock_file
                .package
                .into_iter()
                .map(|entry| Library::new(entry.name, entry.version))
                .collect();

            results.insert(FilePath::from(path.as_str()), libraries);
        }

        Ok(results)
    }
}
