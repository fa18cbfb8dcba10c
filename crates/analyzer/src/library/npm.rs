//! package-lock.json 파서
//!
//! 이미지 안의 모든 `package-lock.json`(v2/v3)을 찾아 설치된 모듈을
//! 라이브러리 목록으로 변환합니다. 결과 맵의 키는 락파일의 전체
//! 경로입니다.
//!
//! # package-lock.json v3 형식 예시
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "lockfileVersion": 3,
//!   "packages": {
//!     "": { "name": "my-app", "version": "1.0.0" },
//!     "node_modules/lodash": { "version": "4.17.21", "integrity": "sha512-..." }
//!   }
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use strata_core::analyzer::LibAnalyzer;
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FileMap, FilePath, Library, LibraryMap};

use super::matches_basename;

const LOCKFILE_NAME: &str = "package-lock.json";
const REQUIRED_FILES: &[&str] = &[LOCKFILE_NAME];

/// package-lock.json 구조 (파싱용)
#[derive(Deserialize)]
struct NpmLockFile {
    #[serde(default)]
    packages: HashMap<String, NpmLockEntry>,
}

/// package-lock.json 내 개별 모듈 (파싱용)
#[derive(Deserialize)]
struct NpmLockEntry {
    #[serde(default)]
    version: Option<String>,
}

/// package-lock.json 라이브러리 분석기
pub struct NpmLockAnalyzer;

impl LibAnalyzer for NpmLockAnalyzer {
    fn name(&self) -> &str {
        "npm"
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

            let lock_file: NpmLockFile =
                serde_json::from_slice(content).map_err(|e| AnalysisError::ParseFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            let mut libraries = Vec::new();
            for (key, entry) in &lock_file.packages {
                // 루트 패키지는 키가 빈 문자열
                if key.is_empty() {
                    continue;
                }
                let version = match &entry.version {
                    Some(v) => v.clone(),
                    None => continue, // 버전 없는 항목(link 등)은 건너뜀
                };
                libraries.push(Library::new(package_name_from_key(key), version));
            }
            // HashMap 순회는 순서가 없으므로 이름순으로 고정
            libraries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));

            results.insert(FilePath::from(path.as_str()), libraries);
        }

        Ok(results)
    }
}

/// `node_modules/@scope/name` 또는 `node_modules/name`에서 패키지명 추출
fn package_name_from_key(key: &str) -> &str {
    // 마지막 node_modules/ 이후가 패키지명 (중첩 설치 대응)
    match key.rfind("node_modules/") {
        Some(pos) => &key[pos + "node_modules/".len()..],
        None => key,
    }
}
