//! Alpine Linux 탐지
//!
//! `etc/alpine-release`는 버전 문자열 한 줄만 담는 파일입니다
//! (예: `3.18.4`). 이 파일의 존재 자체가 alpine임을 뜻합니다.

use strata_core::analyzer::{OsAnalyzer, required_text};
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FAMILY_ALPINE, FileMap, OsInfo};

const RELEASE_PATH: &str = "etc/alpine-release";
const REQUIRED_FILES: &[&str] = &[RELEASE_PATH];

/// Alpine Linux OS 분석기
pub struct AlpineOsAnalyzer;

impl OsAnalyzer for AlpineOsAnalyzer {
    fn name(&self) -> &str {
        "alpine"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<OsInfo, StrataError> {
        let text = required_text(files, RELEASE_PATH)?;
        let version = text.trim();
        if version.is_empty() {
            return Err(AnalysisError::ParseFailed {
                path: RELEASE_PATH.to_owned(),
                reason: "release file is empty".to_owned(),
            }
            .into());
        }
        Ok(OsInfo::new(FAMILY_ALPINE, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn files_with_release(content: &'static [u8]) -> FileMap {
        let mut files = FileMap::new();
        files.insert(RELEASE_PATH.to_owned(), Bytes::from_static(content));
        files
    }

    #[test]
    fn detects_alpine_version() {
        let analyzer = AlpineOsAnalyzer;
        let os = analyzer.analyze(&files_with_release(b"3.18.4\n")).unwrap();
        assert_eq!(os.family, FAMILY_ALPINE);
        assert_eq!(os.name, "3.18.4");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let analyzer = AlpineOsAnalyzer;
        let os = analyzer
            .analyze(&files_with_release(b"  3.19.0\n\n"))
            .unwrap();
        assert_eq!(os.name, "3.19.0");
    }

    #[test]
    fn missing_release_file_is_an_error() {
        let analyzer = AlpineOsAnalyzer;
        let err = analyzer.analyze(&FileMap::new()).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::FileMissing { .. })
        ));
    }

    #[test]
    fn empty_release_file_is_an_error() {
        let analyzer = AlpineOsAnalyzer;
        let err = analyzer.analyze(&files_with_release(b"\n")).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::ParseFailed { .. })
        ));
    }

    #[test]
    fn required_files_names_release_path() {
        let analyzer = AlpineOsAnalyzer;
        assert_eq!(analyzer.required_files(), &["etc/alpine-release"]);
    }
}
