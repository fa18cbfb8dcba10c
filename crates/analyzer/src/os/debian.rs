//! Debian 탐지
//!
//! `etc/debian_version` 한 줄을 버전으로 읽습니다. Ubuntu 이미지도 이 파일을
//! 싣기 때문에 레지스트리 기본 순서에서 ubuntu 분석기 뒤에 배치됩니다.

use strata_core::analyzer::{OsAnalyzer, required_text};
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FAMILY_DEBIAN, FileMap, OsInfo};

const RELEASE_PATH: &str = "etc/debian_version";
const REQUIRED_FILES: &[&str] = &[RELEASE_PATH];

/// Debian OS 분석기
pub struct DebianOsAnalyzer;

impl OsAnalyzer for DebianOsAnalyzer {
    fn name(&self) -> &str {
        "debian"
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
        Ok(OsInfo::new(FAMILY_DEBIAN, version))
    }
}
