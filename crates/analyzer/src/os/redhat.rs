//! Red Hat 계열 탐지
//!
//! `etc/redhat-release`의 `<배포판> release <버전> (<코드명>)` 형식을
//! 파싱합니다. 배포판 이름에 따라 centos / fedora / redhat 패밀리로
//! 분류하며, 버전 토큰은 숫자로 시작해야 합니다.

use strata_core::analyzer::{OsAnalyzer, required_text};
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FAMILY_CENTOS, FAMILY_FEDORA, FAMILY_REDHAT, FileMap, OsInfo};

const RELEASE_PATH: &str = "etc/redhat-release";
const REQUIRED_FILES: &[&str] = &[RELEASE_PATH];

/// Red Hat 계열 OS 분석기
pub struct RedHatOsAnalyzer;

impl OsAnalyzer for RedHatOsAnalyzer {
    fn name(&self) -> &str {
        "redhat"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<OsInfo, StrataError> {
        let text = required_text(files, RELEASE_PATH)?;
        let line = text.trim();

        let (distro, rest) = line.split_once(" release ").ok_or_else(|| {
            AnalysisError::ParseFailed {
                path: RELEASE_PATH.to_owned(),
                reason: "missing release marker".to_owned(),
            }
        })?;

        let version = rest
            .split_whitespace()
            .next()
            .filter(|v| v.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(|| AnalysisError::ParseFailed {
                path: RELEASE_PATH.to_owned(),
                reason: "version does not start with a digit".to_owned(),
            })?;

        let lowered = distro.to_lowercase();
        let family = if lowered.starts_with("centos") {
            FAMILY_CENTOS
        } else if lowered.starts_with("fedora") {
            FAMILY_FEDORA
        } else {
            FAMILY_REDHAT
        };

        Ok(OsInfo::new(family, version))
    }
}
