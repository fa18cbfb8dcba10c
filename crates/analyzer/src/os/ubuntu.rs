//! Ubuntu 탐지
//!
//! `etc/lsb-release`의 `KEY=VALUE` 줄에서 `DISTRIB_ID`와 `DISTRIB_RELEASE`를
//! 읽습니다. ubuntu 파생이 아닌 배포판도 lsb-release를 실을 수 있으므로
//! `DISTRIB_ID=Ubuntu`가 아니면 탐지를 거부합니다.

use strata_core::analyzer::{OsAnalyzer, required_text};
use strata_core::error::{AnalysisError, StrataError};
use strata_core::types::{FAMILY_UBUNTU, FileMap, OsInfo};

const RELEASE_PATH: &str = "etc/lsb-release";
const REQUIRED_FILES: &[&str] = &[RELEASE_PATH];

/// Ubuntu OS 분석기
pub struct UbuntuOsAnalyzer;

impl OsAnalyzer for UbuntuOsAnalyzer {
    fn name(&self) -> &str {
        "ubuntu"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<OsInfo, StrataError> {
        let text = required_text(files, RELEASE_PATH)?;

        let mut id = None;
        let mut release = None;
        for line in text.lines() {
            if let Some(value) = line.strip_prefix("DISTRIB_ID=") {
                id = Some(value.trim());
            } else if let Some(value) = line.strip_prefix("DISTRIB_RELEASE=") {
                release = Some(value.trim());
            }
        }

        if id != Some("Ubuntu") {
            return Err(AnalysisError::ParseFailed {
                path: RELEASE_PATH.to_owned(),
                reason: "DISTRIB_ID is not Ubuntu".to_owned(),
            }
            .into());
        }

        match release {
            Some(version) if !version.is_empty() => Ok(OsInfo::new(FAMILY_UBUNTU, version)),
            _ => Err(AnalysisError::ParseFailed {
                path: RELEASE_PATH.to_owned(),
                reason: "DISTRIB_RELEASE missing".to_owned(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    const SAMPLE_LSB_RELEASE: &[u8] = b"DISTRIB_ID=Ubuntu\n\
DISTRIB_RELEASE=22.04\n\
DISTRIB_CODENAME=jammy\n\
DISTRIB_DESCRIPTION=\"Ubuntu 22.04.3 LTS\"\n";

    fn files_with_release(content: &'static [u8]) -> FileMap {
        let mut files = FileMap::new();
        files.insert(RELEASE_PATH.to_owned(), Bytes::from_static(content));
        files
    }

    #[test]
    fn detects_ubuntu_release() {
        let analyzer = UbuntuOsAnalyzer;
        let os = analyzer
            .analyze(&files_with_release(SAMPLE_LSB_RELEASE))
            .unwrap();
        assert_eq!(os.family, FAMILY_UBUNTU);
        assert_eq!(os.name, "22.04");
    }

    #[test]
    fn field_order_does_not_matter() {
        let analyzer = UbuntuOsAnalyzer;
        let os = analyzer
            .analyze(&files_with_release(
                b"DISTRIB_RELEASE=20.04\nDISTRIB_ID=Ubuntu\n",
            ))
            .unwrap();
        assert_eq!(os.name, "20.04");
    }

    #[test]
    fn rejects_other_lsb_distro() {
        let analyzer = UbuntuOsAnalyzer;
        let err = analyzer
            .analyze(&files_with_release(
                b"DISTRIB_ID=LinuxMint\nDISTRIB_RELEASE=21.2\n",
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::ParseFailed { .. })
        ));
    }

    #[test]
    fn rejects_missing_release_field() {
        let analyzer = UbuntuOsAnalyzer;
        let err = analyzer
            .analyze(&files_with_release(b"DISTRIB_ID=Ubuntu\n"))
            .unwrap_err();
        assert!(err.to_string().contains("DISTRIB_RELEASE"));
    }

    #[test]
    fn missing_lsb_release_is_an_error() {
        let analyzer = UbuntuOsAnalyzer;
        let err = analyzer.analyze(&FileMap::new()).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::FileMissing { .. })
        ));
    }
}
