//! 분석기 trait — 플러그인 확장 포인트 정의
//!
//! 세 종류의 분석기가 각각 이미지 파일 맵에서 OS, 패키지, 라이브러리를
//! 읽어냅니다. 분석기의 `Err`는 "여기서는 결과를 낼 수 없음"을 뜻합니다 —
//! 필요한 파일이 없는 경우와 내용이 손상된 경우를 구분하지 않으며,
//! 그 에러를 어떻게 다룰지는 분석기가 아니라 리졸버가 결정합니다.

use crate::error::{AnalysisError, StrataError};
use crate::types::{FileMap, LibraryMap, OsInfo, Package};

/// OS 탐지 분석기 trait
///
/// 릴리스 파일을 읽어 운영체제를 식별하려면 이 trait을 구현합니다.
pub trait OsAnalyzer: Send + Sync {
    /// 분석기 이름 (진단용)
    fn name(&self) -> &str;

    /// 이 분석기가 필요로 하는 이미지 절대 경로 목록
    fn required_files(&self) -> &[&str];

    /// 파일 맵에서 OS를 식별
    fn analyze(&self, files: &FileMap) -> Result<OsInfo, StrataError>;
}

/// 패키지 열거 분석기 trait
///
/// 패키지 관리자 데이터베이스 형식을 지원하려면 이 trait을 구현합니다.
pub trait PkgAnalyzer: Send + Sync {
    /// 분석기 이름 (진단용)
    fn name(&self) -> &str;

    /// 이 분석기가 필요로 하는 이미지 절대 경로 목록
    fn required_files(&self) -> &[&str];

    /// 파일 맵에서 설치된 패키지를 열거
    fn analyze(&self, files: &FileMap) -> Result<Vec<Package>, StrataError>;
}

/// 라이브러리 분석기 trait
///
/// 언어별 락파일 형식을 지원하려면 이 trait을 구현합니다.
/// 결과는 락파일 경로별로 묶이며, 한 이미지에 같은 형식의 락파일이
/// 여러 개 있어도 각각 별도 항목으로 보고됩니다.
pub trait LibAnalyzer: Send + Sync {
    /// 분석기 이름 (진단용)
    fn name(&self) -> &str;

    /// 이 분석기가 찾는 락파일 이름 목록 (경로가 아닌 파일명 매칭)
    fn required_files(&self) -> &[&str];

    /// 파일 맵에서 락파일을 찾아 라이브러리를 수집
    fn analyze(&self, files: &FileMap) -> Result<LibraryMap, StrataError>;
}

/// 분석기 구현용 헬퍼 — 파일 맵에서 필수 파일을 UTF-8 텍스트로 읽습니다.
///
/// 파일이 없으면 `FileMissing`, UTF-8이 아니면 `ParseFailed`를 반환합니다.
/// first-match 디스패치에서는 두 경우 모두 "이 분석기 해당 없음"으로
/// 처리됩니다.
pub fn required_text(files: &FileMap, path: &str) -> Result<String, StrataError> {
    let content = files.get(path).ok_or_else(|| AnalysisError::FileMissing {
        path: path.to_owned(),
    })?;
    match std::str::from_utf8(content) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(AnalysisError::ParseFailed {
            path: path.to_owned(),
            reason: "not valid utf-8".to_owned(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn required_text_reads_present_file() {
        let mut files = FileMap::new();
        files.insert(
            "etc/alpine-release".to_owned(),
            Bytes::from_static(b"3.18.4\n"),
        );
        let text = required_text(&files, "etc/alpine-release").unwrap();
        assert_eq!(text, "3.18.4\n");
    }

    #[test]
    fn required_text_missing_file() {
        let files = FileMap::new();
        let err = required_text(&files, "etc/alpine-release").unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::FileMissing { .. })
        ));
        assert!(err.to_string().contains("etc/alpine-release"));
    }

    #[test]
    fn required_text_rejects_invalid_utf8() {
        let mut files = FileMap::new();
        files.insert(
            "etc/alpine-release".to_owned(),
            Bytes::from_static(&[0xFF, 0xFE, 0x00]),
        );
        let err = required_text(&files, "etc/alpine-release").unwrap_err();
        assert!(matches!(
            err,
            StrataError::Analysis(AnalysisError::ParseFailed { .. })
        ));
    }
}
