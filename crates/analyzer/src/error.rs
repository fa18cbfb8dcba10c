//! 분석기 크레이트 에러 타입
//!
//! [`AnalyzerError`]는 레지스트리 디스패치와 이미지 검사 과정에서
//! 발생하는 모든 에러를 분류합니다.
//!
//! # 에러 분류
//!
//! - **해석 실패**: `UnknownOs`, `UnknownPackageManager` — 등록된 모든
//!   분석기를 시도한 뒤에도 결과가 없음
//! - **분석기 실패**: `FileMissing`, `Parse` — 개별 분석기가 결과를 내지
//!   못한 이유 (디스패치 정책에 따라 무시되거나 승격됨)
//! - **전체 중단**: `LibraryScan` — 라이브러리 스캔은 분석기 하나의
//!   실패가 전체 결과를 버림
//! - **추출 경계**: `Extract` — 추출기에서 넘어온 실패/시간초과/취소
//! - **설정**: `Config` — 빌더 검증 실패

use strata_core::error::{AnalysisError, ExtractError, StrataError};

/// 분석기 크레이트의 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    Config {
        /// 문제가 된 설정 필드명
        field: String,
        /// 거부 사유
        reason: String,
    },

    /// 등록된 어떤 OS 분석기도 OS를 식별하지 못함
    #[error("unknown OS")]
    UnknownOs,

    /// 등록된 어떤 패키지 분석기도 패키지 데이터베이스를 인식하지 못함
    #[error("unknown package manager")]
    UnknownPackageManager,

    /// 분석에 필요한 파일이 파일 맵에 없음
    #[error("required file not found: {path}")]
    FileMissing {
        /// 이미지 내 절대 경로
        path: String,
    },

    /// 파일 내용 파싱 실패
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// 파싱하던 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 라이브러리 스캔 중단 — 분석기 하나의 실패로 전체 결과가 버려짐
    #[error("failed to analyze libraries: {reason}")]
    LibraryScan {
        /// 실패한 분석기 이름
        analyzer: String,
        /// 실패 사유
        reason: String,
    },

    /// 추출기 경계에서 넘어온 에러
    ///
    /// 시간 초과와 취소는 [`ExtractError`]의 별도 variant로 구분됩니다.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// 분석기 에러를 core 에러 계층으로 변환합니다.
impl From<AnalyzerError> for StrataError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::Config { field, reason } => {
                StrataError::Config(strata_core::error::ConfigError::InvalidValue { field, reason })
            }
            AnalyzerError::UnknownOs => StrataError::Analysis(AnalysisError::UnknownOs),
            AnalyzerError::UnknownPackageManager => {
                StrataError::Analysis(AnalysisError::UnknownPackageManager)
            }
            AnalyzerError::FileMissing { path } => {
                StrataError::Analysis(AnalysisError::FileMissing { path })
            }
            AnalyzerError::Parse { path, reason } => {
                StrataError::Analysis(AnalysisError::ParseFailed { path, reason })
            }
            AnalyzerError::LibraryScan { analyzer, reason } => {
                StrataError::Analysis(AnalysisError::LibraryScan { analyzer, reason })
            }
            AnalyzerError::Extract(e) => StrataError::Extract(e),
        }
    }
}
