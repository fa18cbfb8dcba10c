//! 에러 타입 — 도메인별 에러 정의

/// Strata 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 구성 분석 에러
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// 파일 추출 에러
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 구성 분석 에러
///
/// 리졸버와 분석기 플러그인이 공유하는 에러 분류입니다.
/// 개별 분석기의 실패는 리졸버 정책에 따라 무시되거나 전체 실패로 승격됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 등록된 어떤 OS 분석기도 OS를 식별하지 못함
    #[error("unknown OS")]
    UnknownOs,

    /// 등록된 어떤 패키지 분석기도 패키지 데이터베이스를 인식하지 못함
    #[error("unknown package manager")]
    UnknownPackageManager,

    /// 분석에 필요한 파일이 파일 맵에 없음
    #[error("required file not found: {path}")]
    FileMissing { path: String },

    /// 파일 내용 파싱 실패
    #[error("failed to parse {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    /// 라이브러리 분석 실패 — 분석기 하나라도 실패하면 전체가 중단됨
    #[error("failed to analyze libraries: {reason}")]
    LibraryScan { analyzer: String, reason: String },
}

/// 파일 추출 에러
///
/// 추출기 경계를 넘는 에러 분류입니다. 시간 초과와 취소는 일반 실패와
/// 구분 가능해야 하므로 별도 variant로 둡니다.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// 추출 작업 실패
    #[error("failed to extract files: {reason}")]
    Failed { reason: String },

    /// 추출 시간 초과
    #[error("extraction timed out after {secs}s")]
    Timeout { secs: u64 },

    /// 호출자에 의한 취소
    #[error("extraction cancelled")]
    Cancelled,

    /// 추출 중 I/O 에러
    #[error("io error during extraction: {0}")]
    Io(#[from] std::io::Error),
}
