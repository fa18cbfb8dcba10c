//! 이미지 검사 설정
//!
//! [`InspectorConfig`]는 core의 [`ExtractConfig`](strata_core::config::ExtractConfig)를
//! 확장하여 검사기 고유 설정(수집 파일 수 상한)을 추가합니다.
//!
//! # 사용 예시
//!
//! ```
//! use strata_analyzer::InspectorConfig;
//!
//! // 기본값으로 생성
//! let config = InspectorConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use strata_analyzer::InspectorConfigBuilder;
//!
//! let config = InspectorConfigBuilder::new()
//!     .timeout_secs(120)
//!     .max_file_size(16 * 1024 * 1024)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};

use strata_core::config::{DEFAULT_EXTRACT_TIMEOUT_SECS, DEFAULT_MAX_FILE_SIZE};

use crate::error::AnalyzerError;

/// 이미지 검사 설정
///
/// core의 `ExtractConfig`에서 파생되며, 모듈 고유 확장 필드를 포함합니다.
///
/// # 필드
///
/// - **timeout_secs**: 이미지 추출 시간 제한 (초). 아카이브 스트림 추출에는
///   적용되지 않습니다
/// - **max_file_size**: 추출 파일 하나의 최대 크기 (바이트). 초과 파일은
///   결과에서 제외됩니다
/// - **max_files**: 한 번의 추출에서 수집할 최대 파일 수
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// 이미지 추출 시간 제한 (초)
    pub timeout_secs: u64,
    /// 추출 파일 하나의 최대 허용 크기 (바이트)
    pub max_file_size: usize,

    // --- 모듈 고유 확장 ---
    /// 한 번의 추출에서 수집할 최대 파일 수
    pub max_files: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_EXTRACT_TIMEOUT_SECS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: 10_000,
        }
    }
}

/// 설정 상한값 상수
const MAX_TIMEOUT_SECS: u64 = 3600; // 1 hour
const MAX_FILE_SIZE_LIMIT: usize = 512 * 1024 * 1024; // 512 MB
const MAX_FILES_LIMIT: usize = 1_000_000;

impl InspectorConfig {
    /// core의 `ExtractConfig`에서 검사 설정을 생성합니다.
    ///
    /// core 설정에 없는 확장 필드는 기본값을 사용합니다.
    pub fn from_core(core: &strata_core::config::ExtractConfig) -> Self {
        Self {
            timeout_secs: core.timeout_secs,
            max_file_size: core.max_file_size,
            ..Self::default()
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `timeout_secs`: 1-3600
    /// - `max_file_size`: 1-536870912 (512MB)
    /// - `max_files`: 1-1000000
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(AnalyzerError::Config {
                field: "timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_TIMEOUT_SECS}"),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(AnalyzerError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }

        if self.max_files == 0 || self.max_files > MAX_FILES_LIMIT {
            return Err(AnalyzerError::Config {
                field: "max_files".to_owned(),
                reason: format!("must be 1-{MAX_FILES_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// [`InspectorConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct InspectorConfigBuilder {
    config: InspectorConfig,
}

impl InspectorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미지 추출 시간 제한(초)을 설정합니다.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// 추출 파일 하나의 최대 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 수집할 최대 파일 수를 설정합니다.
    pub fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `AnalyzerError::Config` 반환
    pub fn build(self) -> Result<InspectorConfig, AnalyzerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
