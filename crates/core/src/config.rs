//! 설정 관리 — strata.toml 파싱 및 런타임 설정
//!
//! [`StrataConfig`]는 분석 파이프라인 전체의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`STRATA_EXTRACT_TIMEOUT_SECS=300` 형식)
//! 2. 설정 파일 (`strata.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), strata_core::error::StrataError> {
//! use strata_core::config::StrataConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = StrataConfig::load("strata.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = StrataConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, StrataError};

/// 기본 추출 시간 제한 (초)
pub const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 600;

/// 기본 파일 크기 상한 (바이트) — 이보다 큰 추출 파일은 버려짐
pub const DEFAULT_MAX_FILE_SIZE: usize = 64 * 1024 * 1024;

/// Strata 통합 설정
///
/// `strata.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrataConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 파일 추출 설정
    #[serde(default)]
    pub extract: ExtractConfig,
}

impl StrataConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StrataError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, StrataError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StrataError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                StrataError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, StrataError> {
        toml::from_str(toml_str).map_err(|e| {
            StrataError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `STRATA_{SECTION}_{FIELD}`
    /// 예: `STRATA_EXTRACT_TIMEOUT_SECS=300`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "STRATA_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "STRATA_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.data_dir, "STRATA_GENERAL_DATA_DIR");

        // Extract
        override_u64(&mut self.extract.timeout_secs, "STRATA_EXTRACT_TIMEOUT_SECS");
        override_usize(
            &mut self.extract.max_file_size,
            "STRATA_EXTRACT_MAX_FILE_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), StrataError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // timeout_secs 검증
        if self.extract.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extract.timeout_secs".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        // max_file_size 검증
        if self.extract.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extract.max_file_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

// Default는 derive 매크로로 자동 생성 (각 필드가 Default를 구현하므로)

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 데이터 디렉토리
    pub data_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
            data_dir: "/var/lib/strata".to_owned(),
        }
    }
}

/// 파일 추출 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 이미지 참조 추출의 벽시계 시간 제한 (초)
    pub timeout_secs: u64,
    /// 추출 파일 하나의 크기 상한 (바이트)
    pub max_file_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_EXTRACT_TIMEOUT_SECS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = StrataConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.extract.timeout_secs, 600);
        assert_eq!(config.extract.max_file_size, 64 * 1024 * 1024);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = StrataConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = StrataConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.extract.timeout_secs, 600);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[extract]
timeout_secs = 120
"#;
        let config = StrataConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.extract.timeout_secs, 120);
        assert_eq!(config.extract.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn from_str_full_toml() {
        let toml = r#"
[general]
log_level = "warn"
log_format = "pretty"
data_dir = "/opt/strata/data"

[extract]
timeout_secs = 900
max_file_size = 33554432
"#;
        let config = StrataConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.data_dir, "/opt/strata/data");
        assert_eq!(config.extract.timeout_secs, 900);
        assert_eq!(config.extract.max_file_size, 32 * 1024 * 1024);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = StrataConfig::parse("invalid = [[[toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            StrataError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = StrataConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = StrataConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = StrataConfig::default();
        config.extract.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn validate_rejects_zero_max_file_size() {
        let mut config = StrataConfig::default();
        config.extract.max_file_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size"));
    }

    #[test]
    fn env_override_string_applies() {
        let mut val = "original".to_owned();
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STRATA_STR", "overridden") };
        override_string(&mut val, "TEST_STRATA_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_STRATA_STR") };
    }

    #[test]
    fn env_override_u64_valid() {
        let mut val = 600u64;
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STRATA_U64", "42") };
        override_u64(&mut val, "TEST_STRATA_U64");
        assert_eq!(val, 42);
        unsafe { std::env::remove_var("TEST_STRATA_U64") };
    }

    #[test]
    fn env_override_u64_invalid_keeps_original() {
        let mut val = 600u64;
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STRATA_U64_BAD", "not-a-number") };
        override_u64(&mut val, "TEST_STRATA_U64_BAD");
        assert_eq!(val, 600); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_STRATA_U64_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_STRATA_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = StrataConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = StrataConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.extract.timeout_secs, parsed.extract.timeout_secs);
        assert_eq!(config.extract.max_file_size, parsed.extract.max_file_size);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let result = StrataConfig::from_file("/nonexistent/path/strata.toml").await;
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            StrataError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
