//! 이미지 인스펙터 — 추출과 해석의 전체 흐름 오케스트레이터
//!
//! [`ImageInspector`]는 레지스트리가 요구하는 파일 목록을 추출기로 모으고,
//! 모인 파일 맵을 카테고리별 분석기로 해석해 [`Composition`] 보고서를
//! 만듭니다.
//!
//! # 내부 아키텍처
//!
//! ```text
//! image_ref / archive --> Extractor --> FileMap
//!                                          |
//!                    +---------------------+---------------------+
//!                    |                     |                     |
//!               detect_os           scan_packages         scan_libraries
//!                    |                     |                     |
//!                 OsInfo             Vec<Package>           LibraryMap
//!                    +---------------------+---------------------+
//!                                          |
//!                                     Composition
//! ```
//!
//! # 시간 제한과 취소
//!
//! 이미지 추출은 레지스트리/네트워크 I/O를 포함하므로 설정된 시간 제한의
//! 적용을 받습니다. 아카이브 추출은 호출자가 소유한 스트림을 읽는 것이라
//! 시간 제한이 없습니다. 취소 토큰은 두 경로 모두에 적용되며, 시간 초과와
//! 취소는 서로 다른 에러로 구분됩니다.

use std::time::{Duration, Instant, SystemTime};

use metrics::{counter, gauge, histogram};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use strata_core::error::ExtractError;
use strata_core::metrics as m;
use strata_core::types::{FileMap, LibraryMap, OsInfo, Package};

use crate::config::InspectorConfig;
use crate::error::AnalyzerError;
use crate::extract::{ArchiveStream, Extractor};
use crate::registry::AnalyzerRegistry;

/// 아카이브 입력의 보고서 source 값
const ARCHIVE_SOURCE: &str = "archive";

/// 이미지 구성 보고서
///
/// 한 번의 검사가 만들어 내는 최종 결과입니다. OS, 설치 패키지,
/// 락파일별 라이브러리를 하나의 문서로 묶습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// 보고서 고유 ID (UUID v4)
    pub report_id: String,
    /// 검사 대상 (이미지 참조 또는 "archive")
    pub source: String,
    /// 탐지된 OS
    pub os: OsInfo,
    /// 설치 패키지 목록
    pub packages: Vec<Package>,
    /// 락파일 경로별 라이브러리
    pub libraries: LibraryMap,
    /// 보고서 생성 시각
    pub generated_at: SystemTime,
}

/// 이미지 인스펙터
///
/// 파일 추출, 크기/개수 상한 적용, 분석기 디스패치를 한 번의 호출로
/// 묶습니다. 추출기는 타입 파라미터로 주입되므로 테스트에서는 인메모리
/// 구현으로 대체할 수 있습니다.
pub struct ImageInspector<E: Extractor> {
    /// 인스펙터 설정
    config: InspectorConfig,
    /// 분석기 레지스트리
    registry: AnalyzerRegistry,
    /// 파일 추출기
    extractor: E,
    /// 취소 토큰 (graceful shutdown)
    cancel_token: CancellationToken,
}

impl<E: Extractor> ImageInspector<E> {
    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// 분석기 레지스트리를 반환합니다.
    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    /// 이미지를 검사해 구성 보고서를 만듭니다.
    ///
    /// 추출 실패나 첫 번째 분석 실패에서 즉시 중단합니다.
    pub async fn inspect_image(&self, image_ref: &str) -> Result<Composition, AnalyzerError> {
        let files = self.files_from_image(image_ref).await?;
        self.compose(image_ref, &files)
    }

    /// 아카이브 스트림을 검사해 구성 보고서를 만듭니다.
    ///
    /// 스트림 소유권은 추출기로 넘어가며, 취소되면 스트림도 함께
    /// 닫힙니다.
    pub async fn inspect_archive(&self, archive: ArchiveStream) -> Result<Composition, AnalyzerError> {
        let files = self.files_from_archive(archive).await?;
        self.compose(ARCHIVE_SOURCE, &files)
    }

    /// 이미지에서 분석기들이 요구하는 파일을 추출합니다.
    ///
    /// 설정된 시간 제한을 적용하고, 초과 시
    /// [`ExtractError::Timeout`]을 반환합니다. 취소 토큰이 먼저 발화하면
    /// [`ExtractError::Cancelled`]를 반환합니다.
    pub async fn files_from_image(&self, image_ref: &str) -> Result<FileMap, AnalyzerError> {
        let filenames = self.registry.required_filenames();
        let limit = Duration::from_secs(self.config.timeout_secs);
        let started = Instant::now();

        let outcome = tokio::select! {
            _ = self.cancel_token.cancelled() => Err(ExtractError::Cancelled),
            result = tokio::time::timeout(
                limit,
                self.extractor.extract_image(image_ref, &filenames),
            ) => {
                match result {
                    Ok(extracted) => extracted,
                    Err(_) => Err(ExtractError::Timeout {
                        secs: self.config.timeout_secs,
                    }),
                }
            }
        };

        self.finish_extract("image", started, outcome)
    }

    /// 아카이브 스트림에서 분석기들이 요구하는 파일을 추출합니다.
    ///
    /// 스트림은 호출자 소유였다가 이 호출로 추출기에 넘어가므로 시간
    /// 제한을 걸지 않습니다. 취소 토큰은 여기에도 적용되며, 취소 시
    /// 진행 중이던 추출 퓨처가 드롭되면서 스트림도 닫힙니다.
    pub async fn files_from_archive(&self, archive: ArchiveStream) -> Result<FileMap, AnalyzerError> {
        let filenames = self.registry.required_filenames();
        let started = Instant::now();

        let outcome = tokio::select! {
            _ = self.cancel_token.cancelled() => Err(ExtractError::Cancelled),
            result = self.extractor.extract_archive(archive, &filenames) => result,
        };

        self.finish_extract("archive", started, outcome)
    }

    /// 추출 결과에 공통 후처리를 적용합니다 — 메트릭 기록, 상한 적용.
    fn finish_extract(
        &self,
        source: &'static str,
        started: Instant,
        outcome: Result<FileMap, ExtractError>,
    ) -> Result<FileMap, AnalyzerError> {
        let elapsed = started.elapsed().as_secs_f64();
        histogram!(m::EXTRACT_DURATION_SECONDS, m::LABEL_SOURCE => source).record(elapsed);

        let mut files = match outcome {
            Ok(files) => files,
            Err(e) => {
                let result = match &e {
                    ExtractError::Timeout { .. } => "timeout",
                    ExtractError::Cancelled => "cancelled",
                    _ => "failure",
                };
                counter!(m::EXTRACT_RUNS_TOTAL, m::LABEL_SOURCE => source, m::LABEL_RESULT => result)
                    .increment(1);
                warn!(source, error = %e, "extraction failed");
                return Err(e.into());
            }
        };

        self.enforce_limits(&mut files)?;

        counter!(m::EXTRACT_RUNS_TOTAL, m::LABEL_SOURCE => source, m::LABEL_RESULT => "success")
            .increment(1);
        gauge!(m::EXTRACT_FILES_COLLECTED).set(files.len() as f64);
        debug!(source, files = files.len(), elapsed_secs = elapsed, "extraction completed");

        Ok(files)
    }

    /// 파일 크기/개수 상한을 적용합니다.
    ///
    /// 크기 상한을 넘는 파일은 버리고(계속 진행), 개수 상한을 넘으면
    /// 추출 전체를 실패로 처리합니다.
    fn enforce_limits(&self, files: &mut FileMap) -> Result<(), AnalyzerError> {
        let before = files.len();
        files.retain(|path, content| {
            if content.len() > self.config.max_file_size {
                warn!(
                    path = %path,
                    size = content.len(),
                    max = self.config.max_file_size,
                    "extracted file too large, dropping"
                );
                false
            } else {
                true
            }
        });
        let dropped = before - files.len();
        if dropped > 0 {
            let dropped_u64 = u64::try_from(dropped).unwrap_or(u64::MAX);
            counter!(m::EXTRACT_OVERSIZED_DROPPED_TOTAL).increment(dropped_u64);
        }

        if files.len() > self.config.max_files {
            return Err(ExtractError::Failed {
                reason: format!(
                    "{} files extracted, limit is {}",
                    files.len(),
                    self.config.max_files,
                ),
            }
            .into());
        }

        Ok(())
    }

    /// 파일 맵을 세 카테고리의 분석기로 해석해 보고서를 만듭니다.
    ///
    /// 첫 번째 분석 실패에서 즉시 중단합니다 — 부분 보고서는 만들지
    /// 않습니다.
    fn compose(&self, source: &str, files: &FileMap) -> Result<Composition, AnalyzerError> {
        let os = self.registry.detect_os(files)?;
        let packages = self.registry.scan_packages(files)?;
        let libraries = self.registry.scan_libraries(files)?;

        info!(
            source,
            os = %os,
            packages = packages.len(),
            lockfiles = libraries.len(),
            "inspection completed"
        );

        Ok(Composition {
            report_id: uuid::Uuid::new_v4().to_string(),
            source: source.to_owned(),
            os,
            packages,
            libraries,
            generated_at: SystemTime::now(),
        })
    }
}

/// 이미지 인스펙터 빌더
///
/// 추출기는 필수이고, 설정과 레지스트리는 생략하면 기본값
/// ([`InspectorConfig::default`], [`AnalyzerRegistry::with_defaults`])을
/// 사용합니다.
pub struct ImageInspectorBuilder<E: Extractor> {
    config: InspectorConfig,
    registry: Option<AnalyzerRegistry>,
    extractor: E,
    cancel_token: Option<CancellationToken>,
}

impl<E: Extractor> ImageInspectorBuilder<E> {
    /// 주어진 추출기로 새 빌더를 생성합니다.
    pub fn new(extractor: E) -> Self {
        Self {
            config: InspectorConfig::default(),
            registry: None,
            extractor,
            cancel_token: None,
        }
    }

    /// 인스펙터 설정을 지정합니다.
    pub fn config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// 분석기 레지스트리를 지정합니다.
    ///
    /// 지정하지 않으면 기본 분석기 세트가 등록됩니다.
    pub fn registry(mut self, registry: AnalyzerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 외부 취소 토큰을 지정합니다 (graceful shutdown 연동용).
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// 인스펙터를 빌드합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증에 실패하면 [`AnalyzerError::Config`]를 반환합니다.
    pub fn build(self) -> Result<ImageInspector<E>, AnalyzerError> {
        self.config.validate()?;

        Ok(ImageInspector {
            config: self.config,
            registry: self.registry.unwrap_or_else(AnalyzerRegistry::with_defaults),
            extractor: self.extractor,
            cancel_token: self.cancel_token.unwrap_or_default(),
        })
    }
}
