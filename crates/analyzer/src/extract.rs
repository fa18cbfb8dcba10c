//! File extraction abstraction for testability.
//!
//! The [`Extractor`] trait abstracts away how files are pulled out of a
//! container image. The inspection orchestrator only depends on this trait,
//! so registry fetching, layer handling and tar walking live behind it and
//! tests can substitute an in-memory implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  ImageInspector  │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    ┌───────────┐
//!    │ Extractor │ (trait)
//!    └───────────┘
//!       │      │
//!       ▼      ▼
//!  registry   local
//!  backends   archives
//! ```
//!
//! # Ownership
//!
//! [`extract_image`](Extractor::extract_image) borrows an image reference;
//! the backend resolves and fetches it. [`extract_archive`](Extractor::extract_archive)
//! takes ownership of the byte stream and is responsible for closing it,
//! whether extraction succeeds or fails.

use std::future::Future;

use tokio::io::AsyncRead;

use strata_core::error::ExtractError;
use strata_core::types::FileMap;

/// A readable byte stream carrying an image archive.
///
/// Boxed so callers can hand over files, network bodies or in-memory
/// buffers interchangeably. Ownership moves into the extractor.
pub type ArchiveStream = Box<dyn AsyncRead + Send + Unpin>;

/// Trait abstracting image file extraction.
///
/// Implementations walk an image (or archive) and return the subset of
/// files whose paths match the requested filename list. A missing file is
/// not an error — it is simply absent from the returned map.
///
/// # Error Handling
///
/// Implementations report their own failures as [`ExtractError::Failed`]
/// with a human-readable reason. Timeouts and cancellation are enforced by
/// the orchestrator, never by the extractor itself.
pub trait Extractor: Send + Sync {
    /// Extracts the requested files from an image reference.
    ///
    /// # Arguments
    ///
    /// - `image_ref`: Image reference (e.g. `alpine:3.18`). Borrowed; the
    ///   backend decides how to resolve it.
    /// - `filenames`: Filenames the analyzers need. Duplicates are allowed
    ///   and harmless.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Failed` if the image cannot be fetched or read.
    fn extract_image(
        &self,
        image_ref: &str,
        filenames: &[String],
    ) -> impl Future<Output = Result<FileMap, ExtractError>> + Send;

    /// Extracts the requested files from an owned archive stream.
    ///
    /// The stream is consumed by this call. There is no associated wall
    /// clock limit — the caller controls the stream, so reading it is
    /// bounded by the caller's own I/O.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Failed` if the archive is malformed, or
    /// `ExtractError::Io` if reading the stream fails.
    fn extract_archive(
        &self,
        archive: ArchiveStream,
        filenames: &[String],
    ) -> impl Future<Output = Result<FileMap, ExtractError>> + Send;
}

/// 테스트용 Mock 추출기
///
/// 미리 준비한 파일 맵을 반환하여 레지스트리/백엔드 없이도
/// 오케스트레이터를 테스트할 수 있습니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockExtractor {
    /// 추출 호출 시 반환할 파일 맵
    pub files: FileMap,
    /// 실패를 시뮬레이션할 사유 (None이면 성공)
    pub fail_reason: Option<String>,
    /// 응답 전 지연 (시간 초과 테스트용)
    pub delay: Option<std::time::Duration>,
}

#[cfg(test)]
impl MockExtractor {
    /// 빈 파일 맵을 반환하는 mock 추출기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 반환할 파일 맵을 설정합니다.
    pub fn with_files(mut self, files: FileMap) -> Self {
        self.files = files;
        self
    }

    /// 추출 호출이 실패하도록 설정합니다.
    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        self.fail_reason = Some(reason.into());
        self
    }

    /// 응답 전 지연을 설정합니다.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn respond(&self) -> Result<FileMap, ExtractError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_reason {
            Some(reason) => Err(ExtractError::Failed {
                reason: reason.clone(),
            }),
            None => Ok(self.files.clone()),
        }
    }
}

#[cfg(test)]
impl Extractor for MockExtractor {
    async fn extract_image(
        &self,
        _image_ref: &str,
        _filenames: &[String],
    ) -> Result<FileMap, ExtractError> {
        self.respond().await
    }

    async fn extract_archive(
        &self,
        mut archive: ArchiveStream,
        _filenames: &[String],
    ) -> Result<FileMap, ExtractError> {
        use tokio::io::AsyncReadExt;

        // 소유권을 넘겨받은 스트림은 끝까지 소비한다
        let mut sink = Vec::new();
        archive.read_to_end(&mut sink).await?;
        self.respond().await
    }
}
