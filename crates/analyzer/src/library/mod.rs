//! 라이브러리 분석기 — 언어 생태계 락파일 파서
//!
//! OS/패키지 분석기와 달리 라이브러리 분석기는 첫 성공에서 멈추지 않고
//! 전부 실행됩니다. 각 분석기는 파일 맵에서 자신이 아는 락파일만 골라
//! 파싱하고, 결과는 락파일 경로를 키로 병합됩니다. 락파일이 하나도
//! 없으면 빈 맵이 정상 결과입니다(오류 아님).

pub mod cargo;
pub mod npm;

pub use cargo::CargoLockAnalyzer;
pub use npm::NpmLockAnalyzer;

use std::path::Path;

/// 경로의 마지막 구성 요소가 주어진 파일명인지 검사합니다.
pub(crate) fn matches_basename(path: &str, file_name: &str) -> bool {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|base| base == file_name)
}
