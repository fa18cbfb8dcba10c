//! OS 탐지 분석기 — 배포판별 릴리스 파일 해석
//!
//! 각 분석기는 자기 배포판의 릴리스 파일 하나를 읽어
//! [`OsInfo`](strata_core::types::OsInfo)를 만듭니다. 필요한 파일이 없거나
//! 내용이 자기 배포판 형식이 아니면 에러를 반환하고, first-match
//! 디스패치가 다음 분석기로 넘어갑니다.
//!
//! # 등록 순서 주의
//!
//! ubuntu 이미지에는 `etc/debian_version`도 들어 있으므로, 기본 레지스트리는
//! ubuntu 분석기를 debian 분석기보다 먼저 등록합니다.

pub mod alpine;
pub mod debian;
pub mod redhat;
pub mod ubuntu;

pub use alpine::AlpineOsAnalyzer;
pub use debian::DebianOsAnalyzer;
pub use redhat::RedHatOsAnalyzer;
pub use ubuntu::UbuntuOsAnalyzer;
