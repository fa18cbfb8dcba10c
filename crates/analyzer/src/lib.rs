#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: 크레이트 에러 (`AnalyzerError`)
//! - [`config`]: 인스펙터 설정 (`InspectorConfig`, builder)
//! - [`extract`]: 파일 추출 추상화 (`Extractor` trait, `ArchiveStream`)
//! - [`registry`]: 분석기 등록/디스패치 (`AnalyzerRegistry`)
//! - [`inspector`]: 메인 오케스트레이터 (`ImageInspector`, `Composition`)
//! - [`os`]: OS 분석기 (alpine, ubuntu, debian, redhat)
//! - [`pkg`]: 패키지 분석기 (apk, dpkg)
//! - [`library`]: 라이브러리 분석기 (Cargo.lock, package-lock.json)
//!
//! # Architecture
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

pub mod config;
pub mod error;
pub mod extract;
pub mod inspector;
pub mod library;
pub mod os;
pub mod pkg;
pub mod registry;

// --- 주요 타입 re-export ---

// 인스펙터 (메인 오케스트레이터)
pub use inspector::{Composition, ImageInspector, ImageInspectorBuilder};

// 레지스트리
pub use registry::AnalyzerRegistry;

// 추출
pub use extract::{ArchiveStream, Extractor};

// 설정
pub use config::{InspectorConfig, InspectorConfigBuilder};

// 에러
pub use error::AnalyzerError;

// 내장 분석기
pub use library::{CargoLockAnalyzer, NpmLockAnalyzer};
pub use os::{AlpineOsAnalyzer, DebianOsAnalyzer, RedHatOsAnalyzer, UbuntuOsAnalyzer};
pub use pkg::{ApkAnalyzer, DpkgAnalyzer};
