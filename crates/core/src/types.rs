//! 도메인 타입 — 이미지 구성 분석의 공통 타입
//!
//! 모든 크레이트가 공유하는 데이터 구조를 정의합니다.
//! 분석기 플러그인과 디스패치 코어는 이 타입들로 분석 결과를 교환합니다.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// 추출된 파일 맵 — 이미지 절대 경로 → 파일 내용
///
/// 추출기가 필수 파일 목록을 기준으로 수집한 결과입니다.
/// 키가 없으면 해당 파일이 이미지에 존재하지 않는 것입니다.
pub type FileMap = HashMap<String, Bytes>;

/// 라이브러리 분석 결과 맵 — 락파일 경로 → 라이브러리 목록
pub type LibraryMap = HashMap<FilePath, Vec<Library>>;

// 잘 알려진 OS 패밀리 이름 (열린 집합 — 분석기가 새 패밀리를 도입할 수 있음)
pub const FAMILY_ALPINE: &str = "alpine";
pub const FAMILY_DEBIAN: &str = "debian";
pub const FAMILY_UBUNTU: &str = "ubuntu";
pub const FAMILY_REDHAT: &str = "redhat";
pub const FAMILY_CENTOS: &str = "centos";
pub const FAMILY_FEDORA: &str = "fedora";

/// 탐지된 운영체제 정보
///
/// OS 분석기가 릴리스 파일에서 식별한 결과입니다.
/// `family`는 열린 집합이므로 문자열로 표현합니다 — 새 분석기가
/// 코어 수정 없이 새 패밀리를 도입할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    /// OS 패밀리 (alpine, debian, ubuntu, redhat 등)
    pub family: String,
    /// 버전 또는 릴리스 식별자 (예: "3.18.4", "bookworm/sid")
    pub name: String,
}

impl OsInfo {
    /// 새 OS 정보를 생성합니다.
    pub fn new(family: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for OsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.name)
    }
}

/// 패키지 종류 — 바이너리/소스 구분
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// 설치된 바이너리 패키지
    #[default]
    Binary,
    /// 바이너리가 빌드된 소스 패키지
    Source,
}

impl PackageKind {
    /// 문자열에서 패키지 종류를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "binary" | "bin" => Some(Self::Binary),
            "source" | "src" => Some(Self::Source),
            _ => None,
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// 설치된 패키지 정보
///
/// 패키지 분석기가 패키지 데이터베이스에서 열거한 한 항목입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// 패키지명
    pub name: String,
    /// 업스트림 버전
    pub version: String,
    /// 배포판 리비전 (없으면 빈 문자열)
    #[serde(default)]
    pub release: String,
    /// 에포크 (0 = 미설정)
    #[serde(default)]
    pub epoch: u32,
    /// 바이너리/소스 구분
    #[serde(default)]
    pub kind: PackageKind,
}

impl Package {
    /// 이름과 버전이 모두 채워져 있는지 검사합니다.
    ///
    /// 선택적 후처리 필터입니다. 패키지 스캔은 이 검사를 자동 적용하지
    /// 않으므로, 불완전한 항목을 거르려면 호출자가 직접 호출해야 합니다.
    /// release, epoch, kind는 판정에 관여하지 않습니다.
    pub fn is_wellformed(&self) -> bool {
        !self.name.is_empty() && !self.version.is_empty()
    }

    /// 에포크와 리비전을 포함한 전체 버전 문자열을 만듭니다.
    ///
    /// 형식: `[epoch:]version[-release]`
    pub fn full_version(&self) -> String {
        let mut out = String::new();
        if self.epoch > 0 {
            out.push_str(&self.epoch.to_string());
            out.push(':');
        }
        out.push_str(&self.version);
        if !self.release.is_empty() {
            out.push('-');
            out.push_str(&self.release);
        }
        out
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.full_version(), self.kind)
    }
}

/// 소스 패키지 정보
///
/// 소스/바이너리 패키지 데이터베이스를 교차 참조하는 분석기(dpkg 등)가
/// 생성합니다. 디스패치 코어는 이 값을 해석하지 않고 그대로 전달합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcPackage {
    /// 소스 패키지명
    pub name: String,
    /// 소스 버전
    pub version: String,
    /// 이 소스에서 빌드된 바이너리 패키지 이름 목록
    #[serde(rename = "binaryNames")]
    pub binary_names: Vec<String>,
}

impl fmt::Display for SrcPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({} binaries)",
            self.name,
            self.version,
            self.binary_names.len(),
        )
    }
}

/// 라이브러리 결과 맵의 키로 쓰이는 파일 경로
///
/// 일반 문자열과 구분되는 전용 키 타입입니다. 경로를 해석하거나
/// 정규화하지 않으며 불투명한 식별자로만 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilePath(String);

impl FilePath {
    /// 새 파일 경로 키를 생성합니다.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// 경로 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FilePath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

impl From<String> for FilePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 언어별 라이브러리 (락파일 항목)
///
/// 디스패치 코어에는 불투명한 값입니다. 라이브러리 분석기가 만든 그대로
/// 결과 맵에 실려 호출자에게 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// 라이브러리명
    pub name: String,
    /// 버전 문자열 (형식은 생태계마다 다름)
    pub version: String,
}

impl Library {
    /// 새 라이브러리 항목을 생성합니다.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
