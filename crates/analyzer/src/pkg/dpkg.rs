//! dpkg 패키지 분석기
//!
//! Debian/Ubuntu의 `var/lib/dpkg/status` 데이터베이스를 파싱합니다.
//! 문단은 빈 줄로 구분되고 각 줄은 `필드: 값` 형식입니다(공백으로
//! 시작하는 줄은 멀티라인 필드의 연속). `Status`가 installed로 끝나지
//! 않는 문단(제거 후 설정 파일만 남은 경우 등)은 건너뜁니다.
//!
//! `Source:` 필드가 있으면 바이너리 패키지와 별도로 소스 패키지 항목을
//! 함께 내보냅니다. 같은 소스/버전 쌍은 한 번만 나타납니다.

use std::collections::{HashMap, HashSet};

use strata_core::analyzer::{PkgAnalyzer, required_text};
use strata_core::error::StrataError;
use strata_core::types::{FileMap, Package, PackageKind, SrcPackage};

use super::split_version;

const DB_PATH: &str = "var/lib/dpkg/status";
const REQUIRED_FILES: &[&str] = &[DB_PATH];

/// dpkg 패키지 분석기
pub struct DpkgAnalyzer;

impl DpkgAnalyzer {
    /// `Source:` 필드를 교차 참조해 소스 패키지별로 바이너리 이름을 묶습니다.
    ///
    /// 같은 소스에서 빌드된 설치 바이너리들이 하나의 [`SrcPackage`]로
    /// 모입니다. `Source:` 필드가 없는 패키지는 자기 자신이 소스이므로
    /// 목록에 넣지 않습니다. 순서는 상태 파일에서 소스가 처음 나타난
    /// 순서를 따릅니다.
    pub fn source_packages(&self, files: &FileMap) -> Result<Vec<SrcPackage>, StrataError> {
        let text = required_text(files, DB_PATH)?;

        let mut order: Vec<(String, String)> = Vec::new();
        let mut groups: HashMap<(String, String), Vec<String>> = HashMap::new();

        for block in text.split("\n\n") {
            let para = parse_paragraph(block);
            if para.name.is_empty() || !is_installed(para.status) || para.source.is_empty() {
                continue;
            }
            let (src_name, src_version) = split_source(para.source);
            let raw = src_version.unwrap_or(para.version);
            let key = (src_name.to_owned(), raw.to_owned());
            let binaries = groups.entry(key.clone()).or_default();
            if binaries.is_empty() {
                order.push(key);
            }
            binaries.push(para.name.to_owned());
        }

        Ok(order
            .into_iter()
            .map(|key| {
                let binary_names = groups.remove(&key).unwrap_or_default();
                SrcPackage {
                    name: key.0,
                    version: key.1,
                    binary_names,
                }
            })
            .collect())
    }
}

impl PkgAnalyzer for DpkgAnalyzer {
    fn name(&self) -> &str {
        "dpkg"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<Vec<Package>, StrataError> {
        let text = required_text(files, DB_PATH)?;

        let mut packages = Vec::new();
        let mut sources = Vec::new();
        let mut seen_sources: HashSet<(String, String)> = HashSet::new();

        for block in text.split("\n\n") {
            let para = parse_paragraph(block);
            if para.name.is_empty() || !is_installed(para.status) {
                continue;
            }

            let (epoch, version, release) = split_version(para.version);
            packages.push(Package {
                name: para.name.to_owned(),
                version,
                release,
                epoch,
                kind: PackageKind::Binary,
            });

            if !para.source.is_empty() {
                let (src_name, src_version) = split_source(para.source);
                let raw = src_version.unwrap_or(para.version);
                let key = (src_name.to_owned(), raw.to_owned());
                if seen_sources.insert(key) {
                    let (epoch, version, release) = split_version(raw);
                    sources.push(Package {
                        name: src_name.to_owned(),
                        version,
                        release,
                        epoch,
                        kind: PackageKind::Source,
                    });
                }
            }
        }

        packages.extend(sources);
        Ok(packages)
    }
}

// ─── 문단 파싱 ───

#[derive(Default)]
struct Paragraph<'a> {
    name: &'a str,
    version: &'a str,
    status: &'a str,
    source: &'a str,
}

fn parse_paragraph(block: &str) -> Paragraph<'_> {
    let mut para = Paragraph::default();
    for line in block.lines() {
        // 공백으로 시작하는 줄은 멀티라인 필드의 연속
        if line.starts_with(' ') {
            continue;
        }
        if let Some((field, value)) = line.split_once(':') {
            let value = value.trim();
            match field {
                "Package" => para.name = value,
                "Version" => para.version = value,
                "Status" => para.status = value,
                "Source" => para.source = value,
                _ => {}
            }
        }
    }
    para
}

/// Status 필드의 마지막 단어가 installed인지 검사합니다.
///
/// `install ok installed`는 통과하고 `deinstall ok config-files`는
/// 걸러집니다.
fn is_installed(status: &str) -> bool {
    status.split_whitespace().next_back() == Some("installed")
}

/// `Source:` 값을 이름과 선택적 버전으로 나눕니다.
///
/// `glibc`는 버전 없음, `shadow (1:4.13+dfsg1-1)`는 괄호 안 버전을
/// 반환합니다. 버전이 없으면 바이너리 버전을 물려받습니다.
fn split_source(value: &str) -> (&str, Option<&str>) {
    match value.split_once('(') {
        Some((name, rest)) => (
            name.trim(),
            Some(rest.trim_end().trim_end_matches(')').trim()),
        ),
        None => (value.trim(), None),
    }
}
