//! APK 패키지 분석기
//!
//! Alpine의 `lib/apk/db/installed` 데이터베이스를 파싱합니다. 레코드는
//! 빈 줄로 구분되고 각 줄은 `필드:값` 형식입니다. `P:`(이름)와
//! `V:`(버전) 필드만 사용하고 나머지는 무시합니다.

use strata_core::analyzer::{PkgAnalyzer, required_text};
use strata_core::error::StrataError;
use strata_core::types::{FileMap, Package};

use super::split_version;

const DB_PATH: &str = "lib/apk/db/installed";
const REQUIRED_FILES: &[&str] = &[DB_PATH];

/// APK 패키지 분석기
pub struct ApkAnalyzer;

impl PkgAnalyzer for ApkAnalyzer {
    fn name(&self) -> &str {
        "apk"
    }

    fn required_files(&self) -> &[&str] {
        REQUIRED_FILES
    }

    fn analyze(&self, files: &FileMap) -> Result<Vec<Package>, StrataError> {
        let text = required_text(files, DB_PATH)?;

        let mut packages = Vec::new();
        for record in text.split("\n\n") {
            let mut pkg = Package::default();
            for line in record.lines() {
                if let Some((field, value)) = line.split_once(':') {
                    match field {
                        "P" => pkg.name = value.to_owned(),
                        "V" => {
                            let (epoch, version, release) = split_version(value);
                            pkg.epoch = epoch;
                            pkg.version = version;
                            pkg.release = release;
                        }
                        _ => {}
                    }
                }
            }
            // 이름 없는 레코드는 형식 오류이므로 건너뜀
            if !pkg.name.is_empty() {
                packages.push(pkg);
            }
        }

        Ok(packages)
    }
}
