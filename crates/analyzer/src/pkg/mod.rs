//! 패키지 분석기 — OS 패키지 데이터베이스 파서
//!
//! 이미지에서 추출한 패키지 데이터베이스 파일을 파싱해 설치 패키지를
//! 열거합니다. 레지스트리는 등록 순서대로 분석기를 시도하고 첫 성공에서
//! 멈추므로, 각 분석기는 자신의 데이터베이스 파일이 없으면 오류를
//! 반환해 다음 분석기로 넘어가게 합니다.

pub mod apk;
pub mod dpkg;

pub use apk::ApkAnalyzer;
pub use dpkg::DpkgAnalyzer;

/// `[epoch:]version[-release]` 형식의 버전 문자열을 분해합니다.
///
/// - 에포크: 첫 `:` 앞의 숫자. 숫자가 아니면 에포크 없는 것으로 보고
///   전체를 버전으로 취급합니다.
/// - 릴리스: 마지막 `-` 뒤. 없으면 빈 문자열입니다.
///
/// `Package::full_version`이 만드는 문자열을 그대로 되돌립니다.
pub(crate) fn split_version(raw: &str) -> (u32, String, String) {
    let (epoch, remainder) = match raw.split_once(':') {
        Some((head, tail)) => match head.parse::<u32>() {
            Ok(epoch) => (epoch, tail),
            Err(_) => (0, raw),
        },
        None => (0, raw),
    };

    match remainder.rsplit_once('-') {
        Some((version, release)) => (epoch, version.to_owned(), release.to_owned()),
        None => (epoch, remainder.to_owned(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_version() {
        assert_eq!(split_version("1.2.4"), (0, "1.2.4".to_owned(), String::new()));
    }

    #[test]
    fn version_with_release() {
        assert_eq!(
            split_version("1.2.4-r2"),
            (0, "1.2.4".to_owned(), "r2".to_owned())
        );
    }

    #[test]
    fn version_with_epoch_and_release() {
        assert_eq!(
            split_version("2:9.0-3"),
            (2, "9.0".to_owned(), "3".to_owned())
        );
    }

    #[test]
    fn release_splits_at_last_hyphen() {
        // 업스트림 버전 자체에 하이픈이 들어 있는 경우
        assert_eq!(
            split_version("1.0-beta-2"),
            (0, "1.0-beta".to_owned(), "2".to_owned())
        );
    }

    #[test]
    fn non_numeric_epoch_stays_in_version() {
        assert_eq!(
            split_version("abc:1.2"),
            (0, "abc:1.2".to_owned(), String::new())
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(split_version(""), (0, String::new(), String::new()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use strata_core::types::Package;

        proptest! {
            /// 임의 입력에서 패닉하지 않고, 릴리스에는 하이픈이 남지 않는다.
            #[test]
            fn split_never_panics(raw in ".*") {
                let (_, _, release) = split_version(&raw);
                prop_assert!(!release.contains('-'));
            }

            /// full_version으로 합친 문자열을 원래 구성 요소로 되돌린다.
            #[test]
            fn roundtrips_full_version(
                epoch in 0u32..100,
                version in "[0-9][A-Za-z0-9.]{0,8}",
                release in "([0-9A-Za-z.]{1,6})?",
            ) {
                let pkg = Package {
                    name: "sample".to_owned(),
                    version: version.clone(),
                    release: release.clone(),
                    epoch,
                    ..Package::default()
                };
                let (e, v, r) = split_version(&pkg.full_version());
                prop_assert_eq!(e, epoch);
                prop_assert_eq!(v, version);
                prop_assert_eq!(r, release);
            }
        }
    }
}
