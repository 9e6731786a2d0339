//! releases.hashicorp.com 인덱스 스키마와 플랫폼 매핑.

use serde::Deserialize;

pub const DEFAULT_RELEASES_BASE: &str = "https://releases.hashicorp.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseIndex {
    pub version: String,
    #[serde(default)]
    pub builds: Vec<ReleaseBuild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseBuild {
    pub os: String,
    pub arch: String,
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ReleaseBuild {
    /// 캐시 디렉터리에 저장할 zip 파일 이름.
    /// 인덱스의 filename이 경로 요소를 포함하면 버전 기반 이름을 쓴다.
    pub fn archive_name(&self, version: &str) -> String {
        match self.filename.as_deref() {
            Some(name) if is_plain_file_name(name) => name.to_string(),
            _ => format!("terraform_{version}.zip"),
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', ':'])
}

impl ReleaseIndex {
    pub fn build_for(&self, os: &str, arch: &str) -> Option<&ReleaseBuild> {
        self.builds.iter().find(|b| b.os == os && b.arch == arch)
    }
}

pub fn index_url(releases_base: &str, version: &str) -> String {
    format!(
        "{}/terraform/{}/index.json",
        releases_base.trim_end_matches('/'),
        version
    )
}

/// Rust 타깃 OS 이름을 릴리스 OS 이름으로 변환한다.
pub fn release_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Rust 타깃 아키텍처 이름을 릴리스 아키텍처 이름으로 변환한다.
pub fn release_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        other => other,
    }
}

pub fn binary_name(os: &str) -> &'static str {
    if os == "windows" {
        "terraform.exe"
    } else {
        "terraform"
    }
}
