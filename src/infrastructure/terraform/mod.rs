//! Terraform CLI 설치기.
//! HashiCorp 릴리스에서 플랫폼별 zip을 받아 툴 캐시에 풀고, 설치 디렉터리를 반환한다.

pub mod releases;

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::application::ports::TerraformInstaller;

use releases::{ReleaseIndex, binary_name, index_url, release_arch, release_os};

pub struct HashiCorpReleaseInstaller {
    client: Client,
    releases_base: String,
    cache_root: PathBuf,
    github_path: Option<PathBuf>,
    os: &'static str,
    arch: &'static str,
}

impl HashiCorpReleaseInstaller {
    /// 툴 캐시 루트(`<root>/terraform/<version>/<arch>`)와 GITHUB_PATH 파일을 받아 생성한다.
    pub fn new(tool_cache: Option<PathBuf>, github_path: Option<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            releases_base: releases::DEFAULT_RELEASES_BASE.to_string(),
            cache_root: cache_root(tool_cache),
            github_path,
            os: release_os(env::consts::OS),
            arch: release_arch(env::consts::ARCH),
        }
    }

    pub fn with_releases_base(mut self, base: impl Into<String>) -> Self {
        self.releases_base = base.into();
        self
    }

    fn install_dir(&self, version: &str) -> PathBuf {
        self.cache_root.join(version).join(self.arch)
    }

    async fn fetch_index(&self, version: &str) -> Result<ReleaseIndex> {
        let url = index_url(&self.releases_base, version);
        debug!(%url, "finding terraform release");
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", "terraform-cdk-action")
            .send()
            .await
            .with_context(|| format!("failed to fetch terraform release index {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("failed to find terraform release {version} ({status})");
        }
        resp.json()
            .await
            .context("invalid terraform release index JSON")
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        Url::parse(url).with_context(|| format!("invalid terraform download URL '{url}'"))?;
        debug!(%url, "downloading terraform CLI");

        let resp = self
            .client
            .get(url)
            .header("User-Agent", "terraform-cdk-action")
            .send()
            .await
            .with_context(|| format!("unable to download terraform from {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("unable to download terraform from {url} ({status})");
        }
        let bytes = resp
            .bytes()
            .await
            .with_context(|| format!("unable to download terraform from {url}"))?;

        let mut file = fs::File::create(dest)
            .await
            .with_context(|| format!("failed to create {}", dest.display()))?;
        file.write_all(&bytes)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;
        file.flush().await?;
        Ok(())
    }

    /// 후속 step에서도 보이도록 GITHUB_PATH 파일에 디렉터리를 추가한다.
    async fn add_path(&self, dir: &Path) -> Result<()> {
        let Some(github_path) = &self.github_path else {
            return Ok(());
        };
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(github_path)
            .await
            .with_context(|| format!("failed to open {}", github_path.display()))?;
        file.write_all(format!("{}\n", dir.display()).as_bytes())
            .await
            .with_context(|| format!("failed to append to {}", github_path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("failed to flush {}", github_path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl TerraformInstaller for HashiCorpReleaseInstaller {
    #[instrument(skip(self))]
    async fn install(&self, version: &str) -> Result<PathBuf> {
        let version = version.trim();
        if version.is_empty() || version.contains(['/', '\\']) {
            bail!("invalid terraform version '{version}'");
        }

        let dir = self.install_dir(version);
        let binary = dir.join(binary_name(self.os));

        if binary.is_file() {
            info!(path = %dir.display(), "using cached terraform");
        } else {
            let index = self.fetch_index(version).await?;
            let Some(build) = index.build_for(self.os, self.arch) else {
                bail!(
                    "Terraform version {version} not available for {} and {}",
                    self.os,
                    self.arch
                );
            };
            debug!(version = %index.version, os = self.os, arch = self.arch, "selected build");

            fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            let archive = dir.join(build.archive_name(version));
            self.download(&build.url, &archive).await?;
            extract_zip(&archive, &dir).await?;
            discard_archive(&archive).await;

            if !binary.is_file() {
                bail!(
                    "terraform binary missing after extracting {}",
                    archive.display()
                );
            }
            info!(path = %dir.display(), "installed terraform");
        }

        self.add_path(&dir).await?;
        Ok(dir)
    }
}

fn cache_root(tool_cache: Option<PathBuf>) -> PathBuf {
    tool_cache
        .or_else(|| dirs::cache_dir().map(|d| d.join("terraform-cdk-action")))
        .unwrap_or_else(|| env::temp_dir().join("terraform-cdk-action"))
        .join("terraform")
}

/// 압축을 푼 zip을 지운다. 실패해도 설치는 계속하고 경고만 남긴다.
async fn discard_archive(archive: &Path) -> bool {
    match fs::remove_file(archive).await {
        Ok(()) => true,
        Err(err) => {
            warn!(archive = %archive.display(), error = %err, "failed to remove terraform archive");
            false
        }
    }
}

/// 플랫폼 압축 해제 도구(unzip, Windows는 tar)로 zip을 푼다.
async fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    debug!(archive = %archive.display(), "extracting terraform CLI zip file");

    let (program, args) = if cfg!(windows) {
        (
            "tar",
            vec![OsStr::new("-xf"), archive.as_os_str(), OsStr::new("-C"), dest.as_os_str()],
        )
    } else {
        (
            "unzip",
            vec![
                OsStr::new("-o"),
                OsStr::new("-q"),
                archive.as_os_str(),
                OsStr::new("-d"),
                dest.as_os_str(),
            ],
        )
    };

    let program_path =
        which::which(program).with_context(|| format!("'{program}' not found in PATH"))?;

    let output = Command::new(program_path)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await
        .with_context(|| format!("failed to run {program}"))?;

    if !output.status.success() {
        bail!(
            "{program} failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
