//! GitHub release lookup and geosite.dat download.

use std::io::Read;

use base64::Engine;
use log::info;
use serde::Deserialize;

use crate::error::{GeositeError, ReleaseErrorKind, Result};

mod checksum;

pub use checksum::{sha256_hex, verify_sha256sum};

/// Default GitHub API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Asset holding the V2Ray geosite database
pub const GEOSITE_ASSET: &str = "geosite.dat";

/// Asset holding the database's `sha256sum` line
pub const GEOSITE_CHECKSUM_ASSET: &str = "geosite.dat.sha256sum";

const USER_AGENT: &str = concat!("sing-geosite/", env!("CARGO_PKG_VERSION"));

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Release name, falling back to the tag
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }

    /// Find an asset by file name
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Whether the destination release already covers the source release.
///
/// Destination releases are named after the upstream release they were built
/// from, so containment of the source name means there is nothing new.
pub fn is_up_to_date(destination_name: &str, source_name: &str) -> bool {
    !source_name.is_empty() && destination_name.contains(source_name)
}

/// Split `owner/name` into its parts
pub fn parse_repository(repository: &str) -> Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(GeositeError::Config(format!(
            "Invalid repository {:?}, expected owner/name",
            repository
        ))),
    }
}

/// Blocking GitHub release client
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    api_base: String,
    /// Pre-encoded `Authorization` header value
    authorization: Option<String>,
}

impl ReleaseClient {
    /// Create a client for the given API endpoint.
    ///
    /// With an access token, API requests use basic auth with the token as
    /// the user name.
    pub fn new(api_base: impl Into<String>, access_token: Option<&str>) -> Self {
        let authorization = access_token.map(|token| {
            let credentials = format!("{}:", token);
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode(credentials)
            )
        });

        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            authorization,
        }
    }

    /// Fetch the latest release of `owner/name`
    pub fn latest_release(&self, repository: &str) -> Result<Release> {
        let (owner, name) = parse_repository(repository)?;
        let url = format!("{}/repos/{}/{}/releases/latest", self.api_base, owner, name);

        let mut request = ureq::get(url.as_str())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(ref authorization) = self.authorization {
            request = request.header("Authorization", authorization.as_str());
        }

        let response = request.call().map_err(|e| {
            GeositeError::release(
                ReleaseErrorKind::RequestFailed,
                format!("Failed to fetch latest release of {}: {}", repository, e),
            )
        })?;

        let (_, body) = response.into_parts();
        serde_json::from_reader(body.into_reader()).map_err(|e| {
            GeositeError::release(
                ReleaseErrorKind::InvalidResponse,
                format!("Invalid release response for {}: {}", repository, e),
            )
        })
    }

    /// Download a URL into memory
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        info!("Downloading {}", url);

        let response = ureq::get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| {
                GeositeError::release(
                    ReleaseErrorKind::RequestFailed,
                    format!("Download of {} failed: {}", url, e),
                )
            })?;

        let (_, body) = response.into_parts();
        let mut data = Vec::new();
        body.into_reader().read_to_end(&mut data).map_err(|e| {
            GeositeError::release(
                ReleaseErrorKind::InvalidResponse,
                format!("Failed to read {}: {}", url, e),
            )
        })?;
        Ok(data)
    }

    /// Download `geosite.dat` from a release and verify it against the
    /// published checksum
    pub fn download_geosite(&self, release: &Release) -> Result<Vec<u8>> {
        let data_asset = find_asset(release, GEOSITE_ASSET)?;
        let checksum_asset = find_asset(release, GEOSITE_CHECKSUM_ASSET)?;

        let data = self.download(&data_asset.browser_download_url)?;
        let checksum = self.download(&checksum_asset.browser_download_url)?;
        verify_sha256sum(&data, &checksum)?;

        Ok(data)
    }
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None)
    }
}

fn find_asset<'a>(release: &'a Release, name: &str) -> Result<&'a ReleaseAsset> {
    release.asset(name).ok_or_else(|| {
        GeositeError::release(
            ReleaseErrorKind::AssetNotFound,
            format!("{} not found in upstream release {}", name, release.display_name()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASE_JSON: &str = r#"{
        "name": "Released on 202410192212",
        "tag_name": "202410192212",
        "draft": false,
        "assets": [
            {
                "name": "geosite.dat",
                "size": 12,
                "browser_download_url": "https://example.com/geosite.dat"
            },
            {
                "name": "geosite.dat.sha256sum",
                "browser_download_url": "https://example.com/geosite.dat.sha256sum"
            }
        ]
    }"#;

    #[test]
    fn test_release_deserialize() {
        let release: Release = serde_json::from_str(RELEASE_JSON).unwrap();
        assert_eq!(release.display_name(), "Released on 202410192212");
        assert_eq!(release.assets.len(), 2);
        assert_eq!(
            release.asset(GEOSITE_ASSET).unwrap().browser_download_url,
            "https://example.com/geosite.dat"
        );
    }

    #[test]
    fn test_release_name_falls_back_to_tag() {
        let release: Release =
            serde_json::from_str(r#"{"name": null, "tag_name": "v1", "assets": []}"#).unwrap();
        assert_eq!(release.display_name(), "v1");
    }

    #[test]
    fn test_missing_asset_is_error() {
        let release: Release =
            serde_json::from_str(r#"{"name": "r", "tag_name": "v1", "assets": []}"#).unwrap();
        let err = find_asset(&release, GEOSITE_ASSET).unwrap_err();
        assert!(matches!(
            err,
            GeositeError::Release {
                kind: ReleaseErrorKind::AssetNotFound,
                ..
            }
        ));
        assert!(err.to_string().contains("geosite.dat not found"));
    }

    #[test]
    fn test_is_up_to_date() {
        assert!(is_up_to_date("Released on 202410192212", "202410192212"));
        assert!(!is_up_to_date("Released on 202410182212", "202410192212"));
        assert!(!is_up_to_date("anything", ""));
    }

    #[test]
    fn test_parse_repository() {
        assert_eq!(
            parse_repository("Loyalsoldier/v2ray-rules-dat").unwrap(),
            ("Loyalsoldier", "v2ray-rules-dat")
        );
        assert!(parse_repository("no-slash").is_err());
        assert!(parse_repository("/name").is_err());
    }

    #[test]
    fn test_client_basic_auth_header() {
        let client = ReleaseClient::new("https://api.github.com/", Some("token"));
        assert_eq!(client.api_base, "https://api.github.com");
        // base64("token:")
        assert_eq!(client.authorization.as_deref(), Some("Basic dG9rZW46"));

        assert!(ReleaseClient::default().authorization.is_none());
    }
}
