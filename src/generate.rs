//! End-to-end conversion runs.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::geo::dat;
use crate::group::group_all;
use crate::output::replace_output;
use crate::release::{is_up_to_date, Release, ReleaseClient};
use crate::types::Group;

/// Outcome of a [`release`] run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Rule-sets were regenerated; holds the number of files written
    Generated(usize),
    /// Destination already built from the latest source release
    AlreadyLatest,
}

/// Decode a geosite.dat buffer and regroup it
pub fn parse(data: &[u8]) -> Result<Vec<Group>> {
    let entries = dat::decode_geosite(data)?;
    Ok(group_all(&entries))
}

/// Convert a geosite.dat buffer into rule-set files under `output_dir`.
///
/// The buffer is fully decoded before the output directory is touched.
pub fn generate(data: &[u8], output_dir: &Path, workers: usize) -> Result<usize> {
    let groups = parse(data)?;
    info!("Parsed {} geosite groups", groups.len());
    replace_output(output_dir, groups, workers)
}

/// Convert a local geosite.dat file
pub fn generate_from_file(input: &Path, output_dir: &Path, workers: usize) -> Result<usize> {
    info!("Reading {}", input.display());
    generate(&fs::read(input)?, output_dir, workers)
}

/// Whether a run can stop before downloading.
///
/// A missing destination release never skips.
pub fn should_skip(no_skip: bool, destination: Option<&Release>, source: &Release) -> bool {
    match destination {
        Some(destination) if !no_skip => {
            is_up_to_date(destination.display_name(), source.display_name())
        }
        _ => false,
    }
}

/// Fetch the latest upstream release and regenerate rule-sets unless the
/// destination release is already up to date
pub fn release(config: &Config) -> Result<RunOutcome> {
    let client = ReleaseClient::new(config.api_base.as_str(), config.access_token.as_deref());

    let source = client.latest_release(&config.source)?;
    info!("Latest {} release: {}", config.source, source.display_name());

    let destination = match client.latest_release(&config.destination) {
        Ok(destination) => Some(destination),
        Err(e) => {
            warn!("missing destination latest release: {}", e);
            None
        }
    };

    if should_skip(config.no_skip, destination.as_ref(), &source) {
        info!("already latest");
        return Ok(RunOutcome::AlreadyLatest);
    }

    let data = client.download_geosite(&source)?;
    let written = generate(&data, &config.output_dir, config.workers)?;
    Ok(RunOutcome::Generated(written))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_named(name: &str) -> Release {
        Release {
            name: Some(name.to_string()),
            tag_name: name.to_string(),
            assets: Vec::new(),
        }
    }

    #[test]
    fn test_should_skip_when_destination_is_current() {
        let source = release_named("202410192212");
        let destination = release_named("Released on 202410192212");
        assert!(should_skip(false, Some(&destination), &source));
    }

    #[test]
    fn test_no_skip_forces_regeneration() {
        let source = release_named("202410192212");
        let destination = release_named("Released on 202410192212");
        assert!(!should_skip(true, Some(&destination), &source));
    }

    #[test]
    fn test_missing_destination_generates() {
        let source = release_named("202410192212");
        assert!(!should_skip(false, None, &source));
    }

    #[test]
    fn test_outdated_destination_generates() {
        let source = release_named("202410192212");
        let destination = release_named("Released on 202410182212");
        assert!(!should_skip(false, Some(&destination), &source));
    }

    #[test]
    fn test_release_with_unreachable_api_fails_before_output() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("rule-set");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("geosite-old.json"), "{}").unwrap();

        // nothing listens on the discard port
        let config = Config::new()
            .with_api_base("http://127.0.0.1:9")
            .with_output_dir(&out);

        assert!(release(&config).is_err());
        assert!(out.join("geosite-old.json").exists());
    }
}
