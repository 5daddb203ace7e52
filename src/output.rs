use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use log::{debug, info};
use parking_lot::Mutex;

use crate::compile::compile;
use crate::error::{GeositeError, Result};
use crate::ruleset::SourceRuleSet;
use crate::types::Group;

/// Default number of writer threads
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Compile one group and write it as `geosite-<name>.json` into `dir`
pub fn write_group(dir: &Path, group: &Group) -> Result<PathBuf> {
    let path = dir.join(group.file_name());
    let rule_set = SourceRuleSet::new(compile(&group.items));

    let mut writer = BufWriter::new(File::create(&path)?);
    rule_set.write_to(&mut writer)?;
    writer.flush()?;

    debug!("Wrote {} ({} items)", path.display(), group.items.len());
    Ok(path)
}

/// Write all groups into `dir` using up to `workers` threads.
///
/// Workers pull groups from a shared queue; the first error stops the
/// remaining work and is returned.
pub fn write_groups(dir: &Path, groups: Vec<Group>, workers: usize) -> Result<usize> {
    let total = groups.len();
    let workers = workers.clamp(1, total.max(1));
    let queue = Mutex::new(groups.into_iter());
    let failure = Mutex::new(None);

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                if failure.lock().is_some() {
                    break;
                }
                let Some(group) = queue.lock().next() else {
                    break;
                };
                if let Err(e) = write_group(dir, &group) {
                    failure.lock().get_or_insert(e);
                    break;
                }
            });
        }
    });

    match failure.into_inner() {
        Some(e) => Err(e),
        None => Ok(total),
    }
}

/// Replace `output_dir` with a freshly written set of group files.
///
/// Files are written into a sibling staging directory first; the old output
/// directory is only removed once every file has been written.
pub fn replace_output(output_dir: &Path, groups: Vec<Group>, workers: usize) -> Result<usize> {
    let output_dir = resolve_output_dir(output_dir)?;
    let output_dir = output_dir.as_path();
    let staging = staging_dir(output_dir).ok_or_else(|| {
        GeositeError::Config(format!(
            "Output directory {} has no name",
            output_dir.display()
        ))
    })?;

    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let written = match write_groups(&staging, groups, workers) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
    };

    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::rename(&staging, output_dir)?;

    info!("Wrote {} rule-sets to {}", written, output_dir.display());
    Ok(written)
}

/// Resolve an existing output directory to its canonical path.
///
/// The directory is removed wholesale, so it must not be the working
/// directory or one of its ancestors.
fn resolve_output_dir(output_dir: &Path) -> Result<PathBuf> {
    if !output_dir.exists() {
        return Ok(output_dir.to_path_buf());
    }

    let resolved = fs::canonicalize(output_dir)?;
    let cwd = env::current_dir()?;
    let cwd = fs::canonicalize(&cwd).unwrap_or(cwd);
    if cwd.starts_with(&resolved) {
        return Err(GeositeError::Config(format!(
            "Output directory {} contains the working directory",
            output_dir.display()
        )));
    }
    Ok(resolved)
}

/// `<output>.tmp` next to the output directory
fn staging_dir(output_dir: &Path) -> Option<PathBuf> {
    let mut name = output_dir.file_name()?.to_os_string();
    name.push(".tmp");
    Some(output_dir.with_file_name(name))
}
