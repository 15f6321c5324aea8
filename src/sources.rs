/*! Raw corpus acquisition.

Downloads the recipe's archives into `orig/`, verifies them against a
sha256 sidecar file so that a re-run of an interrupted fetch does not
pull multi-gigabyte tarballs again, and unpacks them in place. One
archive (giga-fren) contains further gzip members that need a second
decompression pass.

Raw corpus files are looked up anywhere below the original-data tree by
exact filename. A lookup that matches several files is an error rather
than a silent first-match pick, since picking one candidate by directory
order would make the produced corpus depend on filesystem layout.
!*/
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::read::{GzDecoder, MultiGzDecoder};
use log::{info, warn};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::Error;
use crate::recipe::Recipe;

/// Filename component of an archive URL.
pub fn archive_filename(url: &str) -> Result<String, Error> {
    let parsed = Url::parse(url)?;
    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Custom(format!("no filename in url {}", url)))
}

fn file_sha256(path: &Path) -> Result<String, Error> {
    let mut hasher = Sha256::new();
    let mut file = File::open(path)?;
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Download `url` into `dest_dir`, writing a `<name>.sha256` sidecar.
/// A file whose sidecar still matches is not downloaded again.
fn download(client: &reqwest::blocking::Client, url: &str, dest_dir: &Path) -> Result<PathBuf, Error> {
    let name = archive_filename(url)?;
    let target = dest_dir.join(&name);
    let sidecar = dest_dir.join(format!("{}.sha256", name));

    if target.is_file() && sidecar.is_file() {
        let recorded = std::fs::read_to_string(&sidecar)?;
        let recorded = recorded.split_whitespace().next().unwrap_or_default().to_string();
        if recorded == file_sha256(&target)? {
            info!("{} already downloaded, skipping", name);
            return Ok(target);
        }
        warn!("{} does not match its recorded checksum, downloading again", name);
    }

    info!("downloading {}", url);
    let mut response = client.get(url).send()?.error_for_status()?;
    let mut file = File::create(&target)?;
    io::copy(&mut response, &mut file)?;

    let hash = file_sha256(&target)?;
    let mut checksum_file = File::create(&sidecar)?;
    writeln!(&mut checksum_file, "{} {}", hash, name)?;

    Ok(target)
}

/// Unpack an archive into `dest_dir` according to its suffix.
fn extract(archive: &Path, dest_dir: &Path) -> Result<(), Error> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!("extracting {}", name);

    if name.ends_with(".tgz") || name.ends_with(".tar.gz") {
        let tarball = GzDecoder::new(File::open(archive)?);
        tar::Archive::new(tarball).unpack(dest_dir)?;
    } else if name.ends_with(".tar") {
        tar::Archive::new(File::open(archive)?).unpack(dest_dir)?;
    } else {
        return Err(Error::Custom(format!(
            "unsupported archive format: {}",
            archive.display()
        )));
    }
    Ok(())
}

/// Decompress extracted members matching `pattern`, dropping the `.gz`
/// suffix and removing the compressed original.
fn gunzip_members(dest_dir: &Path, pattern: &str) -> Result<(), Error> {
    let pattern = format!("{}/**/{}", dest_dir.display(), pattern);
    for entry in glob::glob(&pattern)? {
        let gz_path = entry?;
        let plain_path = gz_path.with_extension("");
        info!("decompressing {:?}", gz_path.file_name());

        let mut decoder = MultiGzDecoder::new(File::open(&gz_path)?);
        let mut out = File::create(&plain_path)?;
        io::copy(&mut decoder, &mut out)?;
        std::fs::remove_file(&gz_path)?;
    }
    Ok(())
}

/// Fetch and unpack every archive of `recipe` into `orig_dir`.
pub fn fetch_all(recipe: &Recipe, orig_dir: &Path) -> Result<(), Error> {
    // archives are multi-gigabyte, so no request timeout
    let client = reqwest::blocking::Client::builder().timeout(None).build()?;

    for archive in &recipe.archives {
        let path = download(&client, archive.url, orig_dir)?;
        extract(&path, orig_dir)?;
        if let Some(pattern) = archive.gunzip_members {
            gunzip_members(orig_dir, pattern)?;
        }
    }
    Ok(())
}

/// Locate exactly one file named `filename` anywhere under `root`.
pub fn find_unique(root: &Path, filename: &str) -> Result<PathBuf, Error> {
    let pattern = format!("{}/**/{}", root.display(), filename);
    let mut matches = Vec::new();
    for entry in glob::glob(&pattern)? {
        matches.push(entry?);
    }

    if matches.is_empty() {
        return Err(Error::MissingSource { pattern });
    }
    if matches.len() > 1 {
        return Err(Error::AmbiguousSource { pattern, matches });
    }
    Ok(matches.swap_remove(0))
}
