//! Cache manager behaviour against seeded, fully local cache directories.

mod common;

use std::fs;
use std::path::Path;

use postal2nuts::cache::download_archive;
use postal2nuts::{CacheManager, Country, NutsConfig, NutsError, NutsYear};

fn nl_config(cache_dir: &Path) -> NutsConfig {
    NutsConfig {
        country: Country::NL,
        year: NutsYear::Y2021,
        cache_dir: cache_dir.to_path_buf(),
        force_download: false,
    }
}

/// Place a pre-built archive where the manager expects to download it.
fn seed_archive(manager: &CacheManager, bytes: &[u8]) -> postal2nuts::CacheEntry {
    let entry = manager.resolve();
    fs::create_dir_all(&entry.directory).unwrap();
    fs::write(&entry.archive_path, bytes).unwrap();
    entry
}

#[tokio::test]
async fn extracts_the_csv_payload_from_a_present_archive() {
    let temp = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(nl_config(temp.path()));
    let zip = common::zip_with_payload("pc2020_NL.csv", common::NL_TABLE.as_bytes(), false);
    let entry = seed_archive(&manager, &zip);

    let path = manager.ensure_available(&entry).await.unwrap();

    assert_eq!(path, entry.extracted_path);
    assert_eq!(fs::read_to_string(&path).unwrap(), common::NL_TABLE);
}

#[tokio::test]
async fn deflated_archives_extract_too() {
    let temp = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(nl_config(temp.path()));
    let table = common::NL_TABLE.repeat(40);
    let zip = common::zip_with_payload("pc2020_NL.csv", table.as_bytes(), true);
    let entry = seed_archive(&manager, &zip);

    let path = manager.ensure_available(&entry).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), table);
}

#[tokio::test]
async fn second_call_is_a_pure_cache_hit() {
    let temp = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(nl_config(temp.path()));
    let zip = common::zip_with_payload("pc2020_NL.csv", common::NL_TABLE.as_bytes(), false);
    let entry = seed_archive(&manager, &zip);

    let first = manager.ensure_available(&entry).await.unwrap();

    // Removing the archive proves the second call touches neither the
    // network nor the extraction path.
    fs::remove_file(&entry.archive_path).unwrap();
    let second = manager.ensure_available(&entry).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), common::NL_TABLE);
}

#[tokio::test]
async fn corrupt_archives_are_an_archive_error() {
    let temp = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(nl_config(temp.path()));
    let entry = seed_archive(&manager, b"definitely not a zip archive");

    let err = manager.ensure_available(&entry).await.unwrap_err();
    assert!(matches!(err, NutsError::Archive { .. }));
}

#[tokio::test]
async fn archives_without_a_csv_payload_are_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(nl_config(temp.path()));
    let zip = common::zip_with_payload("readme.txt", b"no table here", false);
    let entry = seed_archive(&manager, &zip);

    let err = manager.ensure_available(&entry).await.unwrap_err();
    assert!(matches!(err, NutsError::Archive { .. }));
}

#[tokio::test]
async fn unreachable_remotes_are_a_fetch_error() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("archive.zip");

    // Port 1 on localhost refuses connections immediately.
    let err = download_archive("http://127.0.0.1:1/data.zip", &dest)
        .await
        .unwrap_err();

    match err {
        NutsError::Fetch { url, .. } => assert_eq!(url, "http://127.0.0.1:1/data.zip"),
        other => panic!("expected a fetch error, got {other:?}"),
    }
    assert!(!dest.exists());
}
