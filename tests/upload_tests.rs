use std::path::PathBuf;

use gamedex_server::upload::{sanitize_filename, store_file};

/// Fresh per-test directory so collision probes start from a known state.
fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gamedex_upload_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn spaces_become_underscores() {
    assert_eq!(sanitize_filename("cover art 1.png"), "cover_art_1.png");
    assert_eq!(sanitize_filename("plain.png"), "plain.png");
}

#[tokio::test]
async fn stores_under_original_name_when_free() {
    let dir = temp_dir("free");
    let name = store_file(&dir, "cover.png", b"png").await.expect("store");

    assert_eq!(name, "cover.png");
    assert_eq!(std::fs::read(dir.join("cover.png")).expect("read back"), b"png");
}

#[tokio::test]
async fn duplicate_names_get_numbered_suffixes() {
    let dir = temp_dir("dups");

    let first = store_file(&dir, "cover.png", b"a").await.expect("store 1");
    let second = store_file(&dir, "cover.png", b"b").await.expect("store 2");
    let third = store_file(&dir, "cover.png", b"c").await.expect("store 3");

    assert_eq!(first, "cover.png");
    assert_eq!(second, "cover_1.png");
    assert_eq!(third, "cover_2.png");

    // all three retrievable with their own content
    assert_eq!(std::fs::read(dir.join("cover.png")).expect("read"), b"a");
    assert_eq!(std::fs::read(dir.join("cover_1.png")).expect("read"), b"b");
    assert_eq!(std::fs::read(dir.join("cover_2.png")).expect("read"), b"c");
}

#[tokio::test]
async fn sanitized_names_still_probe() {
    let dir = temp_dir("sanitized");

    let first = store_file(&dir, "shot 1.png", b"a").await.expect("store 1");
    let second = store_file(&dir, "shot 1.png", b"b").await.expect("store 2");

    assert_eq!(first, "shot_1.png");
    assert_eq!(second, "shot_1_1.png");
}

#[tokio::test]
async fn no_extension_appends_suffix_at_end() {
    let dir = temp_dir("noext");

    let first = store_file(&dir, "README", b"a").await.expect("store 1");
    let second = store_file(&dir, "README", b"b").await.expect("store 2");

    assert_eq!(first, "README");
    assert_eq!(second, "README_1");
}

#[tokio::test]
async fn leading_dot_is_not_an_extension() {
    let dir = temp_dir("dotfile");

    let first = store_file(&dir, ".env", b"a").await.expect("store 1");
    let second = store_file(&dir, ".env", b"b").await.expect("store 2");

    assert_eq!(first, ".env");
    assert_eq!(second, ".env_1");
}
