//! End-to-end packaging tests against the library API.

use imy_bundler::bundler::{
    Bundler, ChecksumAlgorithm, Manifest, PackReport, SettingsBuilder, builder::checksum,
};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Read,
    path::Path,
};

/// Input tree shaped like `pip install --target` output for two ABIs.
fn sample_input(root: &Path) {
    fs::create_dir_all(root.join("pkgA")).unwrap();
    fs::write(root.join("pkgA/mod.py"), b"VALUE = 1\n").unwrap();

    fs::create_dir_all(root.join("manylinux_x86_64")).unwrap();
    fs::write(root.join("manylinux_x86_64/lib.so"), b"\x7fELF x86_64").unwrap();
}

fn run(input: &Path, output: &Path, abis: &str, timestamp: i64) -> PackReport {
    let settings = SettingsBuilder::new()
        .input_directory(input)
        .output_directory(output)
        .python_version("311")
        .abis_from_list(abis)
        .timestamp(timestamp)
        .build()
        .unwrap();
    Bundler::new(settings).bundle().unwrap()
}

fn zip_contents(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut contents = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        contents.insert(entry.name().to_string(), data);
    }
    contents
}

fn read_manifest(output: &Path) -> Manifest {
    serde_json::from_str(&fs::read_to_string(output.join("build.json")).unwrap()).unwrap()
}

#[test]
fn end_to_end_example() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_input(input.path());

    let report = run(input.path(), output.path(), "manylinux_x86_64", 1_700_000_000);
    let out = output.path();

    assert_eq!(
        zip_contents(&out.join("requirements-pkgA.imy")),
        BTreeMap::from([("mod.py".to_string(), b"VALUE = 1\n".to_vec())])
    );
    assert_eq!(
        zip_contents(&out.join("requirements-manylinux_x86_64.imy")),
        BTreeMap::from([("lib.so".to_string(), b"\x7fELF x86_64".to_vec())])
    );
    assert_eq!(
        fs::read(out.join("native/manylinux_x86_64/lib.so")).unwrap(),
        b"\x7fELF x86_64"
    );
    assert_eq!(
        fs::read(out.join("native/common/lib.so")).unwrap(),
        b"\x7fELF x86_64"
    );

    let manifest = read_manifest(out);
    assert_eq!(manifest, report.manifest);
    assert_eq!(manifest.python_version, "311");
    assert!(manifest.extract_packages.is_empty());
    let keys: Vec<&str> = manifest.assets.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "bundle-py311-1700000000.zip",
            "native/common/lib.so",
            "native/manylinux_x86_64/lib.so",
            "requirements-manylinux_x86_64.imy",
            "requirements-pkgA.imy",
        ]
    );
    assert_eq!(report.bundle_path, out.join("bundle-py311-1700000000.zip"));
    assert_eq!(
        report.artifacts.last().map(|a| a.key.as_str()),
        Some("bundle-py311-1700000000.zip")
    );
}

#[test]
fn every_recorded_hash_matches_the_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_input(input.path());
    run(input.path(), output.path(), "manylinux_x86_64", 1);

    let manifest = read_manifest(output.path());
    for (key, digest) in &manifest.assets {
        let path = output.path().join(key);
        assert!(path.is_file(), "{key} is missing");
        let recomputed = checksum::calculate_checksum(&path, ChecksumAlgorithm::Sha1).unwrap();
        assert_eq!(&recomputed, digest, "hash mismatch for {key}");
    }
}

#[test]
fn bundle_holds_the_output_tree_but_not_itself() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_input(input.path());
    let report = run(input.path(), output.path(), "manylinux_x86_64", 7);

    let contents = zip_contents(&report.bundle_path);
    let names: Vec<&str> = contents.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        [
            "build.json",
            "native/common/lib.so",
            "native/manylinux_x86_64/lib.so",
            "requirements-manylinux_x86_64.imy",
            "requirements-pkgA.imy",
        ]
    );
    assert_eq!(
        contents["requirements-pkgA.imy"],
        fs::read(output.path().join("requirements-pkgA.imy")).unwrap()
    );

    // The bundled manifest predates the bundle entry.
    let bundled: Manifest = serde_json::from_slice(&contents["build.json"]).unwrap();
    assert!(!bundled.assets.contains_key("bundle-py311-7.zip"));
    assert_eq!(bundled.assets.len(), 4);
}

#[test]
fn repeated_runs_produce_identical_hashes() {
    let input = tempfile::tempdir().unwrap();
    sample_input(input.path());
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = run(input.path(), first.path(), "manylinux_x86_64", 100);
    let b = run(input.path(), second.path(), "manylinux_x86_64", 200);

    let stable = |m: &Manifest| -> BTreeMap<String, String> {
        m.assets
            .iter()
            .filter(|(k, _)| !k.starts_with("bundle-"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    };
    assert_eq!(stable(&a.manifest), stable(&b.manifest));
    assert_eq!(a.manifest.assets.len(), b.manifest.assets.len());
}

#[test]
fn rerun_into_same_output_keeps_fallback_contents() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_input(input.path());

    run(input.path(), output.path(), "manylinux_x86_64", 1);
    let before = fs::read(output.path().join("native/common/lib.so")).unwrap();
    let second = run(input.path(), output.path(), "manylinux_x86_64", 2);

    assert_eq!(
        fs::read(output.path().join("native/common/lib.so")).unwrap(),
        before
    );
    // Already present, so the second run does not re-record it.
    assert!(!second.manifest.assets.contains_key("native/common/lib.so"));
    // The first bundle is part of the output tree and gets bundled again.
    assert!(zip_contents(&second.bundle_path).contains_key("bundle-py311-1.zip"));
}

#[test]
fn nested_abi_libraries_collapse_and_missing_abis_are_skipped() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let abi = input.path().join("arm64-v8a");
    fs::create_dir_all(abi.join("numpy/core")).unwrap();
    fs::create_dir_all(abi.join("PIL")).unwrap();
    fs::write(abi.join("numpy/core/_umath.so"), b"umath").unwrap();
    fs::write(abi.join("PIL/_imaging.so"), b"imaging").unwrap();

    let report = run(input.path(), output.path(), "arm64-v8a armeabi-v7a arm64-v8a", 3);

    let native = output.path().join("native/arm64-v8a");
    assert_eq!(fs::read(native.join("_umath.so")).unwrap(), b"umath");
    assert_eq!(fs::read(native.join("_imaging.so")).unwrap(), b"imaging");
    assert!(!output.path().join("native/armeabi-v7a").exists());
    assert!(report.manifest.assets.contains_key("native/arm64-v8a/_umath.so"));
}

#[test]
fn sha256_and_custom_extension() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_input(input.path());

    let settings = SettingsBuilder::new()
        .input_directory(input.path())
        .output_directory(output.path().join("nested/out"))
        .python_version("312")
        .archive_extension("zip")
        .checksum(ChecksumAlgorithm::Sha256)
        .timestamp(5)
        .build()
        .unwrap();
    let report = Bundler::new(settings).bundle().unwrap();

    assert!(report.manifest.assets.contains_key("requirements-pkgA.zip"));
    assert!(report.manifest.assets.values().all(|digest| digest.len() == 64));
    assert!(output.path().join("nested/out/bundle-py312-5.zip").is_file());
}
