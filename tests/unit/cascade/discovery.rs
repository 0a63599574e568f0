use super::*;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn folder_sources_sort_numerically_and_skip_non_matching() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("ship");
    std::fs::create_dir(&dir).unwrap();
    for n in ["a2.png", "a10.png", "a1.png", "notes.txt", "b.png"] {
        touch(&dir, n);
    }

    let found = discover_inputs(&dir, root.path()).unwrap();
    assert_eq!(found.table_name, "ship");
    assert_eq!(names(&found.sources), vec!["a1.png", "a2.png", "a10.png"]);
    assert_eq!(found.parent_dir, root.path());
}

#[test]
fn only_the_first_digit_run_is_the_key() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("frames");
    std::fs::create_dir(&dir).unwrap();
    for n in ["v2_frame100.png", "v10_frame1.png", "v3.PNG", "v1.png.bak", "007.png"] {
        touch(&dir, n);
    }
    std::fs::create_dir(dir.join("v4.png")).unwrap();

    let found = discover_inputs(&dir, root.path()).unwrap();
    assert_eq!(
        names(&found.sources),
        vec!["v2_frame100.png", "007.png", "v10_frame1.png"]
    );
}

#[test]
fn equal_keys_keep_name_order() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("t");
    std::fs::create_dir(&dir).unwrap();
    for n in ["b1.png", "a01.png", "c1.png"] {
        touch(&dir, n);
    }
    let found = discover_inputs(&dir, root.path()).unwrap();
    assert_eq!(names(&found.sources), vec!["a01.png", "b1.png", "c1.png"]);
}

#[test]
fn single_file_uses_its_stem() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "tree.png");

    let found = discover_inputs(Path::new("tree.png"), root.path()).unwrap();
    assert_eq!(found.table_name, "tree");
    assert_eq!(found.sources, vec![root.path().join("tree.png")]);
    assert_eq!(found.parent_dir, root.path());
}

#[test]
fn missing_input_is_reported() {
    let root = tempfile::tempdir().unwrap();
    let err = discover_inputs(Path::new("ghost"), root.path()).unwrap_err();
    match err {
        TableError::InputNotFound(p) => assert_eq!(p, root.path().join("ghost")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn digit_run_helpers() {
    assert_eq!(first_digit_run("a12b34"), Some("12"));
    assert_eq!(first_digit_run("007"), Some("007"));
    assert_eq!(first_digit_run("none"), None);

    assert_eq!(cmp_numeric("2", "10"), Ordering::Less);
    assert_eq!(cmp_numeric("007", "7"), Ordering::Equal);
    assert_eq!(
        cmp_numeric("99999999999999999999999", "100000000000000000000000"),
        Ordering::Less
    );
    assert_eq!(cmp_numeric("0", "000"), Ordering::Equal);
}
