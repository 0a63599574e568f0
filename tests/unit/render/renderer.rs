use super::*;

#[test]
fn scoped_render_is_removed_on_drop() {
    let scoped = ScopedRender::acquire().unwrap();
    let dir = scoped.dir().to_path_buf();
    let path = scoped.path().to_path_buf();
    assert!(dir.is_dir());
    assert_eq!(path.parent(), Some(dir.as_path()));
    assert_eq!(path.file_name().unwrap(), "render.png");

    std::fs::write(&path, b"frame").unwrap();
    drop(scoped);
    assert!(!path.exists());
    assert!(!dir.exists());
}

#[test]
fn each_acquire_gets_its_own_location() {
    let a = ScopedRender::acquire().unwrap();
    let b = ScopedRender::acquire().unwrap();
    assert_ne!(a.path(), b.path());
}
