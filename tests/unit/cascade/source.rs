use super::*;

#[test]
fn open_reads_native_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame1.png");
    image::RgbImage::new(48, 27).save(&path).unwrap();

    let src = SourceImage::open(&path).unwrap();
    assert_eq!(src.dimensions, Some((48, 27)));
    assert_eq!(src.path, path);
}

#[test]
fn missing_file_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.png");
    let err = SourceImage::open(&missing).unwrap_err();
    assert!(matches!(err, TableError::InputNotFound(_)));
    assert!(matches!(
        SourceImage::probe(&missing).unwrap_err(),
        TableError::InputNotFound(_)
    ));
}

#[test]
fn undecodable_file_is_an_image_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(matches!(
        SourceImage::open(&path).unwrap_err(),
        TableError::Image(_)
    ));
}

#[test]
fn probe_keeps_undecodable_files_with_unknown_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ship.svg");
    std::fs::write(&path, b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();

    let src = SourceImage::probe(&path).unwrap();
    assert_eq!(src.path, path);
    assert_eq!(src.dimensions, None);

    let png = dir.path().join("ok.png");
    image::RgbImage::new(6, 3).save(&png).unwrap();
    assert_eq!(SourceImage::probe(&png).unwrap().dimensions, Some((6, 3)));
}
