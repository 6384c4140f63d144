use mediasort_core::{Category, Preset, classify};
use std::path::{Path, PathBuf};

#[test]
fn test_preset_construction() {
    let preset = Preset::new("sd card", "/Volumes/EOS_DIGITAL", "/home/me/Pictures/Import");

    assert_eq!(preset.name, "sd card");
    assert_eq!(preset.source, PathBuf::from("/Volumes/EOS_DIGITAL"));
    assert_eq!(preset.destination, PathBuf::from("/home/me/Pictures/Import"));

    let same = Preset::new(
        String::from("sd card"),
        PathBuf::from("/Volumes/EOS_DIGITAL"),
        PathBuf::from("/home/me/Pictures/Import"),
    );
    assert_eq!(preset, same);
}

#[test]
fn test_classify_nested_paths() {
    let path = Path::new("/Volumes/CARD/DCIM/100CANON/IMG_0042.CR3");
    assert_eq!(classify(path), None);

    let path = Path::new("/Volumes/CARD/DCIM/100CANON/IMG_0042.JPG");
    assert_eq!(classify(path).map(Category::folder_name), Some("JPEG"));

    let path = Path::new("/Volumes/SSD/A001/A001_C003.braw");
    assert_eq!(classify(path), Some(Category::Braw));
}

#[test]
fn test_classify_requires_extension() {
    assert_eq!(classify(Path::new("/tmp/jpg")), None);
    assert_eq!(classify(Path::new("/tmp/photos.d/readme")), None);
}
