use super::*;

fn request(extensions: &[&str]) -> OpenDialogRequest {
    OpenDialogRequest {
        allow_multiple: false,
        choose_directories: false,
        title: "Open File".to_string(),
        initial_dir: PathBuf::from("/proj"),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
    }
}

#[test]
fn test_io_error_mapping() {
    let not_found = io::Error::from(io::ErrorKind::NotFound);
    assert_eq!(
        FileErrorCode::from_io(&not_found, FileAccess::Read),
        FileErrorCode::NotFound
    );

    let denied = io::Error::from(io::ErrorKind::PermissionDenied);
    assert_eq!(
        FileErrorCode::from_io(&denied, FileAccess::Read),
        FileErrorCode::NotReadable
    );
    assert_eq!(
        FileErrorCode::from_io(&denied, FileAccess::Write),
        FileErrorCode::NoModificationAllowed
    );

    let invalid_utf8 = io::Error::from(io::ErrorKind::InvalidData);
    assert_eq!(
        FileErrorCode::from_io(&invalid_utf8, FileAccess::Read),
        FileErrorCode::NotReadable
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_unmapped_os_error_keeps_raw_code() {
    // ENOSPC
    let err = io::Error::from_raw_os_error(28);
    assert_eq!(
        FileErrorCode::from_io(&err, FileAccess::Write),
        FileErrorCode::Os(28)
    );
}

#[test]
fn test_codes_are_stable() {
    assert_eq!(FileErrorCode::NotFound.code(), 1);
    assert_eq!(FileErrorCode::NotReadable.code(), 4);
    assert_eq!(FileErrorCode::NoModificationAllowed.code(), 6);
    assert_eq!(FileErrorCode::PathExists.code(), 12);
    assert_eq!(FileErrorCode::Os(99).code(), 99);
}

#[test]
fn test_file_error_display() {
    let err = FileError::new(FileErrorCode::NotFound, "/test").with_detail("gone");
    let text = err.to_string();
    assert!(text.contains("/test"));
    assert!(text.contains("gone"));
}

#[test]
fn test_dialog_extension_filter() {
    let req = request(&["js", "css"]);
    assert!(req.accepts(Path::new("/proj/a.js")));
    assert!(req.accepts(Path::new("/proj/STYLE.CSS")));
    assert!(!req.accepts(Path::new("/proj/readme.md")));
    assert!(!req.accepts(Path::new("/proj/Makefile")));
    assert!(request(&[]).accepts(Path::new("/proj/Makefile")));
}
