use std::fs;
use topicforge_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("output").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn file_in_place_of_output_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("output");
    fs::write(&file_path, "x").unwrap();

    let err = ensure_output_dir(&file_path).unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(_)));
}

#[test]
fn atomic_write_replaces_previous_export() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("Boxing_book.pdf", b"%PDF-first").unwrap();
    assert_eq!(first.file_name().unwrap(), "Boxing_book.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"%PDF-first");

    let second = writer.write("Boxing_book.pdf", b"%PDF-second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF-second");

    // Only the target remains; the temp file was renamed into place.
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("Boxing_book.pdf", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("Boxing_book.pdf").exists());
}

#[test]
fn names_that_escape_the_output_dir_are_rejected() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("output");
    let writer = AtomicFileWriter::new(out.clone());

    for name in ["../Boxing_book.pdf", "nested/Boxing_book.pdf", "..", ""] {
        let err = writer.write(name, b"%PDF-").unwrap_err();
        assert!(matches!(err, PersistError::InvalidName(_)), "{name:?}: {err}");
    }
    assert!(!temp.path().join("Boxing_book.pdf").exists());
    assert!(!out.exists());
}
