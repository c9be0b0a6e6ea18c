use std::fs;
use std::path::Path;

use fm::core::action::{Action, Effect};
use fm::executor::{PreviewStyle, execute};
use fm::fs::{FileSystem, FsError, LocalFileSystem, Mutation};
use fm::preview::highlight::DEFAULT_THEME;
use ratatui::style::Color;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Helper Functions
// ============================================================================

/// A scratch directory with `a.txt`, `b/inner.txt`, `.hidden` and `notes.md`.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.txt"), "alpha").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b").join("inner.txt"), "inner").unwrap();
    fs::write(dir.path().join(".hidden"), "").unwrap();
    fs::write(dir.path().join("notes.md"), "# Notes\n\n*some* text").unwrap();
    dir
}

fn names(entries: &[fm::fs::DirectoryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

fn style() -> PreviewStyle {
    PreviewStyle {
        syntax_theme: DEFAULT_THEME.to_string(),
        text_fg: Color::White,
    }
}

async fn apply(mutation: Mutation) -> Result<(), FsError> {
    LocalFileSystem.apply(&mutation).await
}

// ============================================================================
// Listing and reading
// ============================================================================

#[tokio::test]
async fn test_listing_is_sorted_and_filters_hidden() {
    let dir = fixture();

    let visible = assert_ok!(LocalFileSystem.list_directory(dir.path(), false).await);
    assert_eq!(names(&visible), vec!["a.txt", "b", "notes.md"]);
    assert!(visible[1].is_dir);
    assert_eq!(visible[0].size, 5);
    assert_eq!(visible[0].path, dir.path().join("a.txt"));

    let all = assert_ok!(LocalFileSystem.list_directory(dir.path(), true).await);
    assert_eq!(names(&all), vec![".hidden", "a.txt", "b", "notes.md"]);
}

#[tokio::test]
async fn test_listing_missing_directory_is_not_found() {
    let dir = fixture();
    let missing = dir.path().join("nope");
    let err = assert_err!(LocalFileSystem.list_directory(&missing, false).await);
    assert!(matches!(err, FsError::NotFound(p) if p == missing));
}

#[tokio::test]
async fn test_read_file() {
    let dir = fixture();
    let bytes = assert_ok!(LocalFileSystem.read_file(&dir.path().join("a.txt")).await);
    assert_eq!(bytes, b"alpha");
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_create_directory_and_file() {
    let dir = fixture();
    let new_dir = dir.path().join("newdir");
    let new_file = dir.path().join("new.txt");

    assert_ok!(apply(Mutation::CreateDirectory(new_dir.clone())).await);
    assert_ok!(apply(Mutation::CreateFile(new_file.clone())).await);
    assert!(new_dir.is_dir());
    assert!(new_file.is_file());

    let err = assert_err!(apply(Mutation::CreateFile(dir.path().join("a.txt"))).await);
    assert!(matches!(err, FsError::AlreadyExists(_)));
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "alpha");
}

#[tokio::test]
async fn test_rename_refuses_to_overwrite() {
    let dir = fixture();
    let from = dir.path().join("a.txt");

    let err = assert_err!(
        apply(Mutation::Rename {
            from: from.clone(),
            to: dir.path().join("notes.md"),
        })
        .await
    );
    assert!(matches!(err, FsError::AlreadyExists(_)));

    assert_ok!(
        apply(Mutation::Rename {
            from: from.clone(),
            to: dir.path().join("z.txt"),
        })
        .await
    );
    assert!(!from.exists());
    assert_eq!(fs::read_to_string(dir.path().join("z.txt")).unwrap(), "alpha");
}

#[tokio::test]
async fn test_copy_directory_recursively_into_existing_dir() {
    let dir = fixture();
    let target = dir.path().join("backup");
    fs::create_dir(&target).unwrap();

    assert_ok!(
        apply(Mutation::MoveOrCopy {
            from: dir.path().join("b"),
            to: target.clone(),
            is_move: false,
        })
        .await
    );
    assert!(dir.path().join("b").join("inner.txt").exists());
    assert_eq!(
        fs::read_to_string(target.join("b").join("inner.txt")).unwrap(),
        "inner"
    );
}

#[tokio::test]
async fn test_copy_directory_into_itself_is_refused() {
    let dir = fixture();
    let err = assert_err!(
        apply(Mutation::MoveOrCopy {
            from: dir.path().join("b"),
            to: dir.path().join("b").join("deeper"),
            is_move: false,
        })
        .await
    );
    assert!(matches!(err, FsError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_move_file() {
    let dir = fixture();
    assert_ok!(
        apply(Mutation::MoveOrCopy {
            from: dir.path().join("a.txt"),
            to: dir.path().join("b"),
            is_move: true,
        })
        .await
    );
    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b").join("a.txt").exists());
}

#[tokio::test]
async fn test_delete_file_and_directory() {
    let dir = fixture();
    assert_ok!(
        apply(Mutation::Delete {
            path: dir.path().join("a.txt"),
            is_dir: false,
        })
        .await
    );
    assert_ok!(
        apply(Mutation::Delete {
            path: dir.path().join("b"),
            is_dir: true,
        })
        .await
    );
    let left = assert_ok!(LocalFileSystem.list_directory(dir.path(), false).await);
    assert_eq!(names(&left), vec!["notes.md"]);

    let err = assert_err!(
        apply(Mutation::Delete {
            path: dir.path().join("a.txt"),
            is_dir: false,
        })
        .await
    );
    assert!(matches!(err, FsError::NotFound(_)));
}

// ============================================================================
// Executor against the real disk
// ============================================================================

#[tokio::test]
async fn test_executor_previews_markdown_from_disk() {
    let dir = fixture();
    let path = dir.path().join("notes.md");
    let effect = Effect::ReadFile {
        path: path.clone(),
        width: 40,
        height: 10,
        generation: 3,
    };

    match execute(&LocalFileSystem, effect, &style()).await {
        Some(Action::FileContentLoaded {
            path: loaded,
            preview,
            generation,
        }) => {
            assert_eq!(loaded, path);
            assert_eq!(generation, 3);
            assert_eq!(
                preview.markdown_source.as_deref(),
                Some("# Notes\n\n*some* text")
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_executor_mutation_then_listing() {
    let dir = fixture();
    let effect = Effect::Mutate(Mutation::CreateDirectory(dir.path().join("made")));
    assert!(matches!(
        execute(&LocalFileSystem, effect, &style()).await,
        Some(Action::MutationCompleted(Ok(())))
    ));

    let effect = Effect::ListDirectory {
        path: dir.path().to_path_buf(),
        show_hidden: false,
        generation: 1,
    };
    match execute(&LocalFileSystem, effect, &style()).await {
        Some(Action::DirectoryLoaded {
            result: Ok(entries),
            ..
        }) => {
            assert!(names(&entries).contains(&"made"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_executor_reports_listing_errors() {
    let effect = Effect::ListDirectory {
        path: Path::new("/definitely/not/here").to_path_buf(),
        show_hidden: false,
        generation: 9,
    };
    assert!(matches!(
        execute(&LocalFileSystem, effect, &style()).await,
        Some(Action::DirectoryLoaded {
            result: Err(FsError::NotFound(_)),
            generation: 9,
            ..
        })
    ));
}
