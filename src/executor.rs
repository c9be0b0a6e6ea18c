//! # Effect Executor
//!
//! Runs the `Effect`s returned by `update()` on the tokio runtime and sends
//! each result back to the event loop as exactly one `Action`.
//!
//! ```text
//! Effect ──▶ spawn ──▶ FileSystem / preview (blocking pool) ──▶ Action ──▶ mpsc ──▶ loop
//! ```
//!
//! Effects are fire-and-forget: nothing waits on a particular one, and
//! results come back in whatever order they finish. Failures are turned
//! into ordinary actions here and never reach the loop as errors.

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};

use log::{debug, info, warn};
use ratatui::style::Color;
use ratatui::text::Text;
use tokio::runtime::Handle;

use crate::core::action::{Action, Effect};
use crate::fs::FileSystem;
use crate::preview::{self, Preview, RenderOptions};

/// The parts of preview rendering that come from config, not geometry.
#[derive(Debug, Clone)]
pub struct PreviewStyle {
    pub syntax_theme: String,
    pub text_fg: Color,
}

impl PreviewStyle {
    fn options(&self, width: u16, height: u16) -> RenderOptions {
        RenderOptions {
            width,
            height,
            syntax_theme: self.syntax_theme.clone(),
            markdown_fg: self.text_fg,
        }
    }
}

pub struct Executor {
    fs: Arc<dyn FileSystem>,
    tx: mpsc::Sender<Action>,
    handle: Handle,
    style: PreviewStyle,
}

impl Executor {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        tx: mpsc::Sender<Action>,
        handle: Handle,
        style: PreviewStyle,
    ) -> Self {
        Self {
            fs,
            tx,
            handle,
            style,
        }
    }

    /// Start `effect` in the background. `Quit` is the loop's business and
    /// is ignored here.
    pub fn spawn(&self, effect: Effect) {
        if effect == Effect::Quit {
            return;
        }
        debug!("Spawning effect: {:?}", effect);
        let fs = self.fs.clone();
        let tx = self.tx.clone();
        let style = self.style.clone();
        self.handle.spawn(async move {
            if let Some(action) = execute(fs.as_ref(), effect, &style).await
                && tx.send(action).is_err()
            {
                warn!("Failed to deliver effect result: receiver dropped");
            }
        });
    }
}

/// Perform one effect and wrap its outcome. `None` only for `Quit`.
pub async fn execute(fs: &dyn FileSystem, effect: Effect, style: &PreviewStyle) -> Option<Action> {
    match effect {
        Effect::ListDirectory {
            path,
            show_hidden,
            generation,
        } => {
            let result = fs.list_directory(&path, show_hidden).await;
            if let Err(e) = &result {
                warn!("Listing {} failed: {}", path.display(), e);
            }
            Some(Action::DirectoryLoaded {
                path,
                result,
                generation,
            })
        }
        Effect::ReadFile {
            path,
            width,
            height,
            generation,
        } => {
            let preview = read_preview(fs, &path, style.options(width, height)).await;
            Some(Action::FileContentLoaded {
                path,
                preview,
                generation,
            })
        }
        Effect::RenderMarkdown {
            source,
            width,
            generation,
        } => {
            let opts = style.options(width, 0);
            let text = tokio::task::spawn_blocking(move || preview::render_markdown(&source, &opts))
                .await
                .unwrap_or_else(|e| {
                    warn!("Markdown render task failed: {}", e);
                    preview::placeholder("unable to render markdown")
                });
            Some(Action::RenderCompleted { text, generation })
        }
        Effect::Mutate(mutation) => {
            let result = fs.apply(&mutation).await;
            match &result {
                Ok(()) => info!("{} succeeded: {:?}", mutation.label(), mutation),
                Err(e) => warn!("{} failed: {}", mutation.label(), e),
            }
            Some(Action::MutationCompleted(result))
        }
        Effect::Quit => None,
    }
}

async fn read_preview(fs: &dyn FileSystem, path: &Path, opts: RenderOptions) -> Preview {
    let bytes = match fs.read_file(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Reading {} failed: {}", path.display(), e);
            return text_only(preview::placeholder(&e.to_string()));
        }
    };
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || preview::build(&path, &bytes, &opts))
        .await
        .unwrap_or_else(|e| {
            warn!("Preview task failed: {}", e);
            text_only(preview::placeholder("unable to render preview"))
        })
}

fn text_only(text: Text<'static>) -> Preview {
    Preview {
        text,
        markdown_source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FsError, Mutation};
    use crate::preview::highlight::DEFAULT_THEME;
    use crate::test_support::{FakeFileSystem, entry};
    use std::time::Duration;

    fn style() -> PreviewStyle {
        PreviewStyle {
            syntax_theme: DEFAULT_THEME.to_string(),
            text_fg: Color::White,
        }
    }

    fn flatten(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_list_directory_filters_hidden() {
        let fs = FakeFileSystem::default()
            .with_listing("/work", vec![entry(".git", true), entry("a.txt", false)]);
        let effect = Effect::ListDirectory {
            path: PathBuf::from("/work"),
            show_hidden: false,
            generation: 4,
        };
        match execute(&fs, effect, &style()).await {
            Some(Action::DirectoryLoaded {
                path,
                result: Ok(entries),
                generation,
            }) => {
                assert_eq!(path, PathBuf::from("/work"));
                assert_eq!(generation, 4);
                assert_eq!(entries, vec![entry("a.txt", false)]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_an_error_result() {
        let fs = FakeFileSystem::default();
        let effect = Effect::ListDirectory {
            path: PathBuf::from("/gone"),
            show_hidden: true,
            generation: 1,
        };
        assert!(matches!(
            execute(&fs, effect, &style()).await,
            Some(Action::DirectoryLoaded {
                result: Err(FsError::NotFound(_)),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_read_markdown_keeps_source() {
        let fs = FakeFileSystem::default().with_file("/work/README.md", b"# Hello\n\nworld");
        let effect = Effect::ReadFile {
            path: PathBuf::from("/work/README.md"),
            width: 40,
            height: 10,
            generation: 2,
        };
        match execute(&fs, effect, &style()).await {
            Some(Action::FileContentLoaded {
                preview,
                generation,
                ..
            }) => {
                assert_eq!(generation, 2);
                assert_eq!(preview.markdown_source.as_deref(), Some("# Hello\n\nworld"));
                assert!(flatten(&preview.text).contains("Hello"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_failure_becomes_placeholder() {
        let fs = FakeFileSystem::default();
        let effect = Effect::ReadFile {
            path: PathBuf::from("/work/missing.txt"),
            width: 40,
            height: 10,
            generation: 1,
        };
        match execute(&fs, effect, &style()).await {
            Some(Action::FileContentLoaded { preview, .. }) => {
                assert_eq!(flatten(&preview.text), "not found: /work/missing.txt");
                assert_eq!(preview.markdown_source, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_render_markdown() {
        let fs = FakeFileSystem::default();
        let effect = Effect::RenderMarkdown {
            source: "# Help\n\n- one\n- two".to_string(),
            width: 30,
            generation: 7,
        };
        match execute(&fs, effect, &style()).await {
            Some(Action::RenderCompleted { text, generation }) => {
                assert_eq!(generation, 7);
                let flat = flatten(&text);
                assert!(flat.contains("Help"));
                assert!(flat.contains("• one"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mutation_is_applied_once() {
        let fs = FakeFileSystem::default();
        let mutation = Mutation::CreateDirectory(PathBuf::from("/work/newdir"));
        let action = execute(&fs, Effect::Mutate(mutation.clone()), &style()).await;
        assert!(matches!(action, Some(Action::MutationCompleted(Ok(())))));
        assert_eq!(*fs.applied.lock().unwrap(), vec![mutation]);
    }

    #[tokio::test]
    async fn test_mutation_failure_is_reported() {
        let fs = FakeFileSystem {
            fail_mutations: true,
            ..Default::default()
        };
        let effect = Effect::Mutate(Mutation::CreateFile(PathBuf::from("/work/x")));
        assert!(matches!(
            execute(&fs, effect, &style()).await,
            Some(Action::MutationCompleted(Err(FsError::PermissionDenied(_))))
        ));
    }

    #[tokio::test]
    async fn test_quit_has_no_result() {
        let fs = FakeFileSystem::default();
        assert!(execute(&fs, Effect::Quit, &style()).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawn_delivers_over_channel() {
        let fs = FakeFileSystem::default().with_listing("/work", vec![entry("a", false)]);
        let (tx, rx) = mpsc::channel();
        let executor = Executor::new(Arc::new(fs), tx, Handle::current(), style());

        executor.spawn(Effect::Quit);
        executor.spawn(Effect::ListDirectory {
            path: PathBuf::from("/work"),
            show_hidden: false,
            generation: 1,
        });

        let received = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap();
        assert!(matches!(
            received,
            Ok(Action::DirectoryLoaded { result: Ok(ref e), .. }) if e.len() == 1
        ));
    }
}
