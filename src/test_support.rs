use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Changes the process working directory for the guard's lifetime.
///
/// The working directory is process-global state, so the guard also holds a
/// lock shared by every test that touches it; pair with `#[serial]` so
/// unrelated tests that read the cwd are not scheduled in between.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repo with a single commit of `README.md` on `main`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = init_repo();
    commit_readme(temp_dir.path());
    temp_dir
}

/// A two-commit repo whose `origin` remote points back at itself, so a
/// fetch produces real remote-tracking refs without any network.
pub(crate) fn create_test_repo_with_remote() -> TempDir {
    let temp_dir = init_repo();
    let path = temp_dir.path();
    commit_readme(path);
    commit_new_file(path, "notes.md");

    let path_str = path.to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &path_str]);
    temp_dir
}

/// Clone an existing fixture repo into `<tempdir>/clone`.
///
/// The clone's `origin` remote points at `source`, so staleness checks can
/// observe commits added to the source after cloning.
pub(crate) fn clone_test_repo(source: &Path) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("clone");
    let source_str = source.to_string_lossy().to_string();
    let dest_str = dest.to_string_lossy().to_string();
    git(source, &["clone", &source_str, &dest_str]);
    git(&dest, &["config", "user.email", "test@example.com"]);
    git(&dest, &["config", "user.name", "Test User"]);
    temp_dir
}

/// Add one commit to a fixture repo, creating `name` with throwaway content.
pub(crate) fn commit_new_file(repo_dir: &Path, name: &str) {
    std::fs::write(repo_dir.join(name), format!("{}\n", name)).unwrap();
    git(repo_dir, &["add", "."]);
    git(repo_dir, &["commit", "-m", &format!("Add {}", name)]);
}

fn init_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Environments disagree on the default branch name; pin it to `main`
    // before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    temp_dir
}

fn commit_readme(path: &Path) {
    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
}

/// Run a git command in a fixture repo, panicking on failure with the
/// command's full output.
pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
