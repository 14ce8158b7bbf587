//! End-to-end scaffold runs against a temporary root, with recording fakes standing in
//! for the environment tool, git and the hosting client.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use kickoff::{
    builder::{DEFAULT_ENV, DEFAULT_GITIGNORE},
    prompt::{Answers, InputCollector, Prompter},
    provision::EnvironmentProvisioner,
    registry::{EntryKind, COMMON_KEY, TEMPLATES},
    secrets::EnvFileSecretStore,
    vcs::{RemoteHostingClient, StepOutcome, VersionControl, Visibility},
    ProjectRequest, Registry, Result, ScaffoldError, Scaffolder,
};
use walkdir::WalkDir;

/// Fails with a non-zero exit, the way a real tool would.
fn tool_failure(tool: &str) -> ScaffoldError {
    #[cfg(unix)]
    let status = {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(1 << 8)
    };
    #[cfg(windows)]
    let status = {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(1)
    };

    ScaffoldError::ExternalToolFailure {
        tool: tool.to_string(),
        status,
    }
}

#[derive(Default)]
struct FakeVenv {
    fail: bool,
    calls: RefCell<Vec<PathBuf>>,
}

impl EnvironmentProvisioner for FakeVenv {
    fn provision(&self, project: &Path) -> Result<()> {
        self.calls.borrow_mut().push(project.to_path_buf());
        if self.fail {
            return Err(tool_failure("python3"));
        }
        fs::create_dir(project.join("venv")).map_err(ScaffoldError::fs(project.join("venv")))
    }
}

#[derive(Default)]
struct FakeGit {
    fail_commit: bool,
    calls: RefCell<Vec<String>>,
}

impl VersionControl for FakeGit {
    fn init(&self, _repo: &Path) -> Result<()> {
        self.calls.borrow_mut().push("init".into());
        Ok(())
    }

    fn stage_all(&self, _repo: &Path) -> Result<()> {
        self.calls.borrow_mut().push("add".into());
        Ok(())
    }

    fn commit(&self, _repo: &Path, message: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("commit {message}"));
        if self.fail_commit {
            return Err(tool_failure("git"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeRemote {
    calls: RefCell<Vec<(String, Visibility, PathBuf)>>,
}

impl RemoteHostingClient for FakeRemote {
    fn create_and_push(&self, name: &str, visibility: Visibility, source: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((name.to_string(), visibility, source.to_path_buf()));
        Ok(())
    }
}

struct NoPrompts;

impl Prompter for NoPrompts {
    fn ask(&mut self, message: &str) -> Result<String> {
        panic!("unexpected prompt: {message}")
    }

    fn ask_secret(&mut self, message: &str) -> Result<String> {
        panic!("unexpected prompt: {message}")
    }

    fn show(&mut self, _line: &str) {}
}

fn request(name: &str, template: &str) -> ProjectRequest {
    ProjectRequest::builder()
        .name(name)
        .template_key(template)
        .build()
        .unwrap()
}

fn snapshot(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap().into_path())
        .collect()
}

#[test]
fn books_project_has_template_and_common_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();

    let report = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .build()
        .unwrap()
        .run(&request("MyNovel", "books"))
        .unwrap();

    let project = tmp.path().join("MyNovel");
    assert_eq!(report.path, project);

    for dir in ["chapters", "docs", "notes", "references", "exports", "markdown", "icons", "sync", "launchers"] {
        assert!(project.join(dir).is_dir(), "{dir}");
    }
    assert!(project.join("README.md").is_file());

    let gitignore = fs::read_to_string(project.join(".gitignore")).unwrap();
    assert_eq!(
        gitignore.lines().collect::<Vec<_>>(),
        ["venv/", "__pycache__/", ".DS_Store", ".env", "*.pyc", "output/"]
    );

    let env = fs::read_to_string(project.join(".env")).unwrap();
    assert!(env.lines().any(|l| l == "API_KEY="));
    assert!(env.lines().any(|l| l == "SECRET_KEY="));

    assert!(venv.calls.borrow().is_empty());
    assert_eq!(report.environment, StepOutcome::Skipped("not requested"));
    assert!(matches!(report.repository.local, StepOutcome::Skipped(_)));
}

#[test]
fn every_template_materializes_files_and_folders() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let scaffolder = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .build()
        .unwrap();

    for key in registry.list_keys() {
        let report = scaffolder.run(&request(key, key)).unwrap();
        let template = registry.lookup(key).unwrap();

        for entry in template.entries.iter().chain(registry.common()) {
            let path = report.path.join(entry.name);
            match entry.kind {
                EntryKind::File => assert!(path.is_file(), "{}", path.display()),
                EntryKind::Directory => {
                    assert!(path.is_dir(), "{}", path.display());
                    assert_eq!(fs::read_dir(&path).unwrap().count(), 0);
                }
            }
        }
        assert_eq!(fs::metadata(report.path.join("README.md")).unwrap().len(), 0);
        assert_eq!(report.launcher_folder, template.launcher_folder);
    }

    assert_eq!(TEMPLATES.iter().filter(|t| t.name == COMMON_KEY).count(), 1);
}

#[test]
fn second_run_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let scaffolder = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .build()
        .unwrap();

    let first = scaffolder.run(&request("MyNovel", "books")).unwrap();
    fs::write(first.path.join("README.md"), "# MyNovel\n").unwrap();
    fs::write(first.path.join(".env"), "API_KEY=abc\n").unwrap();
    let before = snapshot(tmp.path());

    let second = scaffolder.run(&request("MyNovel", "books")).unwrap();

    assert!(second.created.is_empty());
    assert_eq!(second.skipped.len(), first.created.len());
    assert_eq!(snapshot(tmp.path()), before);
    assert_eq!(
        fs::read_to_string(first.path.join("README.md")).unwrap(),
        "# MyNovel\n"
    );
    assert_eq!(fs::read_to_string(first.path.join(".env")).unwrap(), DEFAULT_ENV);
    assert_eq!(
        fs::read_to_string(first.path.join(".gitignore")).unwrap(),
        DEFAULT_GITIGNORE
    );
}

#[test]
fn venv_is_created_when_requested() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let request = ProjectRequest::builder()
        .name("MyNovel")
        .template_key("books")
        .use_env_setup(true)
        .build()
        .unwrap();

    let report = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .build()
        .unwrap()
        .run(&request)
        .unwrap();

    assert_eq!(*venv.calls.borrow(), vec![tmp.path().join("MyNovel")]);
    assert!(tmp.path().join("MyNovel/venv").is_dir());
    assert_eq!(report.environment, StepOutcome::Done);
}

#[test]
fn venv_failure_keeps_the_scaffold() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv {
        fail: true,
        ..Default::default()
    };
    let git = FakeGit::default();
    let request = ProjectRequest::builder()
        .name("MyNovel")
        .template_key("books")
        .use_env_setup(true)
        .build()
        .unwrap();

    let report = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .vcs(&git)
        .build()
        .unwrap()
        .run(&request)
        .unwrap();

    let project = tmp.path().join("MyNovel");
    assert!(matches!(report.environment, StepOutcome::Failed(_)));
    assert!(project.join("chapters").is_dir());
    assert!(project.join(".env").is_file());
    assert!(project.join(".gitignore").is_file());
    assert!(!project.join("venv").exists());
    assert_eq!(report.repository.local, StepOutcome::Done);
}

#[test]
fn private_remote_is_requested() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let git = FakeGit::default();
    let remote = FakeRemote::default();

    let report = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .vcs(&git)
        .remote(&remote)
        .build()
        .unwrap()
        .run(&request("MyNovel", "books"))
        .unwrap();

    assert_eq!(
        *git.calls.borrow(),
        ["init", "add", "commit Initial commit"]
    );
    assert_eq!(
        *remote.calls.borrow(),
        vec![("MyNovel".to_string(), Visibility::Private, tmp.path().join("MyNovel"))]
    );
    assert_eq!(report.repository.remote, StepOutcome::Done);
}

#[test]
fn public_remote_is_requested() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let git = FakeGit::default();
    let remote = FakeRemote::default();
    let request = ProjectRequest::builder()
        .name("Site")
        .template_key("wordpress_site")
        .is_public(true)
        .build()
        .unwrap();

    Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .vcs(&git)
        .remote(&remote)
        .build()
        .unwrap()
        .run(&request)
        .unwrap();

    assert_eq!(remote.calls.borrow()[0].1, Visibility::Public);
}

#[test]
fn failed_commit_skips_remote() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let git = FakeGit {
        fail_commit: true,
        ..Default::default()
    };
    let remote = FakeRemote::default();

    let report = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .vcs(&git)
        .remote(&remote)
        .build()
        .unwrap()
        .run(&request("MyNovel", "books"))
        .unwrap();

    assert!(matches!(report.repository.local, StepOutcome::Failed(_)));
    assert!(matches!(report.repository.remote, StepOutcome::Skipped(_)));
    assert!(remote.calls.borrow().is_empty());
}

#[test]
fn existing_file_at_project_path_conflicts() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let git = FakeGit::default();
    fs::write(tmp.path().join("MyNovel"), "not a directory").unwrap();
    let before = snapshot(tmp.path());

    let err = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .vcs(&git)
        .build()
        .unwrap()
        .run(&request("MyNovel", "books"))
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::PathConflict(ref p) if *p == tmp.path().join("MyNovel")));
    assert_eq!(snapshot(tmp.path()), before);
    assert_eq!(
        fs::read_to_string(tmp.path().join("MyNovel")).unwrap(),
        "not a directory"
    );
    assert!(git.calls.borrow().is_empty());
}

#[test]
fn bad_selection_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let before = snapshot(tmp.path());

    for selection in ["0", "11", "novel", "common"] {
        let err = InputCollector::new(&registry, NoPrompts)
            .collect(Answers {
                name: Some("MyNovel".into()),
                template: Some(selection.into()),
                ..Default::default()
            })
            .unwrap_err();

        assert!(
            matches!(
                err,
                ScaffoldError::InvalidTemplateSelection { .. } | ScaffoldError::UnknownTemplate { .. }
            ),
            "{selection}"
        );
    }

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn unknown_template_in_request_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Registry::default();
    let venv = FakeVenv::default();
    let before = snapshot(tmp.path());

    let err = Scaffolder::builder()
        .registry(&registry)
        .root(tmp.path())
        .secrets(&EnvFileSecretStore)
        .provisioner(&venv)
        .build()
        .unwrap()
        .run(&request("MyNovel", "novel"))
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::UnknownTemplate { .. }));
    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn missing_collaborator_is_reported() {
    let registry = Registry::default();

    let err = Scaffolder::builder()
        .registry(&registry)
        .root("/tmp")
        .secrets(&EnvFileSecretStore)
        .build()
        .err()
        .unwrap();

    assert!(matches!(err, ScaffoldError::MissingField(ref f) if f == "provisioner"));
}
