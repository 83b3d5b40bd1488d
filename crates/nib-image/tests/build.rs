use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nib_image::build::ImageBuilder;
use nib_image::options::ImageOptions;
use nib_toolchain::locator::LocateContext;
use nib_toolchain::platform;
use nib_toolchain::probe::PathProber;
use nib_util::errors::NibError;
use nib_util::process::{CommandLine, ProcessRunner};

type Files = Rc<RefCell<HashSet<PathBuf>>>;

fn files_of(paths: &[PathBuf]) -> Files {
    Rc::new(RefCell::new(paths.iter().cloned().collect()))
}

struct FakeProber(Files);

impl PathProber for FakeProber {
    fn exists(&self, path: &Path) -> bool {
        self.0.borrow().contains(path)
    }
}

/// Runner double: records every spawn, returns canned exit codes, and can
/// make the compiler binary "appear" as a side effect of running gu.
struct FakeRunner {
    files: Files,
    calls: RefCell<Vec<CommandLine>>,
    gu_exit: i32,
    compiler_exit: i32,
    install_creates: Option<PathBuf>,
}

impl FakeRunner {
    fn new(files: &Files) -> Self {
        Self {
            files: Rc::clone(files),
            calls: RefCell::new(Vec::new()),
            gu_exit: 0,
            compiler_exit: 0,
            install_creates: None,
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, cmd: &CommandLine) -> io::Result<i32> {
        self.calls.borrow_mut().push(cmd.clone());
        let is_gu = cmd
            .program()
            .file_name()
            .is_some_and(|name| name == platform::gu_exe());
        if is_gu {
            if let Some(path) = &self.install_creates {
                self.files.borrow_mut().insert(path.clone());
            }
            Ok(self.gu_exit)
        } else {
            Ok(self.compiler_exit)
        }
    }
}

fn native_image_under(root: &Path) -> PathBuf {
    root.join("bin").join(platform::native_image_exe())
}

fn gu_under(root: &Path) -> PathBuf {
    root.join("bin").join(platform::gu_exe())
}

#[test]
fn compiler_present_in_runtime_root_is_invoked_directly() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[native_image_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    let runner = FakeRunner::new(&files);

    let tmp = tempfile::TempDir::new().unwrap();
    let out = tmp.path().join("native/app");

    let ctx = LocateContext {
        java_home: Some(runtime.clone()),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let built = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, &out)
        .unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1, "no installer step expected");
    assert_eq!(calls[0].program(), native_image_under(&runtime).as_path());
    assert_eq!(
        calls[0].arguments(),
        [
            format!("-H:Path={}", out.display()),
            "-H:Name=app".to_string()
        ]
    );
    assert_eq!(calls[0].working_dir(), Some(out.as_path()));
    assert!(out.is_dir(), "output directory must be created");
    assert_eq!(
        built.image_path,
        out.join(format!("app{}", platform::executable_extension()))
    );
}

#[test]
fn missing_everywhere_without_gu_is_toolchain_error() {
    let runtime = PathBuf::from("/jdk/plain");
    let files = files_of(&[]);
    let prober = FakeProber(Rc::clone(&files));
    let runner = FakeRunner::new(&files);

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: Some(runtime),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Toolchain { .. }), "got: {err}");
    assert!(err.to_string().contains(platform::gu_exe()), "got: {err}");
    assert!(runner.calls.borrow().is_empty(), "nothing may be spawned");
}

#[test]
fn incomplete_graalvm_home_fails_before_any_install_attempt() {
    let graal = PathBuf::from("/opt/not-graal");
    // gu exists under GRAALVM_HOME, but that must not matter.
    let files = files_of(&[gu_under(&graal)]);
    let prober = FakeProber(Rc::clone(&files));
    let runner = FakeRunner::new(&files);

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: None,
        search_path: None,
        graalvm_home: Some(graal),
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Configuration { .. }), "got: {err}");
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn successful_install_is_reverified_then_invoked() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[gu_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    let mut runner = FakeRunner::new(&files);
    runner.install_creates = Some(native_image_under(&runtime));

    let tmp = tempfile::TempDir::new().unwrap();
    let out = tmp.path().join("native/app");
    let ctx = LocateContext {
        java_home: Some(runtime.clone()),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, &out)
        .unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 2, "gu then native-image");
    assert_eq!(calls[0].program(), gu_under(&runtime).as_path());
    assert_eq!(calls[0].arguments(), ["install", "native-image"]);
    assert_eq!(calls[1].program(), native_image_under(&runtime).as_path());
}

#[test]
fn install_success_without_binary_is_toolchain_error() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[gu_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    // gu exits zero but never creates the binary.
    let runner = FakeRunner::new(&files);

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: Some(runtime),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Toolchain { .. }), "got: {err}");
    assert_eq!(runner.calls.borrow().len(), 1, "only the gu attempt");
}

#[test]
fn failed_install_is_installer_error() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[gu_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    let mut runner = FakeRunner::new(&files);
    runner.gu_exit = 2;

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: Some(runtime),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Installer { .. }), "got: {err}");
}

#[test]
fn nonzero_compiler_exit_is_compilation_error_with_code() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[native_image_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    let mut runner = FakeRunner::new(&files);
    runner.compiler_exit = 137;

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: Some(runtime),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Compilation { .. }), "got: {err}");
    assert!(err.to_string().contains("137"), "got: {err}");
}

#[test]
fn unwritable_output_dir_spawns_no_compiler() {
    let runtime = PathBuf::from("/jdk/graal");
    let files = files_of(&[native_image_under(&runtime)]);
    let prober = FakeProber(Rc::clone(&files));
    let runner = FakeRunner::new(&files);

    // A file where the output directory should go makes creation fail.
    let tmp = tempfile::TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let out = blocker.join("native/app");

    let ctx = LocateContext {
        java_home: Some(runtime),
        search_path: None,
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, &out)
        .unwrap_err();

    assert!(matches!(err, NibError::Resource { .. }), "got: {err}");
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn absence_from_path_alone_never_triggers_install() {
    // No runtime home at all: a PATH miss goes straight to a toolchain
    // error without consulting gu.
    let files = files_of(&[]);
    let prober = FakeProber(Rc::clone(&files));
    let runner = FakeRunner::new(&files);

    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = LocateContext {
        java_home: None,
        search_path: Some(std::env::join_paths([tmp.path()]).unwrap()),
        graalvm_home: None,
    };
    let opts = ImageOptions::new("app").finalize();

    let err = ImageBuilder::new(&prober, &runner)
        .build_with_context(&ctx, &opts, false, tmp.path())
        .unwrap_err();

    assert!(matches!(err, NibError::Toolchain { .. }), "got: {err}");
    assert!(runner.calls.borrow().is_empty());
}
