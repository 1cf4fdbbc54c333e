//! Behavioural tests for the daemon bootstrap sequence.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};

use super::support::{FailingConfigLoader, RecordingHealthReporter, TestConfigLoader};

struct BootstrapWorld {
    loader: Box<dyn ConfigLoader>,
    reporter: Arc<RecordingHealthReporter>,
    outcome: Option<Result<Daemon, BootstrapError>>,
}

impl BootstrapWorld {
    fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            outcome: None,
        }
    }

    fn error(&self) -> Option<&BootstrapError> {
        self.outcome
            .as_ref()
            .and_then(|outcome| outcome.as_ref().err())
    }
}

#[fixture]
fn world() -> RefCell<BootstrapWorld> {
    RefCell::new(BootstrapWorld::new())
}

#[given("a healthy configuration loader")]
fn given_healthy_loader(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().loader = Box::new(TestConfigLoader::new());
}

#[given("a failing configuration loader")]
fn given_failing_loader(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().loader = Box::new(FailingConfigLoader);
}

#[given("a configuration loader with {workers} workers")]
fn given_worker_count(world: &RefCell<BootstrapWorld>, workers: usize) {
    world.borrow_mut().loader = Box::new(TestConfigLoader::new().with_workers(workers));
}

#[when("the daemon bootstrap runs")]
fn when_bootstrap_runs(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let reporter = Arc::clone(&world.reporter);
    let outcome = bootstrap_with(&*world.loader, reporter);
    world.outcome = Some(outcome);
}

#[then("bootstrap succeeds")]
fn then_bootstrap_succeeds(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert!(
        world.error().is_none(),
        "bootstrap error: {:?}",
        world.error()
    );
    assert!(
        matches!(world.outcome, Some(Ok(_))),
        "bootstrap did not run"
    );
}

#[then("bootstrap fails with a configuration error")]
fn then_configuration_error(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert!(
        matches!(world.error(), Some(BootstrapError::Configuration { .. })),
        "unexpected outcome: {:?}",
        world.error()
    );
}

#[then("bootstrap fails with a validation error")]
fn then_validation_error(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert!(
        matches!(world.error(), Some(BootstrapError::Validation { .. })),
        "unexpected outcome: {:?}",
        world.error()
    );
}

#[then("the health events are \"{events}\"")]
fn then_health_events(world: &RefCell<BootstrapWorld>, events: String) {
    let expected: Vec<&str> = events.split(", ").collect();
    assert_eq!(world.borrow().reporter.event_names(), expected);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Bootstrap succeeds with a healthy configuration"
)]
fn bootstrap_succeeds(world: RefCell<BootstrapWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Bootstrap reports configuration failures"
)]
fn bootstrap_reports_configuration_failures(world: RefCell<BootstrapWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Bootstrap rejects an out of range worker count"
)]
fn bootstrap_rejects_worker_count(world: RefCell<BootstrapWorld>) {
    let _ = world;
}
