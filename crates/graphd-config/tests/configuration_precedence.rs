use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use graphd_config::{
    Config, DEFAULT_MAX_VERTICES, DEFAULT_MST_SEED, DEFAULT_WORKERS, SocketEndpoint,
    default_log_filter, default_log_format, default_socket_endpoint,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    config_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            config_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("graphd")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn push_config_line(&self, line: String) {
        self.config_lines.borrow_mut().push(line);
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on edition 2024; `Drop` restores it.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_string(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let mut args = self.cli_args.borrow().clone();
        let lines = self.config_lines.borrow();
        if !lines.is_empty() {
            let path = self.temp_dir.path().join("graphd.toml");
            if let Err(error) = fs::write(&path, lines.join("\n")) {
                panic!("failed to write configuration: {error}");
            }
            args.insert(1, OsString::from("--config-path"));
            args.insert(2, path.into_os_string());
        }

        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

fn parse_socket(socket: &str) -> SocketEndpoint {
    match socket.parse::<SocketEndpoint>() {
        Ok(endpoint) => endpoint,
        Err(error) => panic!("invalid socket '{socket}': {error}"),
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the daemon socket to \"{socket}\"")]
fn given_config_socket(harness: &Harness, socket: String) {
    let line = match parse_socket(&socket) {
        SocketEndpoint::Unix { path } => {
            format!("daemon_socket = {{ transport = \"unix\", path = \"{path}\" }}")
        }
        SocketEndpoint::Tcp { host, port } => format!(
            "daemon_socket = {{ transport = \"tcp\", host = \"{host}\", port = {port} }}"
        ),
    };
    harness.push_config_line(line);
}

#[given("a configuration file setting the worker count to \"{workers}\"")]
fn given_config_workers(harness: &Harness, workers: String) {
    harness.push_config_line(format!("workers = {workers}"));
}

#[given("the environment overrides the daemon socket to \"{socket}\"")]
fn given_env_socket(harness: &Harness, socket: String) {
    harness.set_env("GRAPHD_DAEMON_SOCKET", &socket);
}

#[given("the environment overrides the worker count to \"{workers}\"")]
fn given_env_workers(harness: &Harness, workers: String) {
    harness.set_env("GRAPHD_WORKERS", &workers);
}

#[when("the CLI sets the daemon socket to \"{socket}\"")]
fn when_cli_socket(harness: &Harness, socket: String) {
    harness.push_cli_arg("--daemon-socket");
    harness.push_cli_arg(OsString::from(&socket));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the daemon socket to \"{socket}\"")]
fn then_resolved_socket(harness: &Harness, socket: String) {
    let expected = parse_socket(&socket);
    assert_eq!(harness.config().daemon_socket(), &expected);
}

#[then("loading the configuration resolves the worker count to \"{workers}\"")]
fn then_resolved_workers(harness: &Harness, workers: String) {
    let expected: usize = match workers.parse() {
        Ok(value) => value,
        Err(error) => panic!("invalid worker count '{workers}': {error}"),
    };
    assert_eq!(harness.config().workers(), expected);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.daemon_socket(), &default_socket_endpoint());
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.workers(), DEFAULT_WORKERS);
    assert_eq!(config.max_vertices(), DEFAULT_MAX_VERTICES);
    assert_eq!(config.mst_seed(), DEFAULT_MST_SEED);
    assert!(config.validate().is_ok());
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply when nothing is overridden"
)]
fn defaults_apply(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_beats_file(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Command line overrides the environment"
)]
fn cli_beats_environment(#[from(harness)] harness: Harness) {
    let _ = harness;
}
