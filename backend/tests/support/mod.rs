#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use petclinic::api::Owner;
use petclinic::db::repositories::LocalRepository;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Every environment variable the configuration layer reads, cleared.
pub const CLEAN_ENV: &[(&str, Option<&str>)] = &[
    ("PETCLINIC_CONFIG", None),
    ("HOST", None),
    ("PORT", None),
    ("REPOSITORY_TYPE", None),
    ("REPOSITORY_PATH", None),
    ("REPOSITORY_SAMPLE_DATA", None),
];

pub fn owner(first_name: &str, last_name: &str, city: &str, telephone: &str) -> Owner {
    Owner::new(first_name, last_name, "1 Main St.", city, telephone)
}

/// Repository with two Smiths, one Coleman and one internet-number Davis.
pub fn smith_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Jane", "Smith", "Seoul", "1234567"));
    repo.insert_owner(owner("John", "Smith", "Busan", "7654321"));
    repo.insert_owner(owner("Jean", "Coleman", "Daejeon", "6085552654"));
    repo.insert_owner(owner("Harold", "Davis", "Incheon", "0705553198"));
    repo
}
