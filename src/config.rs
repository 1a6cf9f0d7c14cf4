use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Where the backend lives and how its resources are routed.
///
/// Built once at startup and handed to the client; nothing reads the
/// environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub api_prefix: String,
    pub route_departments: String,
    pub route_employees: String,
    pub route_salary_grades: String,

    // Logging
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Loads the first `.env` found next to the process, then reads the environment.
    /// Entries in the file override variables already set in the environment.
    pub fn from_env() -> Self {
        if let Some(path) = load_env_file(env_file_candidates()) {
            debug!(path = %path.display(), "Loaded .env");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads the given file without exporting it.
    /// File entries win; anything the file leaves out comes from the environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        let file: HashMap<String, String> =
            dotenvy::from_path_iter(path.as_ref())?.collect::<Result<_, _>>()?;

        Ok(Self::from_lookup(|key| {
            file.get(key).cloned().or_else(|| env::var(key).ok())
        }))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            api_base_url: var("API_BASE_URL", "http://212.132.110.72:8082"),
            api_prefix: var("API_PREFIX", "/api"),
            route_departments: var("ROUTE_DEPARTMENTS", "/departments"),
            route_employees: var("ROUTE_EMPLOYEES", "/employees"),
            route_salary_grades: var("ROUTE_SALARY_GRADES", "/salary-grades"),

            log_dir: var("LOG_DIR", "logs"),
        }
    }

    /// Base URL plus prefix, e.g. `http://host:8082/api`.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.api_prefix)
    }

    pub fn departments_url(&self) -> String {
        self.api_url() + &self.route_departments
    }

    pub fn employees_url(&self) -> String {
        self.api_url() + &self.route_employees
    }

    pub fn salary_grades_url(&self) -> String {
        self.api_url() + &self.route_salary_grades
    }
}

/// Current dir, then the executable's dir, then the parent of the current dir.
fn env_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(3);

    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join(".env"));
    }
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(dir.join(".env"));
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join("..").join(".env"));
    }

    candidates
}

/// Only the first existing candidate is read, even if it fails to parse.
fn load_env_file(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    let path = candidates.into_iter().find(|path| path.is_file())?;

    match dotenvy::from_path_override(&path) {
        Ok(()) => Some(path),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse .env");
            None
        }
    }
}
