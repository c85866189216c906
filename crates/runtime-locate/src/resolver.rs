//! Lazy, cached resolution of a runtime executable.
//!
//! [`ExecutableResolver`] holds a two-state cache ([`Resolution`]). The
//! first [`resolve`](ExecutableResolver::resolve) after construction or
//! invalidation does the work; later calls return the cached path until the
//! configured path changes.
//!
//! Concurrent callers are not coordinated: two overlapping calls on an
//! unresolved cache may both search and both store, the last one winning.
//! Resolution is idempotent for stable settings, so either result is valid.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::candidates::{Candidate, RuntimeDescriptor};
use crate::detection::{ExecutableSearch, PathSearch};
use crate::error::{Error, Result};
use crate::platform::{self, Platform};
use crate::probe::{ProcessRunner, SystemRunner, probe};
use crate::settings::Settings;
use crate::telemetry::{CONFIGURED_EVENT, Telemetry, TracingTelemetry};

/// State of the resolver cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing cached; the next `resolve` searches.
    #[default]
    Unresolved,
    /// A path was resolved and is returned as is.
    Resolved(PathBuf),
}

impl Resolution {
    /// Returns the cached path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(path) => Some(path),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    resolution: Resolution,
    /// Configured path the cache was last validated against.
    seen_path: Option<String>,
    /// Bumped on every invalidation; a resolution only stores its result
    /// if no invalidation happened while it ran.
    generation: u64,
}

/// Locates a runtime executable and caches it until the settings change.
///
/// # Examples
///
/// ```no_run
/// use runtime_locate::{ExecutableResolver, RuntimeDescriptor, Settings, settings};
///
/// # async fn run() -> runtime_locate::Result<()> {
/// let (tx, rx) = settings::channel(Settings::default());
/// let resolver = ExecutableResolver::new(RuntimeDescriptor::julia()?, rx);
/// let _subscription = resolver.activate();
///
/// let julia = resolver.resolve().await?;
/// println!("using {}", julia.display());
///
/// tx.send_replace(Settings::with_executable_path("~/julia-1.10/bin/julia"));
/// # Ok(())
/// # }
/// ```
pub struct ExecutableResolver {
    runtime: RuntimeDescriptor,
    platform: Platform,
    settings: watch::Receiver<Settings>,
    search: Arc<dyn ExecutableSearch>,
    runner: Arc<dyn ProcessRunner>,
    telemetry: Arc<dyn Telemetry>,
    state: Arc<Mutex<State>>,
}

impl ExecutableResolver {
    /// Creates a resolver for `runtime` reading settings from `settings`.
    ///
    /// Uses the current platform, the process `PATH`, real child processes
    /// and `tracing`-backed telemetry; see the `with_*` methods to replace
    /// any of them.
    #[must_use]
    pub fn new(runtime: RuntimeDescriptor, settings: watch::Receiver<Settings>) -> Self {
        let seen_path = settings.borrow().explicit_path().map(str::to_owned);
        Self {
            runtime,
            platform: Platform::current(),
            settings,
            search: Arc::new(PathSearch),
            runner: Arc::new(SystemRunner),
            telemetry: Arc::new(TracingTelemetry),
            state: Arc::new(Mutex::new(State {
                resolution: Resolution::Unresolved,
                seen_path,
                generation: 0,
            })),
        }
    }

    /// Selects which platform's candidate list to search.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replaces the search-path lookup used for bare configured commands.
    #[must_use]
    pub fn with_search(mut self, search: impl ExecutableSearch + 'static) -> Self {
        self.search = Arc::new(search);
        self
    }

    /// Replaces the process runner used for probes.
    #[must_use]
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// Replaces the telemetry collaborator.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns the runtime this resolver searches for.
    #[must_use]
    pub fn runtime(&self) -> &RuntimeDescriptor {
        &self.runtime
    }

    /// Returns a snapshot of the cache.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        lock(&self.state).resolution.clone()
    }

    /// Returns the executable path, resolving it if nothing is cached.
    ///
    /// With no configured path, the platform's candidates are probed in
    /// order and the first working one wins. A configured path containing a
    /// separator is used verbatim after `~` expansion, without checking that
    /// it exists. A configured bare command is looked up on the search path.
    ///
    /// Each fresh resolution also starts a detached version probe that
    /// reports to telemetry; it may finish after this call returns. The
    /// probe needs a Tokio runtime and is skipped outside one.
    ///
    /// If the configured path changes while this call is searching, the
    /// result is returned to this caller but not cached.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if a configured bare command is not on the
    ///   search path.
    /// - [`Error::Unresolved`] if no path is configured and no candidate
    ///   works. Nothing is cached in that case.
    /// - [`Error::UnsupportedPlatform`] if the runtime has no entry for the
    ///   selected platform.
    pub async fn resolve(&self) -> Result<PathBuf> {
        let (cached, generation) = {
            let state = lock(&self.state);
            (state.resolution.path().cloned(), state.generation)
        };
        if let Some(path) = cached {
            return Ok(path);
        }

        let explicit = self.settings.borrow().explicit_path().map(str::to_owned);
        let path = match explicit {
            None => self.discover().await?,
            Some(raw) if platform::has_separator(&raw) => platform::expand_tilde(&raw)?,
            Some(raw) => self.search.require(&raw)?,
        };

        {
            let mut state = lock(&self.state);
            if state.generation != generation {
                debug!(
                    runtime = %self.runtime.name,
                    path = %path.display(),
                    "settings changed during resolution, not caching"
                );
                return Ok(path);
            }
            state.resolution = Resolution::Resolved(path.clone());
        }

        info!(runtime = %self.runtime.name, path = %path.display(), "resolved executable");
        self.spawn_version_probe(path.clone());
        Ok(path)
    }

    /// Clears the cache if the configured path differs from the last one seen.
    ///
    /// Returns `true` if the cache was invalidated. Blank paths compare
    /// equal to an unset path.
    pub fn on_settings_changed(&self, settings: &Settings) -> bool {
        invalidate_if_changed(&self.state, &self.runtime.name, settings)
    }

    /// Starts watching the settings channel for path changes.
    ///
    /// Every published change is passed to
    /// [`on_settings_changed`](Self::on_settings_changed). Watching stops
    /// when the returned [`Subscription`] is disposed or dropped, or when
    /// the host drops its sender. Must be called within a Tokio runtime.
    #[must_use = "dropping the subscription stops invalidation"]
    pub fn activate(&self) -> Subscription {
        let state = Arc::clone(&self.state);
        let name = self.runtime.name.clone();
        let mut settings = self.settings.clone();

        let handle = tokio::spawn(async move {
            while settings.changed().await.is_ok() {
                let current = settings.borrow_and_update().clone();
                invalidate_if_changed(&state, &name, &current);
            }
            debug!(runtime = %name, "settings channel closed");
        });

        Subscription { handle }
    }

    async fn discover(&self) -> Result<PathBuf> {
        let candidates = self.runtime.candidates_for(self.platform)?;

        for candidate in &candidates {
            match probe(
                self.runner.as_ref(),
                candidate.program(),
                &self.runtime.probe_args,
            )
            .await
            {
                Ok(bindir) => {
                    return Ok(match candidate {
                        Candidate::Command(name) => PathBuf::from(bindir).join(name),
                        Candidate::Path(path) => path.clone(),
                    });
                }
                Err(e) => debug!(candidate = %candidate, error = %e, "candidate rejected"),
            }
        }

        Err(Error::Unresolved {
            runtime: self.runtime.name.clone(),
            tried: candidates.iter().map(ToString::to_string).collect(),
        })
    }

    fn spawn_version_probe(&self, path: PathBuf) {
        let runner = Arc::clone(&self.runner);
        let telemetry = Arc::clone(&self.telemetry);
        let args = self.runtime.version_args.clone();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(path = %path.display(), "no Tokio runtime, skipping version probe");
            return;
        };
        handle.spawn(async move {
            match probe(runner.as_ref(), &path, &args).await {
                Ok(version) => {
                    telemetry.set_runtime_version(&version);
                    telemetry.trace_event(CONFIGURED_EVENT);
                }
                Err(e) => debug!(error = %e, "version probe failed"),
            }
        });
    }
}

/// Handle for a running settings watch.
///
/// Hosts keep this alongside their other disposables; dropping it stops
/// the watch.
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stops watching for settings changes.
    pub fn dispose(self) {
        self.handle.abort();
    }

    /// Returns `true` while the watch task is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn invalidate_if_changed(state: &Mutex<State>, runtime: &str, settings: &Settings) -> bool {
    let new_path = settings.explicit_path().map(str::to_owned);
    let mut state = lock(state);
    if state.seen_path == new_path {
        return false;
    }

    info!(
        runtime = %runtime,
        path = new_path.as_deref().unwrap_or("<unset>"),
        "configured executable changed, clearing cache"
    );
    state.seen_path = new_path;
    state.resolution = Resolution::Unresolved;
    state.generation += 1;
    true
}
