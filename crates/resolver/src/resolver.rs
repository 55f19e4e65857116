//! Result-space environment resolution and application

use crate::cache::EnvCache;
use crate::executor::{CommandRunner, ShellRunner, SourceCommand};
use crate::fingerprint::hook_fingerprints;
use resultspace_core::paths::{self, MARKER_FILE, SETUP_SCRIPT, TOOL_COMMAND};
use resultspace_core::shell::{self, ShellSelection};
use resultspace_core::{BLACKLISTED_KEYS, Environment, Error, Result, parse_env_str};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Knobs for a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Return an empty environment instead of failing on result-space
    /// validation errors
    pub quiet: bool,
    /// Permit serving the environment from the cache
    pub cached: bool,
    /// Require the marker file to be present
    pub strict: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            cached: true,
            strict: true,
        }
    }
}

/// Resolves the environments produced by sourcing result-space setup
/// scripts, caching outcomes per result-space path
///
/// The resolver owns its cache, so separate instances are fully isolated.
/// Resolution is synchronous and blocking; there is no timeout, and a hung
/// sourcing subprocess hangs the caller.
pub struct Resolver {
    tool: Option<PathBuf>,
    runner: Box<dyn CommandRunner>,
    cache: EnvCache,
}

impl Resolver {
    /// Create a resolver that locates the build tool on `PATH` and runs the
    /// sourcing command through the default shell runner.
    pub fn new() -> Self {
        Self {
            tool: paths::which(TOOL_COMMAND),
            runner: Box::new(ShellRunner),
            cache: EnvCache::new(),
        }
    }

    /// Use `tool` as the environment-dumping executable instead of the
    /// `PATH` lookup result.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Replace the subprocess collaborator.
    #[must_use]
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Result-space environments resolved so far
    pub fn cache(&self) -> &EnvCache {
        &self.cache
    }

    /// Drop all cached environments
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolve the environment produced by sourcing `space`'s setup script.
    ///
    /// `base_env` becomes the entire environment of the sourcing subprocess,
    /// which runs in the caller's current working directory. The returned
    /// map is the caller's own copy: mutating it cannot affect the cache,
    /// and a later resolution cannot affect the returned map.
    ///
    /// Validation failures against the result space itself (`NotADirectory`,
    /// `MissingMarker`, `MissingSetupScript`) are suppressed to an empty map
    /// by `opts.quiet`. A missing shell is always fatal; an unresolvable
    /// build tool or a subprocess I/O failure is always non-fatal and
    /// downgrades to a warning.
    pub fn resolve(
        &mut self,
        space: &Path,
        base_env: &Environment,
        opts: ResolveOptions,
    ) -> Result<Environment> {
        let fingerprints = hook_fingerprints(space)?;

        if opts.cached
            && let Some(env) = self.cache.lookup(space, &fingerprints)
        {
            debug!(
                space = %space.display(),
                vars = env.len(),
                "serving result-space environment from cache"
            );
            return Ok(env);
        }

        if !space.is_dir() {
            if opts.quiet {
                return Ok(Environment::new());
            }
            return Err(Error::not_a_directory(space));
        }

        if opts.strict && !space.join(MARKER_FILE).exists() {
            if opts.quiet {
                return Ok(Environment::new());
            }
            return Err(Error::missing_marker(space));
        }

        let shell = shell::select()?;

        let setup = space.join(SETUP_SCRIPT);
        if !setup.exists() {
            if opts.quiet {
                return Ok(Environment::new());
            }
            return Err(Error::missing_setup_script(space, setup));
        }

        let Some(tool) = self.tool.clone() else {
            warn!("failed to locate the `{TOOL_COMMAND}` executable; returning an empty environment");
            return Ok(Environment::new());
        };

        let command = build_source_command(&shell, &setup, &tool);
        let cwd = std::env::current_dir()
            .map_err(|err| Error::io(err, None, "determine working directory"))?;

        let mut output = String::new();
        let mut failed = false;
        match self.runner.run(&command, &cwd, base_env) {
            Ok(chunks) => {
                for chunk in chunks {
                    match chunk {
                        Ok(text) => output.push_str(&text),
                        Err(err) => {
                            warn!(
                                space = %space.display(),
                                error = %err,
                                "failed to capture the sourced environment"
                            );
                            failed = true;
                            break;
                        }
                    }
                }
            }
            Err(err) => {
                warn!(
                    space = %space.display(),
                    error = %err,
                    "failed to spawn the sourcing shell"
                );
                failed = true;
            }
        }

        let mut env = parse_env_str(&output);
        for key in BLACKLISTED_KEYS {
            env.remove(key);
        }

        if !failed {
            if env.is_empty() {
                warn!(
                    setup = %setup.display(),
                    "sourced environment has no variables; not caching"
                );
            } else {
                self.cache.store(space, env.clone(), fingerprints);
            }
        }

        Ok(env)
    }

    /// Resolve `space` and merge the result into this process's environment.
    ///
    /// Every resolved key overwrites an existing variable of the same name;
    /// all other process variables are left untouched. Resolution runs with
    /// strict validation and errors propagate. This is the only place the
    /// crate mutates process-global state.
    pub fn load_into_process(&mut self, space: &Path, cached: bool) -> Result<()> {
        let opts = ResolveOptions {
            cached,
            ..ResolveOptions::default()
        };
        let env = self.resolve(space, &Environment::new(), opts)?;
        for (key, value) in env.iter() {
            // SAFETY: resolution is single-threaded and blocking by
            // contract; callers must not read or write the process
            // environment from other threads while this runs.
            unsafe { std::env::set_var(key, value) };
        }
        Ok(())
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("tool", &self.tool)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Compile the argv that sources `setup` in a clean shell and dumps the
/// resulting environment through the build tool's `env` query.
///
/// The setup script path is shell-quoted into the `-c` subcommand; the shell
/// runs in no-rc mode so user customization cannot leak into the dump.
pub fn build_source_command(shell: &ShellSelection, setup: &Path, tool: &Path) -> SourceCommand {
    let setup_str = setup.to_string_lossy();
    let quoted_setup =
        shlex::try_quote(setup_str.as_ref()).unwrap_or(Cow::Borrowed(setup_str.as_ref()));
    let subcommand = format!("{} {} env -q", quoted_setup, tool.display());

    SourceCommand {
        program: shell.path.clone(),
        args: vec![
            shell.family.norc_flag().to_string(),
            "-c".to_string(),
            subcommand,
        ],
    }
}
