use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::{CaptureError, Step};

pub const CONFIG_FILE: &str = "perfetto_config.txt";
pub const OUTPUT_FILE: &str = "trace.pftrace";
pub const REMOTE_TRACE: &str = "/data/misc/perfetto-traces/trace";

/// One trace capture: push the text config into `perfetto` on the device,
/// then pull the resulting trace next to the config.
pub struct Capture {
	adb: PathBuf,
	config: PathBuf,
	output: PathBuf,
}

impl Capture {
	pub fn new(adb: impl Into<PathBuf>, dir: &Path) -> Self {
		Self {
			adb: adb.into(),
			config: dir.join(CONFIG_FILE),
			output: dir.join(OUTPUT_FILE),
		}
	}

	pub fn config(&self) -> &Path {
		&self.config
	}

	pub fn output(&self) -> &Path {
		&self.output
	}

	fn run(&self, step: Step, args: &[&OsStr], stdin: Stdio) -> Result<ExitStatus, CaptureError> {
		debug!("{}: {} {:?}", step, self.adb.display(), args);
		Command::new(&self.adb)
			.args(args)
			.stdin(stdin)
			.status()
			.map_err(|source| CaptureError::Spawn { step, source })
	}

	fn check(step: Step, status: ExitStatus) -> Result<(), CaptureError> {
		if status.success() {
			Ok(())
		} else {
			Err(CaptureError::Failed { step, status })
		}
	}

	fn check_config(&self) -> Result<()> {
		if !self.config.is_file() {
			bail!(CaptureError::MissingConfig(self.config.clone()));
		}
		Ok(())
	}

	fn clear_remote(&self) {
		let args = [OsStr::new("shell"), OsStr::new("rm"), OsStr::new("-f"), OsStr::new(REMOTE_TRACE)];
		match self.run(Step::ClearRemote, &args, Stdio::inherit()) {
			Ok(status) if status.success() => debug!("removed {} on device", REMOTE_TRACE),
			Ok(status) => warn!("{} exited with {}, continuing", Step::ClearRemote, status),
			Err(e) => warn!("{}, continuing", e),
		}
	}

	fn record(&self) -> Result<()> {
		// handle moves into the child's stdin and is closed once the step returns
		let config = File::open(&self.config)
			.with_context(|| format!("failed to open {}", self.config.display()))?;
		let args = [
			OsStr::new("shell"),
			OsStr::new("perfetto"),
			OsStr::new("-c"),
			OsStr::new("-"),
			OsStr::new("--txt"),
			OsStr::new("-o"),
			OsStr::new(REMOTE_TRACE),
		];
		info!("recording trace with {}", self.config.display());
		let status = self.run(Step::Record, &args, Stdio::from(config))?;
		Self::check(Step::Record, status)?;
		Ok(())
	}

	fn clear_local(&self) -> Result<()> {
		if self.output.is_file() {
			fs::remove_file(&self.output)
				.with_context(|| format!("failed to remove {}", self.output.display()))?;
			debug!("removed stale {}", self.output.display());
		}
		Ok(())
	}

	fn pull(&self) -> Result<()> {
		let args = [OsStr::new("pull"), OsStr::new(REMOTE_TRACE), self.output.as_os_str()];
		info!("pulling {} to {}", REMOTE_TRACE, self.output.display());
		let status = self.run(Step::Pull, &args, Stdio::inherit())?;
		Self::check(Step::Pull, status)?;
		Ok(())
	}

	pub fn exec(&self) -> Result<()> {
		self.check_config()?;
		self.clear_remote();
		self.record()?;
		self.clear_local()?;
		self.pull()?;
		info!("trace written to {}", self.output.display());
		Ok(())
	}
}
