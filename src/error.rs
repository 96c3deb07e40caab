use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The bridge invocations a capture run is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	ClearRemote,
	Record,
	Pull,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Step::ClearRemote => "remote cleanup",
			Step::Record => "perfetto capture",
			Step::Pull => "adb pull",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Error)]
pub enum CaptureError {
	#[error("Config file does not exist: {}", .0.display())]
	MissingConfig(PathBuf),
	#[error("failed to launch {step}: {source}")]
	Spawn {
		step: Step,
		#[source]
		source: io::Error,
	},
	#[error("{step} failed: {status}")]
	Failed { step: Step, status: ExitStatus },
}

impl CaptureError {
	/// Process exit status for this failure. Subprocess codes are passed
	/// through when they fit a non-zero u8, anything else becomes 1.
	pub fn exit_code(&self) -> u8 {
		match self {
			CaptureError::Failed { status, .. } => match status.code() {
				Some(code) => match u8::try_from(code) {
					Ok(code) if code != 0 => code,
					_ => 1,
				},
				None => 1,
			},
			_ => 1,
		}
	}
}
