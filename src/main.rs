use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing::subscriber::set_global_default as set_global_subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::FmtSubscriber;

mod args;
mod capture;
mod error;

use error::CaptureError;

fn init_tracing(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		_ => LevelFilter::DEBUG,
	};
	let subscriber = FmtSubscriber::builder()
		.with_max_level(level)
		.with_timer(SystemTime)
		.with_writer(std::io::stderr)
		.finish();
	set_global_subscriber(subscriber).context("failed to set tracing subscriber")
}

/// Directory of the running executable, symlinks resolved.
fn program_dir() -> Result<PathBuf> {
	let exe = std::env::current_exe().context("failed to locate the running executable")?;
	let exe = exe
		.canonicalize()
		.with_context(|| format!("failed to resolve {}", exe.display()))?;
	exe.parent()
		.map(|dir| dir.to_path_buf())
		.with_context(|| format!("{} has no parent directory", exe.display()))
}

fn run(args: &args::Args) -> Result<()> {
	let dir = match &args.dir {
		Some(dir) => dir.clone(),
		None => program_dir()?,
	};
	let capture = capture::Capture::new(&args.adb, &dir);
	tracing::debug!("config {}, output {}", capture.config().display(), capture.output().display());
	capture.exec()
}

fn main() -> ExitCode {
	let args = args::Args::parse();
	if let Err(e) = init_tracing(args.verbose) {
		eprintln!("{:?}", e);
	}
	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => match e.downcast_ref::<CaptureError>() {
			Some(err @ CaptureError::MissingConfig(_)) => {
				println!("{}", err);
				ExitCode::from(err.exit_code())
			}
			Some(err) => {
				eprintln!("{}", err);
				ExitCode::from(err.exit_code())
			}
			None => {
				eprintln!("{:?}", e);
				ExitCode::FAILURE
			}
		},
	}
}
