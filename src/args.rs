use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "perfetto-pull")]
#[command(version = "0.1")]
#[command(about = "Record a perfetto trace on an adb device and pull it next to this binary")]
pub struct Args {
	#[arg(long, default_value = "adb", help = "adb executable used to reach the device")]
	pub adb: PathBuf,
	#[arg(short, long, help = "Directory holding perfetto_config.txt and receiving trace.pftrace (default: directory of this executable)")]
	pub dir: Option<PathBuf>,
	#[arg(short, long, action = clap::ArgAction::Count, help = "Log more (-v info, -vv debug)")]
	pub verbose: u8,
}
