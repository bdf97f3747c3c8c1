//! Command-line arguments for the headless runner

use ds_core::RomSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line arguments
#[derive(Debug)]
pub struct CliArgs {
    pub roms: RomSet,
    /// How long to run before stopping
    pub duration: Duration,
    /// Output surface size the layout is computed for
    pub width: u32,
    pub height: u32,
    /// Host keys held down for the whole run
    pub held_keys: Vec<String>,
    pub require_system_files: bool,
    pub firmware_boot: bool,
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            roms: RomSet::default(),
            duration: Duration::from_secs(5),
            width: 512,
            height: 768,
            held_keys: Vec::new(),
            require_system_files: false,
            firmware_boot: false,
            show_help: false,
        }
    }
}

impl CliArgs {
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from(iter: impl IntoIterator<Item = String>) -> Self {
        let mut args = Self::default();
        let mut iter = iter.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => args.show_help = true,
                "--require-bios" => args.require_system_files = true,
                "--firmware-boot" => args.firmware_boot = true,
                "--seconds" => match iter
                    .next()
                    .and_then(|v| v.parse::<f64>().ok())
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                {
                    Some(duration) => args.duration = duration,
                    None => {
                        eprintln!("--seconds requires a non-negative number");
                        args.show_help = true;
                    }
                },
                "--size" => match iter.next().as_deref().and_then(parse_size) {
                    Some((width, height)) => {
                        args.width = width;
                        args.height = height;
                    }
                    None => {
                        eprintln!("--size requires WIDTHxHEIGHT");
                        args.show_help = true;
                    }
                },
                "--hold" => match iter.next() {
                    Some(key) => args.held_keys.push(key),
                    None => {
                        eprintln!("--hold requires a host key name");
                        args.show_help = true;
                    }
                },
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    args.show_help = true;
                }
                _ => {
                    let path = PathBuf::from(arg);
                    let is_gba = path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("gba"));
                    if is_gba {
                        args.roms.gba = Some(path);
                    } else {
                        args.roms.nds = Some(path);
                    }
                }
            }
        }

        args
    }

    pub fn print_help() {
        eprintln!(
            "Usage:\n  dsfront [options] [game.nds] [game.gba]\n\n\
             Options:\n\
             \x20 --seconds <n>        Run time before stopping (default 5)\n\
             \x20 --size <WxH>         Output size used for the screen layout (default 512x768)\n\
             \x20 --hold <key>         Hold a host key for the whole run (repeatable)\n\
             \x20 --require-bios       Fail to boot when BIOS or firmware files are missing\n\
             \x20 --firmware-boot      Boot through the firmware instead of directly\n\
             \x20 -h, --help           Show this help\n\n\
             With no ROM the firmware is booted."
        );
    }
}

fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}
