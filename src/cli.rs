//! Command-line parsing.

use crate::core::constants::DEFAULT_LEADERBOARD_LIMIT;
use crate::game::Variant;
use crate::settings::CliOverrides;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the terminal game.
    Play { seed: Option<u64> },
    /// Print the top scores and exit.
    Leaderboard { limit: usize },
    /// Probe the server and exit.
    Health,
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub overrides: CliOverrides,
}

pub const USAGE: &str = "\
Snake Arcade - terminal snake with an online leaderboard

Usage: snake-arcade [options] [command]

Commands:
  leaderboard [limit]  Print the top scores (default 100)
  health               Check that the leaderboard server is reachable

Options:
  --prey           Play the moving-prey variant
  --grid <n>       Board size in cells (default 20)
  --seed <n>       Seed the random generator
  --server <url>   Leaderboard server (default http://localhost:8000)
  --version, -v    Show version information
  --help, -h       Show this help message";

fn flag_value<'a>(
    flag: &str,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<&'a String, String> {
    iter.next()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut overrides = CliOverrides::default();
    let mut seed = None;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                return Ok(Cli {
                    command: Command::Version,
                    overrides,
                })
            }
            "--help" | "-h" => {
                return Ok(Cli {
                    command: Command::Help,
                    overrides,
                })
            }
            "--prey" => overrides.variant = Some(Variant::Prey),
            "--server" => overrides.server_url = Some(flag_value(arg, &mut iter)?.clone()),
            "--grid" => overrides.grid_size = Some(parse_number(arg, flag_value(arg, &mut iter)?)?),
            "--seed" => seed = Some(parse_number(arg, flag_value(arg, &mut iter)?)?),
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Play { seed },
        [cmd, rest @ ..] if cmd.as_str() == "leaderboard" => {
            let limit = match rest {
                [] => DEFAULT_LEADERBOARD_LIMIT,
                [raw] => parse_number("leaderboard", raw)?,
                _ => return Err("leaderboard takes at most one argument".to_string()),
            };
            Command::Leaderboard { limit }
        }
        [cmd] if cmd.as_str() == "health" => Command::Health,
        [cmd, ..] => return Err(format!("Unknown command: {}", cmd)),
    };

    Ok(Cli { command, overrides })
}
