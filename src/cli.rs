// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Repl,
    Export,
    Health,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    pub root: Option<std::path::PathBuf>,
    pub command: Command,
}

/// Parses `args` (without the binary name). Unknown arguments are an error.
pub fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.command = Command::Help,
            "-r" | "--root" => match iter.next() {
                Some(path) => parsed.root = Some(path.into()),
                None => return Err(format!("{} requires a path", arg)),
            },
            "export" => parsed.command = Command::Export,
            "health" => parsed.command = Command::Health,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Schedbot v{} - Indonesian schedule assistant",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} export [--root <path>]", binary_name);
    println!("    {} health [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    export                Print every schedule as CSV to stdout.");
    println!("    health                Print a JSON health report to stdout.");
    println!();
    println!("Without a command an interactive session starts. Type \"bantuan\" for the");
    println!("chat commands and \"exit\" to quit.");
}
