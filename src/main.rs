use marrow::flags::Flags;
use marrow::shell::Shell;
use std::env;

fn main() -> Result<(), marrow::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("marrow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    marrow::logger::init(&flags)?;

    let mut shell = Shell::new(flags)?;
    let termination = shell.run()?;
    std::process::exit(termination.exit_code());
}
