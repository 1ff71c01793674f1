use mole_panic::{app, audio};
use mole_panic::utils::{build_info, logging};
use std::io;

fn print_help() {
    println!("Mole Panic - Terminal Whack-a-Mole\n");
    println!("Usage: mole-panic [options]\n");
    println!("Options:");
    println!("  --mute, -m     Start without sound");
    println!("  --version, -v  Show version information");
    println!("  --help, -h     Show this help message");
    if !audio::compiled_in() {
        println!("\nThis build has no sound. Rebuild with `--features audio` to hear cues.");
    }
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let mut muted = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--mute" | "-m" => muted = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'mole-panic --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("starting {}", build_info::version_line());

    let result = app::run(muted);
    match &result {
        Ok(()) => log::info!("shutdown"),
        Err(e) => log::error!("exited with error: {}", e),
    }
    result
}
