//! The `sqlsnips` binary only invokes [`cli::run`] and turns errors into an
//! exit status.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
