//! Entry point for the gridscout command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = gridscout_cli::init_logging() {
        report(&err);
    }
    if let Err(err) = gridscout_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on standard error"
)]
fn report(err: &gridscout_cli::CliError) {
    eprintln!("gridscout: {err}");
}
