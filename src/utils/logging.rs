//! Verbose console output for `--verbose`, mirrored to the `log` facade

pub fn print_verbose(verbose: bool, msg: &str) {
    log::debug!("{}", msg);
    if verbose {
        println!("Verbose: {}", msg);
    }
}
