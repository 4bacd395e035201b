fn main() {
    if let Err(e) = trialscope_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
