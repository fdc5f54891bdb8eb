fn main() {
    if let Err(e) = kwire_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
