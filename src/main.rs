fn main() {
    if let Err(err) = phishguard::cli::run() {
        phishguard::ui::eprintln_error(&err);
        std::process::exit(phishguard::exit::exit_code(&err));
    }
}
