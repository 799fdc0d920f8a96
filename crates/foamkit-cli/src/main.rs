fn main() {
    let exit_code = foamkit_cli::run();
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
