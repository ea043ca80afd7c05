fn main() -> std::process::ExitCode {
    credicheck_lib::run()
}
