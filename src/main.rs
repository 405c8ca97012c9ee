fn main() -> std::process::ExitCode {
    activeshot::run(std::env::args_os())
}
