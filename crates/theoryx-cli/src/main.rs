#![forbid(unsafe_code)]

fn main() {
    theoryx_cli::init_tracing();
    let stdout = std::io::stdout();
    if let Err(error) = theoryx_cli::run_from_env(&mut stdout.lock()) {
        eprintln!(
            "{}",
            serde_json::json!({
                "status": "error",
                "error": error.to_string(),
                "exit_code": error.exit_code(),
            })
        );
        std::process::exit(error.exit_code());
    }
}
