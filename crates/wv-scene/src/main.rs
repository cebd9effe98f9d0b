#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = wv_scene::run_from_env() {
        tracing::error!(message = "wedgeview.failed", exit_code = error.exit_code(), %error);
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
