#[tokio::main]
async fn main() {
    if let Err(e) = complisense::api::run_cli().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
