use flowmart_cli::display::report_error;

#[tokio::main]
async fn main() {
    if let Err(e) = flowmart_cli::run().await {
        report_error(&e);
        std::process::exit(1);
    }
}
