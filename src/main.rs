#[tokio::main]
async fn main() {
    // console_subscriber::init();

    if let Err(e) = atelier::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
