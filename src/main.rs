#[tokio::main]
async fn main() {
    cryptostats::cli::run().await;
}
