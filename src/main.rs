#[tokio::main]
async fn main() -> std::io::Result<()> {
    saas_platform::run().await
}
