use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    wattline::run().await
}
