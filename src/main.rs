#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    quotation_server::run().await
}
