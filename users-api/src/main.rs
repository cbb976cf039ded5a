use users_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    ServiceBuilder::new()
        .with_config(config)
        .build()
        .serve()
        .await
}
