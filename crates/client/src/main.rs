//! Command-line entry point.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts from `frontend::main` instead.
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::Write;

    use anyhow::Context;
    use storefront_client::config::{AddArgs, ClientConfig, Command};
    use storefront_client::{FormController, HttpProductApi, ProductCatalog, SubmitOutcome, render};
    use storefront_core::Field;

    pub async fn run() -> anyhow::Result<()> {
        let config = ClientConfig::load().unwrap_or_else(|e| e.exit());

        storefront_observability::init(&config.log_level);
        tracing::info!(api_url = %config.api_url, "starting storefront client");

        let api = HttpProductApi::new(config.api_url.clone());
        let mut catalog = ProductCatalog::new();
        catalog.load(&api).await;

        let policy = config.merge_policy();
        let mut stdout = std::io::stdout().lock();

        if let Command::Add(args) = config.command {
            let mut form = FormController::with_policy(policy);
            let events = form.subscribe();
            fill_form(&mut form, args).await?;

            match form.submit(&api, &mut catalog).await {
                SubmitOutcome::Created(product) => {
                    tracing::info!(product_id = ?product.id, "submission accepted");
                }
                SubmitOutcome::Failed(err) => {
                    tracing::warn!(error = %err.cause, "submission failed");
                }
                SubmitOutcome::Skipped(skipped) => {
                    tracing::debug!(?skipped, "submission skipped");
                }
            }

            let message = form.error_message().or(form.success_message());
            render::write_form_outcome(&mut stdout, message, &events.drain())
                .context("failed to write submission outcome")?;
        }

        render::write_table(&mut stdout, catalog.view()).context("failed to write table view")?;
        writeln!(stdout)?;
        render::write_cards(&mut stdout, catalog.view()).context("failed to write card view")?;

        Ok(())
    }

    async fn fill_form(form: &mut FormController, args: AddArgs) -> anyhow::Result<()> {
        form.update_field(Field::Title, args.title);
        form.update_field(Field::Price, args.price);
        form.update_field(Field::Description, args.description);
        form.update_field(Field::Category, args.category);

        form.select_image(args.image.as_deref())
            .await
            .context("failed to encode product image")?;

        Ok(())
    }
}
