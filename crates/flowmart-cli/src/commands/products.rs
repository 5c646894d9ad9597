use crate::display::{display_products_table, print_success, prompt_confirm};
use crate::{CliError, ProductCommands, Result};
use clap::Args;
use flowmart_api::FlowMart;

#[derive(Args)]
pub struct ProductArgs {
    /// Category the product belongs to
    #[arg(short, long, value_name = "CATEGORY_ID")]
    pub category: i64,

    /// Product name
    pub name: String,

    /// Quantity in stock, e.g. "12" or "3 boxes"
    pub quantity: String,
}

pub async fn handle(action: ProductCommands, flowmart: &FlowMart) -> Result<()> {
    match action {
        ProductCommands::Ls { category } => {
            let products = match category {
                Some(category_id) => flowmart.list_products_by_category(category_id).await?,
                None => flowmart.list_products().await?,
            };
            display_products_table(&products);
        }
        ProductCommands::Create(args) => {
            let product = flowmart
                .create_product(args.category, &args.name, &args.quantity)
                .await?;
            print_success(&format!(
                "Created product #{} '{}' in {}",
                product.id, product.name, product.category.name
            ));
        }
        ProductCommands::Update { id, product } => {
            let updated = flowmart
                .update_product(id, product.category, &product.name, &product.quantity)
                .await?;
            print_success(&format!(
                "Updated product #{} '{}' ({})",
                updated.id, updated.name, updated.quantity
            ));
        }
        ProductCommands::Rm { id, yes } => {
            if !yes && !prompt_confirm(&format!("Delete product #{}?", id), false)? {
                return Err(CliError::Cancelled);
            }
            let ack = flowmart.delete_product(id).await?;
            print_success(
                ack.message
                    .as_deref()
                    .unwrap_or(&format!("Deleted product #{}", id)),
            );
        }
    }
    Ok(())
}
