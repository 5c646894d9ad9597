use crate::display::{display_categories_table, print_success, prompt_confirm};
use crate::{CategoryCommands, CliError, Result};
use flowmart_api::FlowMart;

pub async fn handle(action: CategoryCommands, flowmart: &FlowMart) -> Result<()> {
    match action {
        CategoryCommands::Ls => {
            let categories = flowmart.list_categories().await?;
            display_categories_table(&categories);
        }
        CategoryCommands::Create { name } => {
            let category = flowmart.create_category(&name).await?;
            print_success(&format!("Created category #{} '{}'", category.id, category.name));
        }
        CategoryCommands::Update { id, name } => {
            let category = flowmart.update_category(id, &name).await?;
            print_success(&format!("Renamed category #{} to '{}'", category.id, category.name));
        }
        CategoryCommands::Rm { id, yes } => {
            if !yes && !prompt_confirm(&format!("Delete category #{}?", id), false)? {
                return Err(CliError::Cancelled);
            }
            let ack = flowmart.delete_category(id).await?;
            print_success(
                ack.message
                    .as_deref()
                    .unwrap_or(&format!("Deleted category #{}", id)),
            );
        }
    }
    Ok(())
}
