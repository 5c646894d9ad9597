use crate::display::{
    display_user, print_info, print_success, print_warning, prompt_confirm, prompt_password,
};
use crate::{CliError, ProfileCommands, Result};
use clap::Args;
use flowmart_api::{FlowMart, ProfileUpdate};

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Prompt for a new password
    #[arg(long)]
    pub password: bool,
}

pub async fn handle(action: ProfileCommands, flowmart: &FlowMart) -> Result<()> {
    match action {
        ProfileCommands::Update(args) => handle_update(args, flowmart).await,
        ProfileCommands::Delete { yes } => handle_delete(yes, flowmart).await,
    }
}

async fn handle_update(args: UpdateArgs, flowmart: &FlowMart) -> Result<()> {
    let password = if args.password {
        Some(prompt_password("New password", true)?)
    } else {
        None
    };

    let update = ProfileUpdate {
        name: args.name,
        email: args.email,
        phone: args.phone,
        password,
    };
    if update.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to update; pass at least one of --name, --email, --phone, --password"
                .to_string(),
        ));
    }

    let user = flowmart.update_profile(&update).await?;
    print_success("Profile updated.");
    display_user(&user);
    Ok(())
}

async fn handle_delete(yes: bool, flowmart: &FlowMart) -> Result<()> {
    if !yes {
        print_warning("This permanently deletes your account and all of its data.");
        if !prompt_confirm("Delete your account?", false)? {
            return Err(CliError::Cancelled);
        }
    }

    let ack = flowmart.delete_account().await?;
    flowmart.logout();
    print_success(ack.message.as_deref().unwrap_or("Account deleted."));
    print_info("Stored session token removed.");
    Ok(())
}
