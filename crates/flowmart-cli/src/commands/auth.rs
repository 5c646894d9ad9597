use crate::display::{display_user, print_info, print_success, prompt_password};
use crate::Result;
use clap::Args;
use flowmart_api::FlowMart;
use log::debug;

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Phone number, digits with an optional leading +
    #[arg(long)]
    pub phone: String,

    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Log in straight after registering
    #[arg(long)]
    pub login: bool,
}

pub async fn handle_login(args: LoginArgs, flowmart: &FlowMart) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password", false)?,
    };

    let session = flowmart.login(&args.email, &password).await?;
    print_success(&format!(
        "Logged in as {} <{}>",
        session.user.name, session.user.email
    ));
    if let Some(message) = session.message {
        debug!("Server said: {}", message);
    }
    Ok(())
}

pub fn handle_logout(flowmart: &FlowMart) -> Result<()> {
    if !flowmart.is_logged_in() {
        print_info("Not logged in.");
        return Ok(());
    }
    flowmart.logout();
    print_success("Logged out.");
    Ok(())
}

pub async fn handle_register(args: RegisterArgs, flowmart: &FlowMart) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Choose a password", true)?,
    };

    let user = flowmart
        .register(&args.name, &args.email, &args.phone, &password)
        .await?;
    print_success(&format!("Registered {} (user #{})", user.name, user.id));

    if args.login {
        let session = flowmart.login(&args.email, &password).await?;
        print_success(&format!("Logged in as {}", session.user.name));
    } else {
        print_info(&format!("Log in with 'flowmart login {}'.", args.email));
    }
    Ok(())
}

pub async fn handle_whoami(flowmart: &FlowMart) -> Result<()> {
    let user = flowmart.fetch_profile().await?;
    display_user(&user);
    Ok(())
}
