use crate::{CliError, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Password};
use flowmart_core::{Category, ErrorKind, FlowMartError, Product, UserAccount};

/// Plain box-drawn table sized to its widest cells.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            max_widths: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.max_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.separator('┌', '┬', '┐'));
        out.push_str(&self.line(&self.headers));
        out.push_str(&self.separator('├', '┼', '┤'));
        for row in &self.rows {
            out.push_str(&self.line(row));
        }
        out.push_str(&self.separator('└', '┴', '┘'));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn separator(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.max_widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(&middle.to_string()), right)
    }

    fn line(&self, cells: &[String]) -> String {
        let mut out = String::from("│");
        for (i, width) in self.max_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format!(" {:<width$} │", cell, width = width));
        }
        out.push('\n');
        out
    }
}

pub fn display_categories_table(categories: &[Category]) {
    if categories.is_empty() {
        print_info("No categories yet. Create one with 'flowmart categories create <name>'.");
        return;
    }

    let mut table = Table::new(&["ID", "Name", "Created"]);
    for category in categories {
        table.add_row(vec![
            category.id.to_string(),
            category.name.clone(),
            category
                .created_at_utc()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.print();
}

pub fn display_products_table(products: &[Product]) {
    if products.is_empty() {
        print_info("No products found.");
        return;
    }

    let mut table = Table::new(&["ID", "Name", "Quantity", "Category"]);
    for product in products {
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            product.quantity.clone(),
            format!("{} (#{})", product.category.name, product.category.id),
        ]);
    }
    table.print();
}

pub fn display_user(user: &UserAccount) {
    println!("{:<8} {}", "ID:".bold(), user.id);
    println!("{:<8} {}", "Name:".bold(), user.name);
    println!("{:<8} {}", "Email:".bold(), user.email);
    println!("{:<8} {}", "Phone:".bold(), user.phone);
    if let Some(created) = user.created_at_utc() {
        println!("{:<8} {}", "Joined:".bold(), created.format("%Y-%m-%d"));
    }
}

/// Print a failed command, with a hint when the fix is obvious.
pub fn report_error(error: &CliError) {
    match error {
        CliError::Api(err) => {
            print_error(&describe_failure(err));
            if err.is_unauthorized() {
                print_info("Your session is missing or expired. Run 'flowmart login <email>'.");
            } else if err.kind() == ErrorKind::Network {
                print_info("Check your connection or the configured base URL ('flowmart config get api.base_url').");
            }
        }
        other => print_error(&format!("Error: {}", other)),
    }
}

pub fn describe_failure(error: &FlowMartError) -> String {
    match error {
        FlowMartError::Validation(e) => format!("Invalid {}: {}", e.field, e.message),
        FlowMartError::Network(e) => format!("Network error: {}", e.message),
        FlowMartError::Api(e) if e.is_contract_violation() => {
            format!("Unexpected response from server: {}", e.message)
        }
        FlowMartError::Api(e) => format!("Server returned {}: {}", e.status_code, e.message),
    }
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    let result = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(result)
}

pub fn prompt_password(message: &str, confirm: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt(message);
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Status messages
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
