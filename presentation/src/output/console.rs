//! Console output formatter for cap status and policy results

use colored::Colorize;
use quotacap_application::RetryBudget;
use quotacap_domain::{CapSettings, CategoryName, DISABLED_SENTINEL};
use std::collections::BTreeMap;

/// Formats quotacap results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the status of every category as a table
    pub fn format_status(status: &BTreeMap<CategoryName, CapSettings>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Quota Caps"));
        output.push('\n');

        if status.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                "No categories registered. Run `quotacap generate` first.".yellow()
            ));
            output.push_str(&Self::footer());
            return output;
        }

        let width = status
            .keys()
            .map(|name| name.as_str().chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        output.push_str(&format!(
            "\n{:<width$}  {:>10}  {}\n",
            "Category".cyan().bold(),
            "Cap".cyan().bold(),
            "Enabled".cyan().bold(),
            width = width
        ));
        output.push_str(&format!("{}\n", "-".repeat(width + 22)));

        for (name, settings) in status {
            let cap = if settings.cap == DISABLED_SENTINEL {
                "no cap".dimmed().to_string()
            } else {
                settings.cap.to_string()
            };
            let enabled = if settings.enabled {
                "on".green().to_string()
            } else {
                "off".red().to_string()
            };
            output.push_str(&format!(
                "{:<width$}  {:>10}  {}\n",
                name.as_str(),
                cap,
                enabled,
                width = width
            ));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Categories:".cyan().bold(),
            status.len()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format the status as JSON
    pub fn format_status_json(status: &BTreeMap<CategoryName, CapSettings>) -> String {
        serde_json::to_string_pretty(status).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the outcome of a generation run
    pub fn format_generation(success: bool, categories: usize, budget: RetryBudget) -> String {
        if success {
            format!(
                "{} {} categories registered\n",
                "Generated:".green().bold(),
                categories
            )
        } else if budget.can_retry() {
            format!(
                "{} attempt {}/{} failed, {} retries left\n",
                "Generation failed:".yellow().bold(),
                budget.attempts(),
                budget.max_attempts(),
                budget.remaining()
            )
        } else {
            format!(
                "{} retry budget exhausted after {} attempts\n",
                "Generation failed:".red().bold(),
                budget.attempts()
            )
        }
    }

    /// Format the result of applying the cap policy
    pub fn format_clamp(category: Option<&str>, raw: i64, result: i64) -> String {
        let category = category.unwrap_or("(none)");
        if result == raw {
            format!(
                "{} {} {} {}\n",
                "Quota:".cyan().bold(),
                result,
                "unchanged in".dimmed(),
                category
            )
        } else {
            format!(
                "{} {} {} {} {}\n",
                "Quota:".cyan().bold(),
                raw.to_string().dimmed(),
                "->".yellow(),
                result.to_string().bold(),
                format!("(capped in {})", category).dimmed()
            )
        }
    }

    /// Format a cap validation verdict
    pub fn format_validation(value: i64, valid: bool) -> String {
        if valid {
            format!("{} {}\n", "Valid cap:".green().bold(), value)
        } else {
            format!(
                "{} {} (must be -1 or >= 0)\n",
                "Invalid cap:".red().bold(),
                value
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
