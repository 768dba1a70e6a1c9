use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::models::{TreeMeasurement, YieldEstimate};

/// Format the measured inputs as a string.
pub fn format_measurement(tree: &TreeMeasurement) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Tree Measurement".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Input", "Value", "Unit"]);

    table.add_row(vec![
        Cell::new("DBH"),
        Cell::new(format!("{:.1}", tree.dbh)),
        Cell::new("inches"),
    ]);
    table.add_row(vec![
        Cell::new("Total Height"),
        Cell::new(format!("{:.1}", tree.total_height)),
        Cell::new("feet"),
    ]);
    table.add_row(vec![
        Cell::new("Merchantable Top"),
        Cell::new(format!("{:.1}", tree.merch_top)),
        Cell::new("inches"),
    ]);
    table.add_row(vec![
        Cell::new("Stand Age"),
        Cell::new(format!("{}", tree.age)),
        Cell::new("years"),
    ]);
    table.add_row(vec![
        Cell::new("Thinned"),
        Cell::new(if tree.thinned { "yes" } else { "no" }),
        Cell::new(""),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the measured inputs.
pub fn print_measurement(tree: &TreeMeasurement) {
    print!("{}", format_measurement(tree));
}

/// Format a table of model estimates as a string.
pub fn format_estimate_table(estimates: &[YieldEstimate]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Green Weight Estimates".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Model", "Green Tons", "Merch Ratio", "Source"]);

    for est in estimates {
        let ratio = est
            .merch_ratio
            .map(|r| format!("{:.4}", r))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(est.model.to_string()),
            Cell::new(format!("{:.4}", est.green_tons)),
            Cell::new(ratio),
            Cell::new(est.model.citation()),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print a formatted table of model estimates.
pub fn print_estimate_table(estimates: &[YieldEstimate]) {
    print!("{}", format_estimate_table(estimates));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StemModel;

    #[test]
    fn test_format_measurement() {
        let tree = TreeMeasurement::new(12.0, 70.0);
        let out = format_measurement(&tree);
        assert!(out.contains("Tree Measurement"));
        assert!(out.contains("12.0"));
        assert!(out.contains("70.0"));
        assert!(out.contains("yes"));
    }

    #[test]
    fn test_format_estimate_table() {
        let estimates = vec![
            YieldEstimate {
                model: StemModel::PmrcLowerCoastal,
                green_tons: 0.695724,
                merch_ratio: None,
            },
            YieldEstimate {
                model: StemModel::BaldwinWestGulf,
                green_tons: 0.413186,
                merch_ratio: Some(0.996131),
            },
        ];
        let out = format_estimate_table(&estimates);
        assert!(out.contains("PMRC Lower Coastal Plain"));
        assert!(out.contains("0.6957"));
        assert!(out.contains("0.9961"));
        assert!(out.contains("SO-236"));
    }

    #[test]
    fn test_format_estimate_table_empty() {
        let out = format_estimate_table(&[]);
        assert!(out.contains("Green Weight Estimates"));
    }
}
