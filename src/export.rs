// src/export.rs

use std::fs;
use std::path::Path;

use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::Result;

fn escape(cell: &str) -> String {
    cell.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the pipe-delimited report as a standalone HTML page, one table
/// cell per column. Formatting only; every value comes straight from the
/// report string.
pub fn html_document(contract_number: &str, report: &str) -> String {
    let mut html = format!(
        r#"<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Contract {}</title>
    <style>
        * {{
            font-family: Arial, Helvetica, sans-serif;
        }}
        table, th, td {{
            border: none;
            border-collapse: collapse;
            padding: 5px;
        }}
    </style>
</head>
<body>
<table>
"#,
        contract_number
    );

    for line in report.lines() {
        html.push_str("<tr>");
        for cell in line.split('|') {
            html.push_str("<td>");
            html.push_str(&escape(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Build the spreadsheet render of the report: one cell per pipe column, no
/// header row. Numeric-looking cells become number cells the way the
/// original spreadsheet carried them; everything else stays text.
pub fn report_workbook(report: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_report_rows(worksheet, report)?;

    Ok(workbook)
}

fn write_report_rows(worksheet: &mut Worksheet, report: &str) -> Result<()> {
    for (row, line) in report.lines().enumerate() {
        for (col, cell) in line.split('|').enumerate() {
            if cell.is_empty() {
                continue;
            }

            let row = row as u32;
            let col = col as u16;
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    worksheet.write_number(row, col, value)?;
                }
                _ => {
                    worksheet.write_string(row, col, cell)?;
                }
            }
        }
    }

    Ok(())
}

/// Write the spreadsheet and HTML renders next to each other, named by the
/// contract number.
pub fn write_outputs(out_dir: &Path, contract_number: &str, report: &str) -> Result<()> {
    let xlsx_path = out_dir.join(format!("{}.xlsx", contract_number));
    report_workbook(report)?.save(&xlsx_path)?;
    info!("wrote {}", xlsx_path.display());

    let html_path = out_dir.join(format!("{}.html", contract_number));
    fs::write(&html_path, html_document(contract_number, report))?;
    info!("wrote {}", html_path.display());

    Ok(())
}
