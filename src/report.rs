// src/report.rs

use crate::contract::Contract;
use crate::rates::RateConfig;

pub const COLUMNS: usize = 11;

fn row(cells: Vec<String>) -> String {
    debug_assert_eq!(cells.len(), COLUMNS);
    cells.join("|") + "\n"
}

fn blank_row() -> String {
    row(vec![String::new(); COLUMNS])
}

fn padded(cells: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    out.resize(COLUMNS, String::new());
    out
}

/// Render the enriched contract into the fixed pipe-delimited layout the
/// downstream spreadsheet/HTML tooling parses positionally. Pure function;
/// exactly 11 columns per row.
pub fn serialize(contract: &Contract, rates: &RateConfig) -> String {
    let mut out = String::new();

    // notes block, value in the last column
    let mut notes_label = vec![String::new(); COLUMNS];
    notes_label[COLUMNS - 1] = "Notes".to_string();
    out += &row(notes_label);

    let mut notes_value = vec![String::new(); COLUMNS];
    notes_value[COLUMNS - 1] = contract.notes.clone();
    out += &row(notes_value);

    out += &row(padded(&["Contract", "Contract Name", "Customer", "Rep"]));
    out += &row(padded(&[
        &contract.contract_number,
        &contract.contract_name,
        &contract.customer_number,
        &contract.rep,
    ]));

    out += &blank_row();

    out += &row(padded(&["Start", "End", "Shipping Terms", "Order Terms"]));
    out += &row(padded(&[
        &contract.start_date,
        &contract.end_date,
        &contract.shipping_terms,
        &contract.order_terms,
    ]));

    out += &blank_row();

    // configured rates ride above the item table, fractional form preserved
    out += &row(padded(&[
        "",
        "",
        "",
        "",
        "",
        &format!("{:.2}%", rates.distributor_pct),
        &format!("{:.2}%", rates.commission_pct),
    ]));

    out += &row(padded(&[
        "Item Number",
        "Item Description",
        "UOM",
        "Price",
        "Cost",
        "Distributor Fee",
        "Commission",
        "Loaded Cost",
        "Gross Profit",
        "Gross Profit %",
    ]));

    for item in &contract.items {
        out += &row(padded(&[
            &item.item_number,
            &item.item_description,
            &item.uom,
            &format!("{:.2}", item.price),
            &format!("{:.2}", item.cost),
            &format!("{:.2}", item.distributor_fee),
            &format!("{:.2}", item.commission),
            &format!("{:.2}", item.loaded_cost),
            &format!("{:.2}", item.gross_profit),
            &format!("{:.2}", item.gross_profit_pct),
        ]));
    }

    out += &blank_row();

    out += &row(padded(&[
        "Item Number",
        "Item Description",
        "YTD Quantity",
        "YTD Sales",
        "",
        "PYTD Quantity",
        "PYTD Sales",
    ]));

    for item in &contract.items {
        let ytd = contract
            .sales_history
            .ytd
            .get(&item.item_number)
            .copied()
            .unwrap_or_default();
        let pytd = contract
            .sales_history
            .pytd
            .get(&item.item_number)
            .copied()
            .unwrap_or_default();

        out += &row(padded(&[
            &item.item_number,
            &item.item_description,
            &ytd.qty.to_string(),
            &format!("{:.2}", ytd.sales),
            "",
            &pytd.qty.to_string(),
            &format!("{:.2}", pytd.sales),
        ]));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{LineItem, Quantity, SalesHistory, SalesWindow};

    fn enriched_contract() -> Contract {
        let mut contract = Contract {
            contract_number: "C100".into(),
            contract_name: "ACME HOSPITAL".into(),
            customer_number: "CUST7".into(),
            rep: "JD".into(),
            start_date: "2023-01-01".into(),
            end_date: "2023-12-31".into(),
            shipping_terms: "FOB".into(),
            order_terms: "NET30".into(),
            notes: "SPECIAL PRICING 2023-01-01".into(),
            items: Vec::new(),
            sales_history: SalesHistory::default(),
        };

        let mut a100 = LineItem::new("A100".into(), "GAUZE PADS".into(), 100.0);
        a100.cost = 40.0;
        a100.commission = 4.0;
        a100.loaded_cost = 44.0;
        a100.gross_profit = 56.0;
        a100.gross_profit_pct = 56.0;
        contract.upsert_item(a100);

        let b200 = LineItem::new("B200".into(), "SPONGES".into(), 50.5);
        contract.upsert_item(b200);

        contract.sales_history.ytd.insert(
            "A100".into(),
            SalesWindow {
                qty: Quantity::Whole(24),
                sales: 1200.0,
            },
        );
        contract.sales_history.pytd.insert(
            "A100".into(),
            SalesWindow {
                qty: Quantity::Fractional(16.25),
                sales: 812.5,
            },
        );

        contract
    }

    fn rates() -> RateConfig {
        RateConfig::new(0.0, 0.04).unwrap()
    }

    #[test]
    fn every_row_has_eleven_columns() {
        let report = serialize(&enriched_contract(), &rates());
        assert!(report.ends_with('\n'));
        for line in report.lines() {
            assert_eq!(line.split('|').count(), COLUMNS, "row: {:?}", line);
        }
    }

    #[test]
    fn block_layout_matches_downstream_contract() {
        let report = serialize(&enriched_contract(), &rates());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "||||||||||Notes");
        assert_eq!(lines[1], "||||||||||SPECIAL PRICING 2023-01-01");
        assert_eq!(lines[2], "Contract|Contract Name|Customer|Rep|||||||");
        assert_eq!(lines[3], "C100|ACME HOSPITAL|CUST7|JD|||||||");
        assert_eq!(lines[4], "||||||||||");
        assert_eq!(lines[5], "Start|End|Shipping Terms|Order Terms|||||||");
        assert_eq!(lines[6], "2023-01-01|2023-12-31|FOB|NET30|||||||");
        assert_eq!(lines[7], "||||||||||");
        assert_eq!(lines[8], "|||||0.00%|0.04%||||");
        assert_eq!(
            lines[9],
            "Item Number|Item Description|UOM|Price|Cost|Distributor Fee|Commission|Loaded Cost|Gross Profit|Gross Profit %|"
        );
        assert_eq!(
            lines[10],
            "A100|GAUZE PADS|CS|100.00|40.00|0.00|4.00|44.00|56.00|56.00|"
        );
        assert_eq!(
            lines[11],
            "B200|SPONGES|CS|50.50|0.00|0.00|0.00|0.00|0.00|0.00|"
        );
        assert_eq!(lines[12], "||||||||||");
        assert_eq!(
            lines[13],
            "Item Number|Item Description|YTD Quantity|YTD Sales||PYTD Quantity|PYTD Sales||||"
        );
        assert_eq!(lines[14], "A100|GAUZE PADS|24|1200.00||16.25|812.50||||");
        assert_eq!(lines[15], "B200|SPONGES|0|0.00||0|0.00||||");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn item_order_is_preserved() {
        let report = serialize(&enriched_contract(), &rates());
        let a = report.find("A100|GAUZE PADS|CS").unwrap();
        let b = report.find("B200|SPONGES|CS").unwrap();
        assert!(a < b);
    }

    #[test]
    fn nan_gross_profit_pct_renders_as_sentinel() {
        let mut contract = enriched_contract();
        contract.items[1].gross_profit_pct = f64::NAN;

        let report = serialize(&contract, &rates());
        assert!(report.contains("B200|SPONGES|CS|50.50|0.00|0.00|0.00|0.00|0.00|NaN|"));
    }
}
