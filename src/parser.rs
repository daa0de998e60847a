// src/parser.rs

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::contract::{Contract, LineItem, SalesHistory};
use crate::error::{AppError, Result};

// CONPRICE positional layout (no header row, 16 columns)
const COL_CONTRACT_NUMBER: usize = 0;
const COL_CUSTOMER_NUMBER: usize = 1;
const COL_CONTRACT_NAME: usize = 2;
const COL_REP: usize = 3;
const COL_START_DATE: usize = 5;
const COL_END_DATE: usize = 6;
const COL_SHIPPING_TERMS: usize = 7;
const COL_ORDER_TERMS: usize = 8;
const COL_NOTES: usize = 10;
const COL_ITEM_NUMBER: usize = 12;
const COL_PRICE: usize = 14;
const COL_ITEM_DESCRIPTION: usize = 15;

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").to_string()
}

/// Parse the raw ROI contract export into a `Contract`. Rows without an item
/// number are dropped before anything else; the first surviving row supplies
/// the header fields.
pub fn parse_contract<R: Read>(input: R) -> Result<Contract> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if field(&record, COL_ITEM_NUMBER).trim().is_empty() {
            continue;
        }
        rows.push(record);
    }

    let header = rows.first().ok_or_else(|| {
        AppError::MalformedInput("no rows with an item number in contract file".to_string())
    })?;

    // source quirk: notes concatenates the notes column with the start date
    let notes = format!(
        "{} {}",
        field(header, COL_NOTES),
        field(header, COL_START_DATE)
    );

    let mut contract = Contract {
        contract_number: field(header, COL_CONTRACT_NUMBER),
        contract_name: field(header, COL_CONTRACT_NAME),
        customer_number: field(header, COL_CUSTOMER_NUMBER),
        rep: field(header, COL_REP),
        start_date: field(header, COL_START_DATE),
        end_date: field(header, COL_END_DATE),
        shipping_terms: field(header, COL_SHIPPING_TERMS),
        order_terms: field(header, COL_ORDER_TERMS),
        notes,
        items: Vec::new(),
        sales_history: SalesHistory::default(),
    };

    for row in &rows {
        let item_number = field(row, COL_ITEM_NUMBER);
        let raw_price = field(row, COL_PRICE);
        let price = raw_price.trim().parse::<f64>().map_err(|_| {
            AppError::MalformedInput(format!(
                "item {}: price {:?} is not numeric",
                item_number, raw_price
            ))
        })?;

        contract.upsert_item(LineItem::new(
            item_number,
            field(row, COL_ITEM_DESCRIPTION),
            price,
        ));
    }

    Ok(contract)
}
