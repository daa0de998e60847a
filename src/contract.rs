// src/contract.rs

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every contract line ships by the case.
pub const DEFAULT_UOM: &str = "CS";

/// Aggregated quantity for one sales window. Whole when the raw sum is
/// integral, otherwise kept fractional and rounded to 2 decimals.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Whole(i64),
    Fractional(f64),
}

impl Quantity {
    pub fn from_raw(raw: f64) -> Self {
        if raw.fract() == 0.0 {
            Quantity::Whole(raw as i64)
        } else {
            Quantity::Fractional((raw * 100.0).round() / 100.0)
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Whole(0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Whole(n) => write!(f, "{}", n),
            Quantity::Fractional(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SalesWindow {
    pub qty: Quantity,
    pub sales: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LineItem {
    pub item_number: String,
    pub item_description: String,
    pub price: f64,
    pub uom: String,
    // derived, written once by the enricher
    pub cost: f64,
    pub distributor_fee: f64,
    pub commission: f64,
    pub loaded_cost: f64,
    pub gross_profit: f64,
    pub gross_profit_pct: f64,
}

impl LineItem {
    pub fn new(item_number: String, item_description: String, price: f64) -> Self {
        Self {
            item_number,
            item_description,
            price,
            uom: DEFAULT_UOM.to_string(),
            cost: 0.0,
            distributor_fee: 0.0,
            commission: 0.0,
            loaded_cost: 0.0,
            gross_profit: 0.0,
            gross_profit_pct: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SalesHistory {
    pub ytd: HashMap<String, SalesWindow>,
    pub pytd: HashMap<String, SalesWindow>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Contract {
    pub contract_number: String,
    pub contract_name: String,
    pub customer_number: String,
    pub rep: String,
    pub start_date: String,
    pub end_date: String,
    pub shipping_terms: String,
    pub order_terms: String,
    pub notes: String,
    // insertion order = order of first appearance in the source file
    pub items: Vec<LineItem>,
    pub sales_history: SalesHistory,
}

impl Contract {
    /// Insert a line item, overwriting any earlier line with the same item
    /// number in place. Last row wins; the original position is kept.
    pub fn upsert_item(&mut self, item: LineItem) {
        self.sales_history
            .ytd
            .insert(item.item_number.clone(), SalesWindow::default());
        self.sales_history
            .pytd
            .insert(item.item_number.clone(), SalesWindow::default());

        match self
            .items
            .iter_mut()
            .find(|existing| existing.item_number == item.item_number)
        {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}
