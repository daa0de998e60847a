// src/enrich.rs

use chrono::NaiveDate;
use log::{debug, warn};

use crate::contract::{Contract, SalesWindow};
use crate::cost::CostSource;
use crate::error::Result;
use crate::rates::RateConfig;
use crate::sales::{DateWindow, SalesSource};

/// Walks every line item once: unit cost, fee/margin fields, then the YTD
/// and PYTD sales windows. Any store failure aborts the whole pass so a
/// partial contract never reaches the serializer.
pub struct ContractEnricher<C, S> {
    rates: RateConfig,
    costs: C,
    sales: S,
}

impl<C: CostSource, S: SalesSource> ContractEnricher<C, S> {
    pub fn new(rates: RateConfig, costs: C, sales: S) -> Self {
        Self { rates, costs, sales }
    }

    pub async fn enrich(&self, contract: &mut Contract, today: NaiveDate) -> Result<()> {
        let ytd = DateWindow::trailing_twelve_months(today);
        let pytd = DateWindow::prior_year_trailing_twelve_months(today);

        for item in contract.items.iter_mut() {
            let cost = self.costs.unit_cost(&item.item_number).await?;

            item.cost = cost;
            item.distributor_fee = self.rates.distributor_pct * item.price;
            item.commission = self.rates.commission_pct * item.price;
            item.loaded_cost = cost + item.distributor_fee + item.commission;
            item.gross_profit = item.price - item.loaded_cost;
            item.gross_profit_pct = if item.price == 0.0 {
                warn!(
                    "item {}: price is zero, gross profit % undefined",
                    item.item_number
                );
                f64::NAN
            } else {
                item.gross_profit / item.price * 100.0
            };

            let (ytd_sales, ytd_qty) = self
                .sales
                .totals(ytd, &contract.customer_number, &item.item_number)
                .await?;
            contract.sales_history.ytd.insert(
                item.item_number.clone(),
                SalesWindow {
                    qty: ytd_qty,
                    sales: ytd_sales,
                },
            );

            let (pytd_sales, pytd_qty) = self
                .sales
                .totals(pytd, &contract.customer_number, &item.item_number)
                .await?;
            contract.sales_history.pytd.insert(
                item.item_number.clone(),
                SalesWindow {
                    qty: pytd_qty,
                    sales: pytd_sales,
                },
            );

            debug!(
                "item {}: cost {:.2}, loaded {:.2}, gp {:.2}",
                item.item_number, item.cost, item.loaded_cost, item.gross_profit
            );
        }

        Ok(())
    }
}
