// src/sales.rs

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;

use crate::contract::Quantity;
use crate::db::DB;
use crate::error::Result;

/// Inclusive date range for one sales-history aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Trailing ~12-month window as of `now`: from 365 days before the first
    /// of now's month through the last day of the month before now's month.
    /// Calendar-day arithmetic on purpose, not month boundaries.
    pub fn trailing_twelve_months(now: NaiveDate) -> Self {
        let first_of_month = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap();

        Self {
            start: first_of_month - Duration::days(365),
            end: first_of_month - Duration::days(1),
        }
    }

    /// The same construction evaluated as of one year earlier. This is NOT
    /// the trailing window shifted by a year; the two drift apart around
    /// leap days and consumers depend on the existing arithmetic.
    pub fn prior_year_trailing_twelve_months(now: NaiveDate) -> Self {
        Self::trailing_twelve_months(now - Duration::days(365))
    }
}

#[async_trait]
pub trait SalesSource {
    /// Sum SALE and QTY over all events for (customer, item) inside the
    /// window. Zero matches is a normal outcome: (0.0, 0).
    async fn totals(
        &self,
        window: DateWindow,
        customer: &str,
        item: &str,
    ) -> Result<(f64, Quantity)>;
}

pub struct MongoSalesStore {
    collection: Collection<Document>,
}

impl MongoSalesStore {
    pub fn new(db: &DB) -> Self {
        Self {
            collection: db.sales_collection(),
        }
    }
}

#[async_trait]
impl SalesSource for MongoSalesStore {
    async fn totals(
        &self,
        window: DateWindow,
        customer: &str,
        item: &str,
    ) -> Result<(f64, Quantity)> {
        let filter = doc! {
            "DATE": { "$gte": bson_midnight(window.start), "$lte": bson_midnight(window.end) },
            "CUST": customer,
            "ITEM": item,
        };
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0, "SALE": 1, "QTY": 1 })
            .build();

        let mut cursor = self.collection.find(filter, options).await?;

        let mut sales = 0.0;
        let mut raw_qty = 0.0;
        while let Some(event) = cursor.try_next().await? {
            sales += numeric_field(&event, "SALE");
            raw_qty += numeric_field(&event, "QTY");
        }

        Ok((sales, Quantity::from_raw(raw_qty)))
    }
}

fn bson_midnight(date: NaiveDate) -> Bson {
    let instant = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
    Bson::DateTime(mongodb::bson::DateTime::from_millis(
        instant.timestamp_millis(),
    ))
}

// SALE and QTY arrive as a mix of doubles and ints in the warehouse
fn numeric_field(event: &Document, key: &str) -> f64 {
    match event.get(key) {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => *v as f64,
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}
