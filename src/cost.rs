// src/cost.rs

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;

use crate::db::DB;
use crate::error::Result;

#[async_trait]
pub trait CostSource {
    /// Unit cost for an item alias. A missing cost record means the cost is
    /// unknown and comes back as 0.0, not as an error.
    async fn unit_cost(&self, alias: &str) -> Result<f64>;
}

pub struct MongoCostStore {
    collection: Collection<Document>,
}

impl MongoCostStore {
    pub fn new(db: &DB) -> Self {
        Self {
            collection: db.costs_collection(),
        }
    }
}

#[async_trait]
impl CostSource for MongoCostStore {
    async fn unit_cost(&self, alias: &str) -> Result<f64> {
        let record = self.collection.find_one(doc! { "alias": alias }, None).await?;

        let cost = match record.as_ref().and_then(|r| r.get("cost")) {
            Some(Bson::Double(v)) => *v,
            Some(Bson::Int32(v)) => *v as f64,
            Some(Bson::Int64(v)) => *v as f64,
            _ => 0.0,
        };

        Ok(cost)
    }
}
