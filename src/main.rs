// src/main.rs

pub mod contract;
pub mod cost;
pub mod db;
pub mod enrich;
pub mod error;
pub mod export;
pub mod parser;
pub mod rates;
pub mod report;
pub mod sales;

use std::env;
use std::fs::File;
use std::path::PathBuf;

use chrono::Utc;
use log::info;

use crate::cost::MongoCostStore;
use crate::db::{Config, DB};
use crate::enrich::ContractEnricher;
use crate::error::Result;
use crate::rates::RateConfig;
use crate::sales::MongoSalesStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let contract_path = env::var("CONTRACT_FILE").unwrap_or_else(|_| "CONPRICE".to_string());
    let file = File::open(&contract_path)?;
    let mut contract = parser::parse_contract(file)?;
    info!(
        "parsed contract {} with {} items",
        contract.contract_number,
        contract.items.len()
    );

    let rates = RateConfig::from_env()?;
    let db = DB::new(Config::from_env()?).await?;
    let enricher = ContractEnricher::new(
        rates,
        MongoCostStore::new(&db),
        MongoSalesStore::new(&db),
    );

    enricher
        .enrich(&mut contract, Utc::now().date_naive())
        .await?;

    let report = report::serialize(&contract, &rates);
    print!("{}", report);

    export::write_outputs(&PathBuf::from("."), &contract.contract_number, &report)?;

    Ok(())
}
