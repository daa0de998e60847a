// src/db.rs

use std::env;
use std::time::Duration;

use mongodb::bson::Document;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::error::{AppError, Result};

// explicit store timeouts; the driver defaults are much longer
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection endpoints for the two stores: sales history (linode) and
/// item costs (atlas).
pub struct Config {
    pub sales_uri: String,
    pub costs_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            sales_uri: required_var("MONGODB_URI")?,
            costs_uri: required_var("ATLAS_URI")?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AppError::Config(format!("{} is not set", name)))
}

/// Owns the two store clients. Built once in main and handed to the stores
/// that query through it; nothing global.
#[derive(Clone, Debug)]
pub struct DB {
    pub sales_client: Client,
    pub costs_client: Client,
}

impl DB {
    pub async fn new(config: Config) -> Result<Self> {
        Ok(Self {
            sales_client: connect(&config.sales_uri).await?,
            costs_client: connect(&config.costs_uri).await?,
        })
    }

    pub fn sales_collection(&self) -> Collection<Document> {
        self.sales_client.database("busse").collection("sales")
    }

    pub fn costs_collection(&self) -> Collection<Document> {
        self.costs_client.database("bussepricing").collection("costs")
    }
}

async fn connect(uri: &str) -> Result<Client> {
    let mut options = ClientOptions::parse(uri).await?;
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    Ok(Client::with_options(options)?)
}
