//! `bridge mongo` commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use hostbridge_core::capability::db::CreateUniqueIndexParams;
use hostbridge_core::capability::db::mongo::{QueryItemsParams, WithId};

use super::parse_json;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct MongoCommand {
    #[command(subcommand)]
    pub command: MongoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MongoSubcommand {
    /// Open the configured database
    Connect,

    /// Query a collection
    Find(FindArgs),

    /// Insert documents (stamps `ct` and `mt`)
    Add {
        collection: String,
        /// A JSON document or array of documents
        docs: String,
    },

    /// Replace documents by `_id` (refreshes `mt`)
    Update {
        collection: String,
        /// A JSON document or array of documents, each with an `_id`
        docs: String,
    },

    /// Remove documents by `_id`
    Remove {
        collection: String,
        /// A JSON document or array of documents, each with an `_id`
        docs: String,
    },

    /// Drop a whole collection
    Drop { collection: String },

    /// Print the document count of every collection
    Stats,

    /// Create a unique index over one or more fields
    CreateUniqueIndex {
        collection: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct FindArgs {
    pub collection: String,

    /// Page number, starting at 1
    #[arg(long, requires = "limit")]
    pub page: Option<u32>,

    /// Maximum number of documents per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Filter object, e.g. '{"author": "Herbert"}'
    #[arg(long)]
    pub filters: Option<String>,

    /// Sort order as field:direction, e.g. `title:1` or `mt:-1` (repeatable)
    #[arg(long)]
    pub sort: Vec<String>,
}

impl FindArgs {
    fn to_params(&self) -> Result<QueryItemsParams> {
        let mut params = QueryItemsParams::new(&self.collection);

        if let Some(limit) = self.limit {
            params = params.paginate(self.page.unwrap_or(1), limit);
        }

        if let Some(filters) = &self.filters {
            let Value::Object(filters) = parse_json(filters, "--filters")? else {
                bail!("--filters must be a JSON object");
            };
            params.filters = Some(filters);
        }

        for sort in &self.sort {
            let (field, direction) = parse_sort(sort)?;
            params = params.sort_by(field, direction);
        }

        Ok(params)
    }
}

fn parse_sort(raw: &str) -> Result<(&str, i32)> {
    let (field, direction) = match raw.rsplit_once(':') {
        Some((field, direction)) => (field, direction),
        None => (raw, "1"),
    };

    let direction = match direction {
        "1" | "asc" => 1,
        "-1" | "desc" => -1,
        other => bail!("Invalid sort direction '{}': use 1 or -1", other),
    };

    if field.is_empty() {
        bail!("Sort field must not be empty");
    }

    Ok((field, direction))
}

/// Accepts a single document or an array of them.
fn parse_docs<D: DeserializeOwned>(raw: &str) -> Result<Vec<D>> {
    let value = match parse_json(raw, "documents")? {
        Value::Array(docs) => Value::Array(docs),
        doc => Value::Array(vec![doc]),
    };

    serde_json::from_value(value).context("Documents do not have the expected shape")
}

pub async fn handle(cmd: MongoCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let mongo = bridge.mongo();

    match cmd.command {
        MongoSubcommand::Connect => {
            mongo.connect().await.context("Failed to connect")?;
            output::success("Connected");
        }
        MongoSubcommand::Find(args) => {
            let params = args.to_params()?;
            let docs: Vec<WithId<Map<String, Value>>> =
                mongo.find(&params).await.context("Failed to find documents")?;
            output::json(&docs)?;
        }
        MongoSubcommand::Add { collection, docs } => {
            let docs: Vec<Map<String, Value>> = parse_docs(&docs)?;
            let added = mongo
                .collection(collection)
                .add(&docs)
                .await
                .context("Failed to add documents")?;
            output::json(&added)?;
        }
        MongoSubcommand::Update { collection, docs } => {
            let docs: Vec<WithId<Map<String, Value>>> = parse_docs(&docs)?;
            let updated = mongo
                .collection(collection)
                .update(&docs)
                .await
                .context("Failed to update documents")?;
            output::json(&updated)?;
        }
        MongoSubcommand::Remove { collection, docs } => {
            let docs: Vec<WithId<Map<String, Value>>> = parse_docs(&docs)?;
            let removed = mongo
                .collection(collection)
                .remove(&docs)
                .await
                .context("Failed to remove documents")?;
            output::json(&removed)?;
        }
        MongoSubcommand::Drop { collection } => {
            mongo
                .drop(&collection)
                .await
                .context("Failed to drop collection")?;
            output::success(&format!("Dropped {}", collection));
        }
        MongoSubcommand::Stats => {
            let stats = mongo.stats().await.context("Failed to get stats")?;
            output::json(&stats)?;
        }
        MongoSubcommand::CreateUniqueIndex { collection, fields } => {
            let params = [CreateUniqueIndexParams::new(collection, fields)];
            let names = mongo
                .create_unique_indexes(&params)
                .await
                .context("Failed to create index")?;
            output::names(&names, "No index created.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn find(limit: Option<u32>, page: Option<u32>) -> FindArgs {
        FindArgs {
            collection: "books".to_string(),
            page,
            limit,
            filters: None,
            sort: Vec::new(),
        }
    }

    #[test]
    fn find_without_limit_has_no_pagination() {
        let params = find(None, None).to_params().unwrap();
        assert_eq!(params.pagination, None);
    }

    #[test]
    fn find_page_defaults_to_first() {
        let params = find(Some(10), None).to_params().unwrap();
        let pagination = params.pagination.unwrap();
        assert_eq!(pagination.page, Some(1));
        assert_eq!(pagination.limit, Some(10));
    }

    #[test]
    fn find_rejects_non_object_filters() {
        let mut args = find(None, None);
        args.filters = Some("[1]".to_string());
        assert!(args.to_params().is_err());
    }

    #[test]
    fn sort_directions() {
        assert_eq!(parse_sort("title").unwrap(), ("title", 1));
        assert_eq!(parse_sort("mt:-1").unwrap(), ("mt", -1));
        assert_eq!(parse_sort("mt:desc").unwrap(), ("mt", -1));
        assert!(parse_sort("mt:up").is_err());
        assert!(parse_sort(":1").is_err());
    }

    #[test]
    fn single_document_becomes_a_list() {
        let docs: Vec<Map<String, Value>> = parse_docs(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["title"], json!("Dune"));
    }

    #[test]
    fn update_documents_need_an_id() {
        let result: Result<Vec<WithId<Map<String, Value>>>> = parse_docs(r#"[{"title": "Dune"}]"#);
        assert!(result.is_err());

        let docs: Vec<WithId<Map<String, Value>>> =
            parse_docs(r#"[{"_id": "b1", "title": "Dune"}]"#).unwrap();
        assert_eq!(docs[0].id, "b1");
    }
}
