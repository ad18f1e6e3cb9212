use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};

use super::user_store::USERS;

/// Builds the client once at startup; server selection gives up after 5s.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, String> {
    let mut opts = ClientOptions::parse(uri).await.map_err(|e| e.to_string())?;
    opts.server_selection_timeout = Some(Duration::from_secs(5));
    opts.app_name = Some("capital-care".to_string());

    let client = Client::with_options(opts).map_err(|e| e.to_string())?;
    Ok(client.database(db_name))
}

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // users: unique email
    let col = db.collection::<mongodb::bson::Document>(USERS);
    let model = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    col.create_index(model, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
