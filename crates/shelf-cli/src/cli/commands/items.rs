//! Item CRUD command handlers.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table, presets};
use shelf_core::api::ApiClient;
use shelf_core::config::Config;
use shelf_core::types::Item;

use super::require_session;

fn client_and_token(config: &Config) -> Result<(ApiClient, String)> {
    let session = require_session()?;
    let token = session.credential().unwrap_or_default().to_string();
    Ok((ApiClient::new(config.base_url.clone()), token))
}

pub async fn list(config: &Config) -> Result<()> {
    let (api, token) = client_and_token(config)?;
    let items = api.list_items(&token).await?;

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }
    println!("{}", items_table(&items));
    Ok(())
}

pub async fn create(config: &Config, name: &str, description: &str) -> Result<()> {
    let (api, token) = client_and_token(config)?;
    let item = api.create_item(&token, name, description).await?;
    println!("Created item {} ({})", item.id, item.name);
    Ok(())
}

pub async fn update(config: &Config, id: i64, name: &str, description: &str) -> Result<()> {
    let (api, token) = client_and_token(config)?;
    let item = api.update_item(&token, id, name, description).await?;
    println!("Updated item {} ({})", item.id, item.name);
    Ok(())
}

pub async fn delete(config: &Config, id: i64) -> Result<()> {
    let (api, token) = client_and_token(config)?;
    api.delete_item(&token, id).await?;
    println!("Deleted item {id}");
    Ok(())
}

fn items_table(items: &[Item]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Description"]);
    for item in items {
        table.add_row(vec![
            item.id.to_string(),
            item.name.clone(),
            item.description.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_table_contains_all_rows() {
        let items = vec![
            Item {
                id: 1,
                name: "Widget".to_string(),
                description: "A widget".to_string(),
            },
            Item {
                id: 2,
                name: "Gadget".to_string(),
                description: String::new(),
            },
        ];

        let rendered = items_table(&items).to_string();
        assert!(rendered.contains("Widget"));
        assert!(rendered.contains("Gadget"));
        assert!(rendered.contains('1'));
        assert!(rendered.contains('2'));
    }
}
