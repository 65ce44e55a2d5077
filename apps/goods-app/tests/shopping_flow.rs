//! End-to-end flow through the app layer on a real database file.

use std::path::PathBuf;
use std::time::Duration;

use goods_app::commands::{category, item, settings, transfer};
use goods_app::{AppConfig, GoodsApp};
use goods_core::{ItemForm, SortOrder};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("goods-flow-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn config_for(dir: &PathBuf) -> AppConfig {
    AppConfig {
        data_dir: Some(dir.clone()),
        ..AppConfig::default()
    }
}

fn form(category_id: i64, name: &str, price: &str, quantity: &str, unit: i64) -> ItemForm {
    ItemForm {
        name: name.to_string(),
        price: price.to_string(),
        quantity: quantity.to_string(),
        quantity_type: unit.to_string(),
        ..ItemForm::for_category(category_id)
    }
}

#[tokio::test]
async fn test_feed_follows_items_and_selection() {
    let dir = scratch_dir("feed");
    let app = GoodsApp::start(config_for(&dir)).await.unwrap();
    let mut feed = app.home_feed();

    let initial = feed.next().await.unwrap().unwrap();
    assert_eq!(initial.categories.len(), 1);
    assert_eq!(initial.selected_category.as_ref().map(|c| c.id), Some(1));
    assert!(initial.rows.is_empty());

    // A: 10 for 2 kg, B: 9 for 1 kg
    let a = item::save_item(&app.db, form(1, "A", "10", "2", 2)).await.unwrap();
    let view = tokio::time::timeout(Duration::from_secs(2), feed.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(view.rows.len(), 1);

    item::save_item(&app.db, form(1, "B", "9", "1", 2)).await.unwrap();
    let view = feed.next().await.unwrap().unwrap();
    assert_eq!(view.cheapest_item_id, Some(a.id));

    // Creating a list selects it; the feed switches to the empty list
    let party = category::create_category(&app.db, "Party".into()).await.unwrap();
    let view = feed.next().await.unwrap().unwrap();
    assert_eq!(view.selected_category.as_ref().map(|c| c.id), Some(party.id));
    assert!(view.rows.is_empty());

    app.shutdown().await;
    assert!(feed.next().await.is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_data_survives_restart_and_round_trips_through_export() {
    let dir = scratch_dir("restart");

    let app = GoodsApp::start(config_for(&dir)).await.unwrap();
    let weekly = category::create_category(&app.db, "Weekly".into()).await.unwrap();
    item::save_item(&app.db, form(weekly.id, "Juice", "2,00", "1500", 3))
        .await
        .unwrap();
    item::save_item(&app.db, form(weekly.id, "Milk", "1.20", "1", 4))
        .await
        .unwrap();
    settings::set_sort_order(&app.db, SortOrder::UnitPrice).await.unwrap();

    let export_path = dir.join("backup.json");
    let report = transfer::export_to_path(&app.db, &export_path).await.unwrap();
    assert_eq!(report.items, 2);
    app.shutdown().await;

    // Reopen the same file
    let app = GoodsApp::start(config_for(&dir)).await.unwrap();
    let home = item::get_home(&app.db).await.unwrap();
    assert_eq!(home.selected_category.as_ref().map(|c| c.id), Some(weekly.id));
    assert_eq!(home.sort_order, SortOrder::UnitPrice);
    // Juice: 2.00 / 1500 ml = 1.33/l, Milk: 1.20/l
    let names: Vec<&str> = home.rows.iter().map(|row| row.item.name.as_str()).collect();
    assert_eq!(names, vec!["Milk", "Juice"]);
    app.shutdown().await;

    // Import into a separate store
    let other_dir = scratch_dir("import");
    let other = GoodsApp::start(config_for(&other_dir)).await.unwrap();
    let summary = transfer::import_from_path(&other.db, &export_path)
        .await
        .unwrap();
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.items, 2);
    assert_eq!(other.db.inner().items().count().await.unwrap(), 2);
    other.shutdown().await;

    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_dir_all(&other_dir);
}
