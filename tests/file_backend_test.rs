use shoplist::api::{Hydration, ShoppingListApi};
use shoplist::config::ShopConfig;
use shoplist::error::ShopError;
use shoplist::model::{seed_items, ShoppingListItem};
use shoplist::store::fs::FileBackend;
use shoplist::store::gateway::{PersistenceGateway, SaveOutcome};
use shoplist::store::StorageBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path().join("store"));
    (dir, backend)
}

#[tokio::test]
async fn test_missing_root_reads_as_absent() {
    let (_dir, backend) = setup();
    assert_eq!(backend.read("shopping-list").await.unwrap(), None);
}

#[tokio::test]
async fn test_write_creates_root_and_leaves_no_tmp_files() {
    let (dir, backend) = setup();
    backend.write("shopping-list", "[]").await.unwrap();

    let path = dir.path().join("store").join("shopping-list.json");
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

    for entry in fs::read_dir(dir.path().join("store")).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[tokio::test]
async fn test_rejects_keys_that_escape_the_root() {
    let (_dir, backend) = setup();
    let err = backend.write("../outside", "x").await.unwrap_err();
    assert!(matches!(err, ShopError::InvalidKey(_)));
}

#[tokio::test]
async fn test_remove_missing_key_is_ok() {
    let (_dir, backend) = setup();
    backend.remove("never-written").await.unwrap();
}

#[tokio::test]
async fn test_gateway_round_trip_on_disk() {
    let (_dir, backend) = setup();
    let gateway = PersistenceGateway::new(backend);
    let items = seed_items(&["Coffee", "Tea", "Milk"], 1_700_000_000_000);

    assert_eq!(
        gateway.save("shopping-list", &items).await.unwrap(),
        SaveOutcome::Written
    );
    let loaded: Option<Vec<ShoppingListItem>> = gateway.load("shopping-list").await.unwrap();
    assert_eq!(loaded, Some(items));
}

#[tokio::test]
async fn test_stored_json_matches_item_shape() {
    let (dir, backend) = setup();
    let gateway = PersistenceGateway::new(backend);
    let mut items = seed_items(&["Coffee"], 10);
    items[0].completed_at_timestamp = Some(20);
    gateway.save("shopping-list", &items).await.unwrap();

    let raw = fs::read_to_string(dir.path().join("store/shopping-list.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": "1",
            "name": "Coffee",
            "completedAtTimestamp": 20,
            "lastUpdatedTimestamp": 10
        }])
    );
}

#[tokio::test]
async fn test_corrupt_file_is_distinct_from_absent() {
    let (dir, backend) = setup();
    fs::create_dir_all(dir.path().join("store")).unwrap();
    fs::write(dir.path().join("store/shopping-list.json"), "not json").unwrap();

    let gateway = PersistenceGateway::new(backend);
    let err = gateway
        .load::<Vec<ShoppingListItem>>("shopping-list")
        .await
        .unwrap_err();
    assert!(err.is_corrupt());

    let absent: Option<Vec<ShoppingListItem>> = gateway.load("other").await.unwrap();
    assert!(absent.is_none());
}

#[tokio::test]
async fn test_api_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");

    {
        let mut api = ShoppingListApi::new(FileBackend::new(&store), ShopConfig::default());
        assert_eq!(api.hydrate().await.unwrap(), Hydration::FirstRun);
        api.add("Bread").await.unwrap();
    }

    let mut api = ShoppingListApi::new(FileBackend::new(&store), ShopConfig::default());
    assert_eq!(api.hydrate().await.unwrap(), Hydration::Restored(4));
    assert_eq!(api.ordered_items()[0].name, "Bread");
}

#[tokio::test]
async fn test_api_recovers_from_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("shopping-list.json"), "{\"half\":").unwrap();

    let mut api = ShoppingListApi::new(FileBackend::new(&store), ShopConfig::default());
    let hydration = api.hydrate().await.unwrap();

    assert!(matches!(hydration, Hydration::Recovered { .. }));
    assert_eq!(
        fs::read_to_string(store.join("shopping-list.corrupt.json")).unwrap(),
        "{\"half\":"
    );
    assert!(!store.join("shopping-list.json").exists());
}

#[tokio::test]
async fn test_second_corruption_keeps_first_backup() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    fs::create_dir_all(&store).unwrap();

    for raw in ["first bad", "second bad"] {
        fs::write(store.join("shopping-list.json"), raw).unwrap();
        let mut api = ShoppingListApi::new(FileBackend::new(&store), ShopConfig::default());
        api.hydrate().await.unwrap();
    }

    assert_eq!(
        fs::read_to_string(store.join("shopping-list.corrupt.json")).unwrap(),
        "first bad"
    );
    assert_eq!(
        fs::read_to_string(store.join("shopping-list.corrupt-1.json")).unwrap(),
        "second bad"
    );
}
