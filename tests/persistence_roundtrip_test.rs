use lotwise::store::{self, keys};
use lotwise::{FeeConfig, KeyValueStore, Lot, LotBook, LotField, Session, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> String {
    dir.path().join("calc.db").to_string_lossy().to_string()
}

async fn open_session(path: &str) -> (Session, SqliteStore) {
    let store = SqliteStore::open(path).await.expect("open failed");
    let session = Session::load(Arc::new(store.clone()), FeeConfig::default())
        .await
        .expect("load failed");
    (session, store)
}

#[tokio::test]
async fn test_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = db_path(&temp_dir);

    {
        let (session, store) = open_session(&path).await;
        session
            .update_lot(0, LotField::Price, "100".to_string())
            .await
            .unwrap();
        session
            .update_lot(0, LotField::Quantity, "10".to_string())
            .await
            .unwrap();
        session
            .update_lot(2, LotField::Price, "  ".to_string())
            .await
            .unwrap();
        session.add_lot().await;
        session.set_custom_profit("3.5".to_string()).await;
        session.set_desired_price(String::new()).await;
        store.pool().close().await;
    }

    let (session, _store) = open_session(&path).await;
    let state = session.snapshot().await;
    assert_eq!(
        state.lots.lots(),
        &[
            Lot::new("100", "10"),
            Lot::blank(),
            Lot::new("  ", ""),
            Lot::blank(),
        ]
    );
    assert_eq!(state.custom_profit, "3.5");
    assert_eq!(state.desired_price, "");
    // Fees come from configuration, not the store.
    assert_eq!(state.fees, FeeConfig::default());
}

#[tokio::test]
async fn test_stored_empty_lot_list_restores_default_book() {
    let temp_dir = TempDir::new().unwrap();
    let path = db_path(&temp_dir);
    let store = SqliteStore::open(&path).await.unwrap();
    store::set(&store, keys::PURCHASES, &Vec::<Lot>::new())
        .await
        .unwrap();

    let session = Session::load(Arc::new(store), FeeConfig::default())
        .await
        .unwrap();
    assert_eq!(session.snapshot().await.lots, LotBook::new());
}

#[tokio::test]
async fn test_persisted_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    let (session, store) = open_session(&db_path(&temp_dir)).await;

    session.remove_lot(2).await.unwrap();
    session
        .update_lot(1, LotField::Quantity, "4".to_string())
        .await
        .unwrap();

    let raw = store.get_raw(keys::PURCHASES).await.unwrap().unwrap();
    assert_eq!(
        raw,
        r#"[{"price":"","quantity":""},{"price":"","quantity":"4"}]"#
    );
}
