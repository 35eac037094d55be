use stockroom::client::export::Locale;
use stockroom::client::form::ProductForm;
use stockroom::client::notifications::NoticeLevel;
use stockroom::client::{ClientError, Inventory, InventoryApi};
use stockroom::create_app;
use stockroom::db::Database;
use tokio::net::TcpListener;

async fn spawn_service() -> String {
    let (app, _) = create_app(Database::in_memory());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{address}")
}

async fn inventory() -> Inventory {
    let base_url = spawn_service().await;
    let api = InventoryApi::new(&base_url).expect("Failed to build api");
    let mut inventory = Inventory::new(api);
    inventory.load().await.expect("Failed to load lists");
    inventory
}

fn form(name: &str, quantity: i32, min_stock: i32) -> ProductForm {
    ProductForm {
        id: None,
        name: name.to_string(),
        quantity: Some(quantity),
        category: "Ferramentas".to_string(),
        unit: "Caixa".to_string(),
        min_stock: Some(min_stock),
    }
}

#[tokio::test]
async fn created_product_is_merged_with_server_id() {
    let mut inventory = inventory().await;
    assert!(inventory.products.is_empty());

    inventory.form = form("Parafuso", 5, 10);
    let created = inventory.save_product().await.expect("Failed to save");

    assert_eq!(inventory.products.len(), 1);
    assert_eq!(inventory.products.keys(), vec![created.id]);
    assert_eq!(inventory.form, ProductForm::default());
    assert_eq!(
        inventory.notifications.last().map(|n| n.level),
        Some(NoticeLevel::Success)
    );

    inventory
        .remove_product(created.id)
        .await
        .expect("Failed to delete");
    assert!(inventory.products.is_empty());
}

#[tokio::test]
async fn updated_product_moves_to_the_top() {
    let mut inventory = inventory().await;
    inventory.form = form("Parafuso", 5, 10);
    let screw = inventory.save_product().await.expect("Failed to save");
    inventory.form = form("Prego", 40, 10);
    let nail = inventory.save_product().await.expect("Failed to save");
    assert_eq!(inventory.products.keys(), vec![nail.id, screw.id]);

    assert!(inventory.edit_product(screw.id));
    inventory.form.quantity = Some(25);
    let updated = inventory.save_product().await.expect("Failed to update");

    assert_eq!(updated.id, screw.id);
    assert_eq!(inventory.products.keys(), vec![screw.id, nail.id]);
    assert_eq!(
        inventory.products.get(screw.id).and_then(|p| p.quantity),
        Some(25)
    );
    assert!(inventory.low_stock().is_empty());
}

#[tokio::test]
async fn duplicate_category_leaves_list_unchanged() {
    let mut inventory = inventory().await;
    inventory
        .add_category("Ferramentas")
        .await
        .expect("Failed to create category");
    assert_eq!(inventory.categories.len(), 1);

    let result = inventory.add_category("  Ferramentas ").await;
    assert!(matches!(result, Err(ClientError::DuplicateCategory(_))));
    assert_eq!(inventory.categories.len(), 1);
    assert_eq!(
        inventory.notifications.last().map(|n| n.message.as_str()),
        Some("Categoria já existe")
    );
}

#[tokio::test]
async fn blank_category_is_not_sent() {
    let mut inventory = inventory().await;
    let result = inventory.add_category("   ").await;
    assert!(matches!(result, Err(ClientError::EmptyCategoryName)));
    assert!(inventory.categories.is_empty());
}

#[tokio::test]
async fn invalid_form_is_kept() {
    let mut inventory = inventory().await;
    let mut incomplete = form("Parafuso", 5, 10);
    incomplete.quantity = None;
    inventory.form = incomplete.clone();

    let result = inventory.save_product().await;
    assert!(matches!(result, Err(ClientError::InvalidForm(_))));
    assert_eq!(inventory.form, incomplete);
    assert!(inventory.products.is_empty());

    inventory.load().await.expect("Failed to reload");
    assert!(inventory.products.is_empty());
}

#[tokio::test]
async fn replacing_a_deleted_product_keeps_the_list() {
    let base_url = spawn_service().await;
    let mut first = Inventory::new(InventoryApi::new(&base_url).expect("Failed to build api"));
    let mut second = Inventory::new(InventoryApi::new(&base_url).expect("Failed to build api"));

    first.form = form("Parafuso", 5, 10);
    let screw = first.save_product().await.expect("Failed to save");
    second.load().await.expect("Failed to load");
    second
        .remove_product(screw.id)
        .await
        .expect("Failed to delete");

    assert!(first.edit_product(screw.id));
    first.form.quantity = Some(99);
    let result = first.save_product().await;
    assert!(matches!(result, Err(ClientError::ProductNotFound(id)) if id == screw.id));
    assert_eq!(first.products.keys(), vec![screw.id]);
    assert_eq!(first.form.quantity, Some(99));
    assert_eq!(
        first.notifications.last().map(|n| n.level),
        Some(NoticeLevel::Error)
    );
}

#[tokio::test]
async fn derived_views_read_local_state() {
    let mut inventory = inventory().await;
    inventory.form = form("Parafuso", 5, 10);
    inventory.save_product().await.expect("Failed to save");
    inventory.form = form("Martelo", 20, 3);
    inventory.form.category = "Obras".to_string();
    inventory.save_product().await.expect("Failed to save");

    let summary = inventory.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.low_stock, 1);
    assert_eq!(inventory.category_distribution().len(), 2);
    assert_eq!(inventory.search("martelo").len(), 1);
    assert_eq!(inventory.stock_chart().len(), 2);

    let csv = inventory.export_csv(Locale::PtBr).expect("Failed to export csv");
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Parafuso"));

    let pdf = inventory.export_pdf(Locale::EnUs).expect("Failed to export pdf");
    assert!(pdf.starts_with(b"%PDF"));
}
