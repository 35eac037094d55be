use crate::db::relational::entities::{category, product};
use sea_orm::{ConnectionTrait, DbErr, Schema};
use tracing::info;

/// Creates `products` and `categories` unless they already exist.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statements = [
        schema.create_table_from_entity(product::Entity),
        schema.create_table_from_entity(category::Entity),
    ];
    for statement in statements.iter_mut() {
        statement.if_not_exists();
        db.execute(backend.build(&*statement)).await?;
    }
    info!("tables are in place");
    Ok(())
}
