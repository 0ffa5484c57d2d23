//! Product creation service
//!
//! A product is created together with its first inventory row and an
//! `initial_stock` audit transaction, all in one database transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{CreatedProduct, NewProduct};

/// Name of the unique constraint guarding product SKUs
const SKU_CONSTRAINT: &str = "uq_products_sku";

/// `inventory_transactions.transaction_type` of the first stock movement
const INITIAL_STOCK: &str = "initial_stock";

/// Product service for catalog writes
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Row returned by the product insert
#[derive(Debug, FromRow)]
struct InsertedProductRow {
    id: i64,
    name: String,
    sku: String,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product with its initial stock at one warehouse
    pub async fn create_product(&self, input: NewProduct) -> AppResult<CreatedProduct> {
        // Cheap duplicate check; the unique constraint stays authoritative
        if let Some(existing_id) = self.find_product_id_by_sku(&input.sku).await? {
            return Err(duplicate_sku(&input.sku, Some(existing_id)));
        }

        self.ensure_exists(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
            input.warehouse_id,
            "Warehouse",
        )
        .await?;

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_exists(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
                supplier_id,
                "Supplier",
            )
            .await?;
        }

        if let Some(product_type_id) = input.product_type_id {
            self.ensure_exists(
                "SELECT EXISTS(SELECT 1 FROM product_types WHERE id = $1)",
                product_type_id,
                "Product type",
            )
            .await?;
        }

        self.insert_or_conflict(&input).await
    }

    /// Run the creation transaction, mapping a unique violation raised by any
    /// statement or the commit to the same conflict as the pre-check
    async fn insert_or_conflict(&self, input: &NewProduct) -> AppResult<CreatedProduct> {
        match self.insert_with_initial_stock(input).await {
            Ok(created) => {
                tracing::info!(
                    "Created product {} (sku {}) with {} units at warehouse {}",
                    created.id,
                    created.sku,
                    created.initial_quantity,
                    created.warehouse_id
                );
                Ok(created)
            }
            Err(err) if is_sku_violation(&err) => {
                // Lost a race with a concurrent insert of the same SKU
                tracing::warn!("SKU {} claimed concurrently: {}", input.sku, err);
                let existing_id = self.find_product_id_by_sku(&input.sku).await?;
                Err(duplicate_sku(&input.sku, existing_id))
            }
            Err(err) if is_integrity_violation(&err) => Err(AppError::Internal(format!(
                "Database integrity error while creating product {}: {}",
                input.sku, err
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Insert product, inventory and audit rows; any error drops the
    /// transaction, which rolls all three back.
    async fn insert_with_initial_stock(
        &self,
        input: &NewProduct,
    ) -> Result<CreatedProduct, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, InsertedProductRow>(
            r#"
            INSERT INTO products (sku, name, description, price, product_type_id, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, sku, price, created_at
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.product_type_id)
        .bind(input.supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO inventory (product_id, warehouse_id, quantity)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(product.id)
        .bind(input.warehouse_id)
        .bind(input.initial_quantity)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO inventory_transactions (
                product_id, warehouse_id, transaction_type,
                quantity_change, quantity_before, quantity_after, notes
            )
            VALUES ($1, $2, $3, $4, 0, $4, $5)
            "#,
        )
        .bind(product.id)
        .bind(input.warehouse_id)
        .bind(INITIAL_STOCK)
        .bind(input.initial_quantity)
        .bind(format!("Initial stock for new product {}", input.sku))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CreatedProduct {
            id: product.id,
            name: product.name,
            sku: product.sku,
            price: product.price,
            warehouse_id: input.warehouse_id,
            initial_quantity: input.initial_quantity,
            created_at: product.created_at,
        })
    }

    async fn find_product_id_by_sku(&self, sku: &str) -> AppResult<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM products WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.db)
            .await?;
        Ok(id)
    }

    async fn ensure_exists(&self, sql: &'static str, id: i64, resource: &str) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        if !exists {
            return Err(AppError::NotFound(format!("{} with ID {}", resource, id)));
        }
        Ok(())
    }
}

fn duplicate_sku(sku: &str, existing_id: Option<i64>) -> AppError {
    AppError::Conflict {
        resource: "sku".to_string(),
        message: format!("Product with SKU '{}' already exists", sku),
        existing_id,
    }
}

/// Unique violation on the SKU constraint, or one the driver could not attribute
fn is_sku_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().map_or(false, |db_err| {
        db_err.is_unique_violation()
            && db_err
                .constraint()
                .map_or(true, |constraint| constraint == SKU_CONSTRAINT)
    })
}

fn is_integrity_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().map_or(false, |db_err| {
        db_err.is_unique_violation() || db_err.is_foreign_key_violation() || db_err.is_check_violation()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_warehouse(pool: &PgPool) -> i64 {
        let company_id: i64 =
            sqlx::query_scalar("INSERT INTO companies (name) VALUES ('Acme') RETURNING id")
                .fetch_one(pool)
                .await
                .unwrap();
        sqlx::query_scalar("INSERT INTO warehouses (company_id, name) VALUES ($1, 'Main') RETURNING id")
            .bind(company_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn new_product(sku: &str, warehouse_id: i64, initial_quantity: i32) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            sku: sku.to_string(),
            price: Decimal::new(1999, 2),
            warehouse_id,
            initial_quantity,
            description: None,
            supplier_id: None,
            product_type_id: None,
        }
    }

    async fn count(pool: &PgPool, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_product_writes_all_rows(pool: PgPool) {
        let warehouse_id = seed_warehouse(&pool).await;
        let service = ProductService::new(pool.clone());

        let created = service
            .create_product(new_product("WID-1", warehouse_id, 40))
            .await
            .unwrap();

        assert_eq!(created.initial_quantity, 40);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM inventory").await, 1);
        let (kind, before, after): (String, i32, i32) = sqlx::query_as(
            "SELECT transaction_type, quantity_before, quantity_after FROM inventory_transactions",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!((kind.as_str(), before, after), ("initial_stock", 0, 40));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_sku_conflicts_with_existing_id(pool: PgPool) {
        let warehouse_id = seed_warehouse(&pool).await;
        let service = ProductService::new(pool.clone());

        let first = service
            .create_product(new_product("DUP-1", warehouse_id, 1))
            .await
            .unwrap();
        let second = service
            .create_product(new_product("DUP-1", warehouse_id, 1))
            .await;

        match second {
            Err(AppError::Conflict { existing_id, .. }) => assert_eq!(existing_id, Some(first.id)),
            other => panic!("expected conflict, got {:?}", other.map(|p| p.id)),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_failed_inventory_insert_rolls_back_product(pool: PgPool) {
        let warehouse_id = seed_warehouse(&pool).await;
        let service = ProductService::new(pool.clone());

        // Bypasses request validation so the inventory CHECK constraint fires
        let result = service
            .create_product(new_product("BAD-1", warehouse_id, -5))
            .await;

        assert!(result.is_err());
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM products").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM inventory_transactions").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_warehouse_is_not_found(pool: PgPool) {
        let service = ProductService::new(pool);
        let result = service.create_product(new_product("NOPE-1", 999, 1)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    async fn seed_product(pool: &PgPool, sku: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO products (sku, name, price) VALUES ($1, 'Existing', 1) RETURNING id")
            .bind(sku)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_sku_claimed_after_precheck_is_unique_violation(pool: PgPool) {
        let warehouse_id = seed_warehouse(&pool).await;
        seed_product(&pool, "RACE-1").await;
        let service = ProductService::new(pool.clone());

        let err = service
            .insert_with_initial_stock(&new_product("RACE-1", warehouse_id, 5))
            .await
            .unwrap_err();

        assert!(is_sku_violation(&err));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM inventory").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_sku_claimed_after_precheck_conflicts_with_existing_id(pool: PgPool) {
        let warehouse_id = seed_warehouse(&pool).await;
        let existing = seed_product(&pool, "RACE-2").await;
        let service = ProductService::new(pool.clone());

        let result = service
            .insert_or_conflict(&new_product("RACE-2", warehouse_id, 5))
            .await;

        match result {
            Err(AppError::Conflict { existing_id, .. }) => assert_eq!(existing_id, Some(existing)),
            other => panic!("expected conflict, got {:?}", other.map(|p| p.id)),
        }
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM products").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM inventory_transactions").await, 0);
    }
}
