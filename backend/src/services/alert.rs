//! Low-stock alert service
//!
//! Loads a company's inventory and recent sales, then hands them to the
//! shared alert calculators for threshold, velocity and stockout projection.

use chrono::{DateTime, Utc};
use shared::alerts::{
    assemble_low_stock_alerts, AlertOptions, InventoryCandidate, SalesTotals, StockKey,
};
use shared::SalesWindow;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{LowStockAlertsResponse, SupplierInfo};

/// Alert service computing low-stock alerts per company
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Inventory row joined with product, warehouse, product type and supplier
#[derive(Debug, FromRow)]
struct CandidateRow {
    inventory_id: i64,
    product_id: i64,
    product_name: String,
    sku: String,
    warehouse_id: i64,
    warehouse_name: String,
    quantity: i32,
    low_stock_threshold: Option<i32>,
    default_low_stock_threshold: Option<i32>,
    supplier_id: Option<i64>,
    supplier_name: Option<String>,
    supplier_email: Option<String>,
}

impl From<CandidateRow> for InventoryCandidate {
    fn from(row: CandidateRow) -> Self {
        let supplier = match (row.supplier_id, row.supplier_name) {
            (Some(id), Some(name)) => Some(SupplierInfo {
                id,
                name,
                contact_email: row.supplier_email,
            }),
            _ => None,
        };

        InventoryCandidate {
            inventory_id: row.inventory_id,
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            warehouse_id: row.warehouse_id,
            warehouse_name: row.warehouse_name,
            quantity: row.quantity,
            low_stock_threshold: row.low_stock_threshold,
            type_default_threshold: row.default_low_stock_threshold,
            supplier,
        }
    }
}

/// Units sold per (product, warehouse) inside the window
#[derive(Debug, FromRow)]
struct SalesTotalRow {
    product_id: i64,
    warehouse_id: i64,
    total_sold: i64,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Ranked low-stock alerts across every warehouse of a company.
    ///
    /// An unknown company is reported before the window length is checked.
    pub async fn get_low_stock_alerts(
        &self,
        company_id: i64,
        days: i64,
        include_no_sales: bool,
    ) -> AppResult<LowStockAlertsResponse> {
        let company_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
                .bind(company_id)
                .fetch_one(&self.db)
                .await?;

        if !company_exists {
            return Err(AppError::NotFound(format!("Company with ID {}", company_id)));
        }

        let options = AlertOptions {
            window: SalesWindow::new(days)?,
            include_no_sales,
        };
        let sales_since = options.window.cutoff(Utc::now())?;

        let warehouse_ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM warehouses WHERE company_id = $1 ORDER BY id",
        )
        .bind(company_id)
        .fetch_all(&self.db)
        .await?;

        if warehouse_ids.is_empty() {
            tracing::debug!("Company {} has no warehouses", company_id);
            return Ok(LowStockAlertsResponse::no_warehouses());
        }

        let candidates: Vec<InventoryCandidate> = self
            .fetch_inventory(&warehouse_ids)
            .await?
            .into_iter()
            .map(InventoryCandidate::from)
            .filter(InventoryCandidate::is_low_stock)
            .collect();

        if candidates.is_empty() {
            return Ok(LowStockAlertsResponse::new(Vec::new()));
        }

        let product_ids: Vec<i64> = candidates.iter().map(|c| c.product_id).collect();
        let sales = self
            .fetch_sales_totals(&product_ids, &warehouse_ids, sales_since)
            .await?;

        let response = assemble_low_stock_alerts(candidates, &sales, options);

        tracing::info!(
            "Company {}: {} low-stock alerts over {} days (include_no_sales={})",
            company_id,
            response.total_alerts,
            options.window.days(),
            options.include_no_sales
        );

        Ok(response)
    }

    /// Every inventory row at the given warehouses, in inventory id order
    async fn fetch_inventory(&self, warehouse_ids: &[i64]) -> AppResult<Vec<CandidateRow>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT i.id AS inventory_id,
                   p.id AS product_id, p.name AS product_name, p.sku,
                   w.id AS warehouse_id, w.name AS warehouse_name,
                   i.quantity, i.low_stock_threshold,
                   pt.default_low_stock_threshold,
                   s.id AS supplier_id, s.name AS supplier_name, s.contact_email AS supplier_email
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            LEFT JOIN product_types pt ON pt.id = p.product_type_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE i.warehouse_id = ANY($1)
            ORDER BY i.id
            "#,
        )
        .bind(warehouse_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn fetch_sales_totals(
        &self,
        product_ids: &[i64],
        warehouse_ids: &[i64],
        since: DateTime<Utc>,
    ) -> AppResult<SalesTotals> {
        let rows = sqlx::query_as::<_, SalesTotalRow>(
            r#"
            SELECT product_id, warehouse_id, SUM(quantity)::BIGINT AS total_sold
            FROM sales
            WHERE sale_date >= $1
              AND product_id = ANY($2)
              AND warehouse_id = ANY($3)
            GROUP BY product_id, warehouse_id
            "#,
        )
        .bind(since)
        .bind(product_ids)
        .bind(warehouse_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (StockKey::new(row.product_id, row.warehouse_id), row.total_sold))
            .collect())
    }
}
