//! Database service for invoice-service.

use crate::models::{
    CreateCustomer, CreateProduct, Customer, Invoice, InvoiceRecord, LineItem,
    ListInvoicesFilter, Product, SaveInvoice, UpdateCustomer, UpdateProduct,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::InvoiceStore;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const INVOICE_COLUMNS: &str = "id, user_id, company, company_address, client, client_address, invoice_number, due_date, \
     notes, terms, logo, logo_zoom, status, customer_id, template_id, currency, \
     show_shipping, show_discount, show_tax_column, show_signature, show_payment_details, \
     shipping, taxes, discount_percent, subtotal, tax_total, total, created_at, updated_at";

const LINE_ITEM_COLUMNS: &str =
    "id, invoice_id, description, quantity, unit_price, tax_rate, position, product_id, created_at, updated_at";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "invoice-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Invoice queries (the store seam itself is implemented further down)
    // -------------------------------------------------------------------------

    /// List invoices for a user with optional status/customer filters and
    /// keyset pagination.
    #[instrument(skip(self, filter), fields(user_id = %user_id))]
    pub async fn list_invoices(
        &self,
        user_id: Uuid,
        filter: &ListInvoicesFilter,
    ) -> Result<Vec<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let limit = filter.page_size.clamp(1, 100) as i64;
        let status_str = filter.status.map(|s| s.as_str().to_string());

        let query = format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE user_id = $1
              AND ($2::varchar IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR customer_id = $3)
              AND ($4::uuid IS NULL OR id > $4)
            ORDER BY id
            LIMIT $5
            "#
        );

        let invoices = sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .bind(&status_str)
            .bind(filter.customer_id)
            .bind(filter.page_token)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices: {}", e)))?;

        timer.observe_duration();

        Ok(invoices)
    }

    /// All invoice headers for a user, oldest first. Used by exports.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_invoices_for_export(&self, user_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices_for_export"])
            .start_timer();

        let query = format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE user_id = $1
            ORDER BY created_at, id
            "#
        );

        let invoices = sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices for export: {}", e))
            })?;

        timer.observe_duration();

        Ok(invoices)
    }

    // -------------------------------------------------------------------------
    // Customer operations
    // -------------------------------------------------------------------------

    /// Create a new customer.
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn create_customer(
        &self,
        user_id: Uuid,
        input: &CreateCustomer,
    ) -> Result<Customer, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_customer"])
            .start_timer();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, user_id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create customer: {}", e)))?;

        timer.observe_duration();

        info!(customer_id = %customer.id, "Customer created");

        Ok(customer)
    }

    /// Get a customer by ID.
    #[instrument(skip(self), fields(user_id = %user_id, customer_id = %customer_id))]
    pub async fn get_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_customer"])
            .start_timer();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, user_id, name, email, phone, address, created_at, updated_at
            FROM customers
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get customer: {}", e)))?;

        timer.observe_duration();

        Ok(customer)
    }

    /// List customers for a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_customers(
        &self,
        user_id: Uuid,
        page_size: i32,
        page_token: Option<Uuid>,
    ) -> Result<Vec<Customer>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_customers"])
            .start_timer();

        let limit = page_size.clamp(1, 100) as i64;

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, user_id, name, email, phone, address, created_at, updated_at
            FROM customers
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR id > $2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(page_token)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list customers: {}", e)))?;

        timer.observe_duration();

        Ok(customers)
    }

    /// All customers for a user, alphabetical. Used by exports.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_customers_for_export(&self, user_id: Uuid) -> Result<Vec<Customer>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_customers_for_export"])
            .start_timer();

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, user_id, name, email, phone, address, created_at, updated_at
            FROM customers
            WHERE user_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list customers for export: {}", e))
        })?;

        timer.observe_duration();

        Ok(customers)
    }

    /// Update a customer.
    #[instrument(skip(self, input), fields(user_id = %user_id, customer_id = %customer_id))]
    pub async fn update_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_customer"])
            .start_timer();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update customer: {}", e)))?;

        timer.observe_duration();

        Ok(customer)
    }

    /// Delete a customer.
    #[instrument(skip(self), fields(user_id = %user_id, customer_id = %customer_id))]
    pub async fn delete_customer(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_customer"])
            .start_timer();

        let result = sqlx::query("DELETE FROM customers WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete customer: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Product operations
    // -------------------------------------------------------------------------

    /// Create a new product.
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn create_product(
        &self,
        user_id: Uuid,
        input: &CreateProduct,
    ) -> Result<Product, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_product"])
            .start_timer();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, user_id, name, description, price, tax_rate, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, description, price, tax_rate, category, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.tax_rate)
        .bind(&input.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create product: {}", e)))?;

        timer.observe_duration();

        info!(product_id = %product.id, "Product created");

        Ok(product)
    }

    /// Get a product by ID.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn get_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_product"])
            .start_timer();

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, tax_rate, category, created_at, updated_at
            FROM products
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get product: {}", e)))?;

        timer.observe_duration();

        Ok(product)
    }

    /// List products for a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_products(
        &self,
        user_id: Uuid,
        page_size: i32,
        page_token: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_products"])
            .start_timer();

        let limit = page_size.clamp(1, 100) as i64;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, tax_rate, category, created_at, updated_at
            FROM products
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR id > $2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(page_token)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list products: {}", e)))?;

        timer.observe_duration();

        Ok(products)
    }

    /// All products for a user, alphabetical. Used by exports.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_products_for_export(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_products_for_export"])
            .start_timer();

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, tax_rate, category, created_at, updated_at
            FROM products
            WHERE user_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list products for export: {}", e))
        })?;

        timer.observe_duration();

        Ok(products)
    }

    /// Update a product.
    #[instrument(skip(self, input), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn update_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_product"])
            .start_timer();

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                tax_rate = COALESCE($6, tax_rate),
                category = COALESCE($7, category),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, name, description, price, tax_rate, category, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.tax_rate)
        .bind(&input.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update product: {}", e)))?;

        timer.observe_duration();

        Ok(product)
    }

    /// Delete a product.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_product"])
            .start_timer();

        let result = sqlx::query("DELETE FROM products WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete product: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InvoiceStore for Database {
    /// Header upsert plus full line-item replacement in one transaction.
    /// Items are only touched after the header write succeeds, and a
    /// failed item write rolls the header back with it.
    #[instrument(skip(self, input), fields(user_id = %user_id, invoice_id = ?input.id))]
    async fn save_invoice(&self, user_id: Uuid, input: &SaveInvoice) -> Result<Uuid, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["save_invoice"])
            .start_timer();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to begin save: {}", e)))?;

        let invoice_id = match input.id {
            None => {
                let id = Uuid::new_v4();
                sqlx::query(
                    r#"
                    INSERT INTO invoices (
                        id, user_id, company, company_address, client, client_address, invoice_number, due_date,
                        notes, terms, logo, logo_zoom, status, customer_id, template_id, currency,
                        show_shipping, show_discount, show_tax_column, show_signature, show_payment_details,
                        shipping, taxes, discount_percent, subtotal, tax_total, total
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                            $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
                    "#,
                )
                .bind(id)
                .bind(user_id)
                .bind(&input.company)
                .bind(&input.company_address)
                .bind(&input.client)
                .bind(&input.client_address)
                .bind(&input.invoice_number)
                .bind(input.due_date)
                .bind(&input.notes)
                .bind(&input.terms)
                .bind(&input.logo)
                .bind(input.logo_zoom)
                .bind(input.status.as_str())
                .bind(input.customer_id)
                .bind(&input.template_id)
                .bind(Json(input.currency.clone()))
                .bind(input.show_shipping)
                .bind(input.show_discount)
                .bind(input.show_tax_column)
                .bind(input.show_signature)
                .bind(input.show_payment_details)
                .bind(Json(input.shipping.clone()))
                .bind(Json(input.taxes.clone()))
                .bind(input.discount_percent)
                .bind(input.totals.subtotal)
                .bind(input.totals.tax_total)
                .bind(input.totals.total)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to insert invoice: {}", e))
                })?;
                id
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE invoices
                    SET company = $3,
                        company_address = $4,
                        client = $5,
                        client_address = $6,
                        invoice_number = $7,
                        due_date = $8,
                        notes = $9,
                        terms = $10,
                        logo = $11,
                        logo_zoom = $12,
                        status = $13,
                        customer_id = $14,
                        template_id = $15,
                        currency = $16,
                        show_shipping = $17,
                        show_discount = $18,
                        show_tax_column = $19,
                        show_signature = $20,
                        show_payment_details = $21,
                        shipping = $22,
                        taxes = $23,
                        discount_percent = $24,
                        subtotal = $25,
                        tax_total = $26,
                        total = $27,
                        updated_at = NOW()
                    WHERE id = $1 AND user_id = $2
                    "#,
                )
                .bind(id)
                .bind(user_id)
                .bind(&input.company)
                .bind(&input.company_address)
                .bind(&input.client)
                .bind(&input.client_address)
                .bind(&input.invoice_number)
                .bind(input.due_date)
                .bind(&input.notes)
                .bind(&input.terms)
                .bind(&input.logo)
                .bind(input.logo_zoom)
                .bind(input.status.as_str())
                .bind(input.customer_id)
                .bind(&input.template_id)
                .bind(Json(input.currency.clone()))
                .bind(input.show_shipping)
                .bind(input.show_discount)
                .bind(input.show_tax_column)
                .bind(input.show_signature)
                .bind(input.show_payment_details)
                .bind(Json(input.shipping.clone()))
                .bind(Json(input.taxes.clone()))
                .bind(input.discount_percent)
                .bind(input.totals.subtotal)
                .bind(input.totals.tax_total)
                .bind(input.totals.total)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to update invoice: {}", e))
                })?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(anyhow::anyhow!(
                        "Invoice {} not found for this user",
                        id
                    )));
                }

                sqlx::query("DELETE FROM line_items WHERE invoice_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(anyhow::anyhow!(
                            "Failed to clear line items: {}",
                            e
                        ))
                    })?;
                id
            }
        };

        for (position, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO line_items (id, invoice_id, description, quantity, unit_price, tax_rate, position, product_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(invoice_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.tax_rate)
            .bind(position as i32)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert line item: {}", e))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to commit save: {}", e)))?;

        timer.observe_duration();

        info!(invoice_id = %invoice_id, items = input.items.len(), "Invoice saved");

        Ok(invoice_id)
    }

    #[instrument(skip(self), fields(user_id = %user_id, invoice_id = %invoice_id))]
    async fn fetch_invoice(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<InvoiceRecord, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["fetch_invoice"])
            .start_timer();

        let query = format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE user_id = $1 AND id = $2
            "#
        );

        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .bind(invoice_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch invoice: {}", e)))?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

        let items_query = format!(
            r#"
            SELECT {LINE_ITEM_COLUMNS}
            FROM line_items
            WHERE invoice_id = $1
            ORDER BY position, created_at
            "#
        );

        let items = sqlx::query_as::<_, LineItem>(&items_query)
            .bind(invoice_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to fetch line items: {}", e))
            })?;

        timer.observe_duration();

        Ok(InvoiceRecord { invoice, items })
    }

    #[instrument(skip(self), fields(user_id = %user_id, invoice_id = %invoice_id))]
    async fn delete_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_invoice"])
            .start_timer();

        let result = sqlx::query("DELETE FROM invoices WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(invoice_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete invoice: {}", e)))?;

        timer.observe_duration();

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(invoice_id = %invoice_id, "Invoice deleted");
        }

        Ok(deleted)
    }
}
