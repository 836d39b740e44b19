//! PostgreSQL implementation of Persistence.
//!
//! Each `begin` opens a real database transaction; an uncommitted
//! transaction is rolled back by sqlx when dropped.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::config::DatabaseConfig;
use crate::domain::address::{Address, PostalAddress};
use crate::domain::foundation::{
    AddressId, DomainError, ErrorCode, ProductId, Timestamp, UserId, VendorId,
};
use crate::domain::product::{Product, ProductStatus};
use crate::domain::vendor::Vendor;
use crate::ports::{Persistence, StoreTransaction};

/// PostgreSQL implementation of Persistence.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the configured pool settings, applying migrations when
    /// `run_migrations` is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = config
            .pool_options()
            .connect(&config.url)
            .await
            .map_err(db_error("connect to database"))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
            tracing::info!("database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Persistence for PostgresPersistence {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;
        Ok(Box::new(PostgresTransaction { tx }))
    }
}

struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

const VENDOR_COLUMNS: &str = "id, user_id, business_name, is_active, accept_orders, rating, \
     total_reviews, created_at, updated_at, updated_by";

const PRODUCT_COLUMNS: &str = "id, vendor_id, name, sku, status, is_active, view_count, \
     created_at, updated_at, updated_by";

const ADDRESS_COLUMNS: &str = "id, user_id, label, street, city, state, zip_code, country, \
     is_default, created_at, updated_at";

#[async_trait]
impl StoreTransaction for PostgresTransaction {
    async fn find_vendor_by_user(&mut self, user_id: &UserId) -> Result<Option<Vendor>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM vendors WHERE user_id = $1",
            VENDOR_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("fetch vendor"))?;

        row.map(|r| row_to_vendor(&r)).transpose()
    }

    async fn update_vendor(&mut self, vendor: &Vendor) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE vendors SET
                is_active = $2,
                accept_orders = $3,
                updated_at = $4,
                updated_by = $5
            WHERE id = $1
            "#,
        )
        .bind(vendor.id().as_uuid())
        .bind(vendor.is_active())
        .bind(vendor.accept_orders())
        .bind(vendor.updated_at().as_datetime())
        .bind(vendor.updated_by())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update vendor"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::VendorNotFound,
                format!("Vendor not found: {}", vendor.id()),
            ));
        }
        Ok(())
    }

    async fn find_product(&mut self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("fetch product"))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    async fn find_vendor_product(
        &mut self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = $1 AND vendor_id = $2 FOR UPDATE",
            PRODUCT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(vendor_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("fetch vendor product"))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                status = $2,
                is_active = $3,
                updated_at = $4,
                updated_by = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.status().as_str())
        .bind(product.is_active())
        .bind(product.updated_at().as_datetime())
        .bind(product.updated_by())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update product"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", product.id()),
            ));
        }
        Ok(())
    }

    async fn increment_product_views(&mut self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE products SET view_count = view_count + 1 WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(db_error("increment product views"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_user_addresses(&mut self, user_id: &UserId) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM addresses WHERE user_id = $1 ORDER BY is_default DESC, created_at ASC",
            ADDRESS_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("list addresses"))?;

        rows.iter().map(row_to_address).collect()
    }

    async fn find_user_address(
        &mut self,
        id: &AddressId,
        user_id: &UserId,
    ) -> Result<Option<Address>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM addresses WHERE id = $1 AND user_id = $2 FOR UPDATE",
            ADDRESS_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("fetch address"))?;

        row.map(|r| row_to_address(&r)).transpose()
    }

    async fn update_address(&mut self, address: &Address) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE addresses SET
                label = $2,
                street = $3,
                city = $4,
                state = $5,
                zip_code = $6,
                country = $7,
                is_default = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(address.id().as_uuid())
        .bind(address.label())
        .bind(&address.postal().street)
        .bind(&address.postal().city)
        .bind(&address.postal().state)
        .bind(&address.postal().zip_code)
        .bind(&address.postal().country)
        .bind(address.is_default())
        .bind(address.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update address"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AddressNotFound,
                format!("Address not found: {}", address.id()),
            ));
        }
        Ok(())
    }

    async fn remove_address(&mut self, id: &AddressId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(db_error("delete address"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AddressNotFound,
                format!("Address not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(db_error("commit transaction"))
    }
}

fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

fn row_to_vendor(row: &PgRow) -> Result<Vendor, DomainError> {
    let total_reviews: i32 = column(row, "total_reviews")?;
    Ok(Vendor::reconstitute(
        VendorId::from_uuid(column(row, "id")?),
        UserId::from_uuid(column(row, "user_id")?),
        column(row, "business_name")?,
        column(row, "is_active")?,
        column(row, "accept_orders")?,
        column(row, "rating")?,
        u32::try_from(total_reviews).unwrap_or(0),
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
        column(row, "updated_by")?,
    ))
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let status: String = column(row, "status")?;
    let status: ProductStatus = status.parse()?;
    let view_count: i64 = column(row, "view_count")?;
    Ok(Product::reconstitute(
        ProductId::from_uuid(column(row, "id")?),
        VendorId::from_uuid(column(row, "vendor_id")?),
        column(row, "name")?,
        column(row, "sku")?,
        status,
        column(row, "is_active")?,
        u64::try_from(view_count).unwrap_or(0),
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
        column(row, "updated_by")?,
    ))
}

fn row_to_address(row: &PgRow) -> Result<Address, DomainError> {
    let postal = PostalAddress {
        street: column(row, "street")?,
        city: column(row, "city")?,
        state: column(row, "state")?,
        zip_code: column(row, "zip_code")?,
        country: column(row, "country")?,
    };
    Ok(Address::reconstitute(
        AddressId::from_uuid(column(row, "id")?),
        UserId::from_uuid(column(row, "user_id")?),
        column(row, "label")?,
        postal,
        column(row, "is_default")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
