use db::{
    is_foreign_key_violation, is_unique_violation,
    models::customer::{Customer, CustomerWithBookingCount, UpdateCustomer},
};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Customer not found")]
    NotFound,
    #[error("Another customer already uses {0}")]
    DuplicateEmail(String),
    #[error("Customer has bookings and cannot be deleted")]
    HasBookings,
}

pub struct CustomerService;

impl CustomerService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<CustomerWithBookingCount>, CustomerError> {
        Ok(Customer::find_all_with_booking_count(pool).await?)
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Customer, CustomerError> {
        Customer::find_by_id(pool, id)
            .await?
            .ok_or(CustomerError::NotFound)
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateCustomer,
    ) -> Result<Customer, CustomerError> {
        data.validate()?;
        let data = UpdateCustomer {
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            phone: data.phone.trim().to_string(),
        };

        let customer = Customer::update(pool, id, &data)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CustomerError::DuplicateEmail(data.email.clone())
                } else {
                    CustomerError::Database(e)
                }
            })?
            .ok_or(CustomerError::NotFound)?;

        info!(customer_id = %id, "Customer updated");
        Ok(customer)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), CustomerError> {
        let deleted = Customer::delete(pool, id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                CustomerError::HasBookings
            } else {
                CustomerError::Database(e)
            }
        })?;
        if deleted == 0 {
            return Err(CustomerError::NotFound);
        }
        info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use db::DBService;

    use super::*;

    fn edit(email: &str) -> UpdateCustomer {
        UpdateCustomer {
            name: " Priya Sharma ".into(),
            email: email.into(),
            phone: "+91 98765 43211".into(),
        }
    }

    #[tokio::test]
    async fn test_update_trims_and_saves() {
        let db = DBService::new_in_memory().await.unwrap();
        let priya = Customer::upsert_by_email(&db.pool, "Priya", "priya@example.com", "9876543211")
            .await
            .unwrap();

        let updated = CustomerService::update(&db.pool, priya.id, &edit("priya.sharma@example.com"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Priya Sharma");
        assert_eq!(updated.email, "priya.sharma@example.com");
        assert_eq!(CustomerService::get(&db.pool, priya.id).await.unwrap().phone, "+91 98765 43211");
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email_and_bad_input() {
        let db = DBService::new_in_memory().await.unwrap();
        Customer::upsert_by_email(&db.pool, "Amit", "amit@example.com", "9876543212")
            .await
            .unwrap();
        let priya = Customer::upsert_by_email(&db.pool, "Priya", "priya@example.com", "9876543211")
            .await
            .unwrap();

        assert!(matches!(
            CustomerService::update(&db.pool, priya.id, &edit("amit@example.com")).await.unwrap_err(),
            CustomerError::DuplicateEmail(email) if email == "amit@example.com"
        ));
        assert!(matches!(
            CustomerService::update(&db.pool, priya.id, &edit("nope")).await.unwrap_err(),
            CustomerError::Validation(_)
        ));
        assert!(matches!(
            CustomerService::update(&db.pool, Uuid::new_v4(), &edit("new@example.com")).await.unwrap_err(),
            CustomerError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_delete_customer_without_bookings() {
        let db = DBService::new_in_memory().await.unwrap();
        let arjun = Customer::upsert_by_email(&db.pool, "Arjun", "arjun@example.com", "9876543216")
            .await
            .unwrap();

        CustomerService::delete(&db.pool, arjun.id).await.unwrap();
        assert!(CustomerService::list(&db.pool).await.unwrap().is_empty());
        assert!(matches!(
            CustomerService::delete(&db.pool, arjun.id).await.unwrap_err(),
            CustomerError::NotFound
        ));
    }
}
