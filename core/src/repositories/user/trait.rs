//! User repository trait defining the interface for user data persistence.
//!
//! The session core only creates users and reads their credentials; the
//! remaining operations are the narrow surface the profile handlers use.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserCredentials};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(())` - User stored
    /// * `Err(DomainError::Storage)` - Creation failed. A duplicate username
    ///   or email is reported the same way as any other storage failure.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Fetch the id and password hash of the user with this email
    ///
    /// # Returns
    /// * `Ok(Some(UserCredentials))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use notes_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_credentials_by_email("a@x.com").await? {
    ///     Some(credentials) => println!("User found: {}", credentials.user_id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;

    /// Update username, email, password hash and image of an existing user
    ///
    /// # Returns
    /// * `Ok(true)` - User updated
    /// * `Ok(false)` - No user with that ID
    /// * `Err(DomainError)` - Update failed
    async fn update(&self, user: &User) -> Result<bool, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
