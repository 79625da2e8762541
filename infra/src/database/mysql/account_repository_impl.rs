//! MySQL implementation of the AccountRepository trait.
//!
//! Account creation and update write the `account`, `meta`, and profile
//! rows inside a single transaction. MySQL duplicate-key failures (1062)
//! are translated into the field-specific conflict errors by inspecting
//! the violated unique key name.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mc_core::domain::entities::account::{Account, AccountMeta, AccountStatus, Role};
use mc_core::domain::entities::address::{Address, AddressOwner};
use mc_core::domain::entities::profile::{
    AdminProfile, BusinessProfile, Profile, UserProfile,
};
use mc_core::domain::value_objects::views::PartialAccount;
use mc_core::errors::{AccountError, DomainError};
use mc_core::repositories::AccountRepository;
use mc_shared::types::pagination::Pagination;

use crate::database::uuid_bin::{bin_to_uuid, uuid_to_bin};

use super::internal;

const ACCOUNT_SELECT: &str = r#"
    SELECT a.id, a.email, a.username, a.password,
           m.role, m.status, m.created_at, m.updated_at,
           m.status_changed_at, m.status_changed_by
    FROM account a
    INNER JOIN meta m ON m.account_id = a.id
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: Vec<u8> = row.try_get("id").map_err(internal("account.id"))?;
        let role: String = row.try_get("role").map_err(internal("meta.role"))?;
        let status: String = row.try_get("status").map_err(internal("meta.status"))?;
        let status_changed_by: Option<Vec<u8>> = row
            .try_get("status_changed_by")
            .map_err(internal("meta.status_changed_by"))?;

        Ok(Account {
            id: bin_to_uuid(&id)?,
            email: row.try_get("email").map_err(internal("account.email"))?,
            username: row
                .try_get("username")
                .map_err(internal("account.username"))?,
            password_hash: row
                .try_get("password")
                .map_err(internal("account.password"))?,
            meta: AccountMeta {
                role: Role::from_slug(&role).ok_or_else(|| DomainError::Internal {
                    message: format!("unknown role slug: {role}"),
                })?,
                status: AccountStatus::from_slug(&status).ok_or_else(|| {
                    DomainError::Internal {
                        message: format!("unknown status slug: {status}"),
                    }
                })?,
                created_at: row
                    .try_get::<DateTime<Utc>, _>("created_at")
                    .map_err(internal("meta.created_at"))?,
                updated_at: row
                    .try_get::<DateTime<Utc>, _>("updated_at")
                    .map_err(internal("meta.updated_at"))?,
                status_changed_at: row
                    .try_get::<Option<DateTime<Utc>>, _>("status_changed_at")
                    .map_err(internal("meta.status_changed_at"))?,
                status_changed_by: status_changed_by
                    .as_deref()
                    .map(bin_to_uuid)
                    .transpose()?,
            },
        })
    }

    fn row_to_partial(row: &MySqlRow) -> Result<PartialAccount, DomainError> {
        let id: Vec<u8> = row.try_get("id").map_err(internal("account.id"))?;
        let role: String = row.try_get("role").map_err(internal("meta.role"))?;
        let status: String = row.try_get("status").map_err(internal("meta.status"))?;

        Ok(PartialAccount {
            id: bin_to_uuid(&id)?,
            email: row.try_get("email").map_err(internal("account.email"))?,
            username: row
                .try_get("username")
                .map_err(internal("account.username"))?,
            role: Role::from_slug(&role).ok_or_else(|| DomainError::Internal {
                message: format!("unknown role slug: {role}"),
            })?,
            status: AccountStatus::from_slug(&status).ok_or_else(|| DomainError::Internal {
                message: format!("unknown status slug: {status}"),
            })?,
        })
    }

    fn row_to_address(row: &MySqlRow) -> Result<Address, DomainError> {
        let id: Vec<u8> = row.try_get("id").map_err(internal("address.id"))?;
        let account_id: Option<Vec<u8>> = row
            .try_get("account_id")
            .map_err(internal("address.account_id"))?;
        let store_id: Option<Vec<u8>> = row
            .try_get("store_id")
            .map_err(internal("address.store_id"))?;

        let owner = match (account_id, store_id) {
            (Some(account), None) => AddressOwner::Account(bin_to_uuid(&account)?),
            (None, Some(store)) => AddressOwner::Store(bin_to_uuid(&store)?),
            _ => {
                return Err(DomainError::Internal {
                    message: "address row with ambiguous owner".to_string(),
                })
            }
        };

        Ok(Address {
            id: bin_to_uuid(&id)?,
            owner,
            street: row.try_get("street").map_err(internal("address.street"))?,
            apartment: row
                .try_get("apartment")
                .map_err(internal("address.apartment"))?,
            city: row.try_get("city").map_err(internal("address.city"))?,
            zip: row.try_get("zip").map_err(internal("address.zip"))?,
            country: row
                .try_get("country")
                .map_err(internal("address.country"))?,
        })
    }

    /// Translate a 1062 duplicate-key failure into the conflict for the
    /// violated unique key; anything else becomes an internal error.
    fn map_insert_error(err: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message();
            if message.contains("Duplicate entry") {
                if message.contains("uq_account_email") {
                    return AccountError::EmailTaken.into();
                }
                if message.contains("uq_account_username") {
                    return AccountError::UsernameTaken.into();
                }
                if message.contains("uq_admin_public_name")
                    || message.contains("uq_business_title")
                {
                    return AccountError::PublicNameTaken.into();
                }
            }
        }
        DomainError::Internal {
            message: format!("account write: {err}"),
        }
    }

    async fn insert_profile(
        tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
        account_id: Uuid,
        profile: &Profile,
    ) -> Result<(), sqlx::Error> {
        match profile {
            Profile::User(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO user_profile (account_id, firstname, lastname, birth, phone)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(uuid_to_bin(account_id))
                .bind(&p.firstname)
                .bind(&p.lastname)
                .bind(p.birth)
                .bind(&p.phone)
                .execute(&mut **tx)
                .await?;
            }
            Profile::Business(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO business_profile (account_id, title, bio, phone, contact_email)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(uuid_to_bin(account_id))
                .bind(&p.title)
                .bind(&p.bio)
                .bind(&p.phone)
                .bind(&p.contact_email)
                .execute(&mut **tx)
                .await?;
            }
            Profile::Admin(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO admin_profile (account_id, public_name)
                    VALUES (?, ?)
                    "#,
                )
                .bind(uuid_to_bin(account_id))
                .bind(&p.public_name)
                .execute(&mut **tx)
                .await?;
            }
        }
        Ok(())
    }

    async fn update_profile_row(
        tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
        account_id: Uuid,
        profile: &Profile,
    ) -> Result<u64, sqlx::Error> {
        let result = match profile {
            Profile::User(p) => {
                sqlx::query(
                    r#"
                    UPDATE user_profile
                    SET firstname = ?, lastname = ?, birth = ?, phone = ?
                    WHERE account_id = ?
                    "#,
                )
                .bind(&p.firstname)
                .bind(&p.lastname)
                .bind(p.birth)
                .bind(&p.phone)
                .bind(uuid_to_bin(account_id))
                .execute(&mut **tx)
                .await?
            }
            Profile::Business(p) => {
                sqlx::query(
                    r#"
                    UPDATE business_profile
                    SET title = ?, bio = ?, phone = ?, contact_email = ?
                    WHERE account_id = ?
                    "#,
                )
                .bind(&p.title)
                .bind(&p.bio)
                .bind(&p.phone)
                .bind(&p.contact_email)
                .bind(uuid_to_bin(account_id))
                .execute(&mut **tx)
                .await?
            }
            Profile::Admin(p) => {
                sqlx::query(
                    r#"
                    UPDATE admin_profile SET public_name = ? WHERE account_id = ?
                    "#,
                )
                .bind(&p.public_name)
                .bind(uuid_to_bin(account_id))
                .execute(&mut **tx)
                .await?
            }
        };
        Ok(result.rows_affected())
    }

    fn like_pattern(term: &str) -> String {
        let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        format!("%{escaped}%")
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: &Account, profile: &Profile) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(internal("begin account insert"))?;

        sqlx::query(
            r#"
            INSERT INTO account (id, email, username, password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(uuid_to_bin(account.id))
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO meta (account_id, role, status, created_at, updated_at,
                              status_changed_at, status_changed_by)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid_to_bin(account.id))
        .bind(account.meta.role.slug())
        .bind(account.meta.status.slug())
        .bind(account.meta.created_at)
        .bind(account.meta.updated_at)
        .bind(account.meta.status_changed_at)
        .bind(account.meta.status_changed_by.map(uuid_to_bin))
        .execute(&mut *tx)
        .await
        .map_err(internal("insert meta"))?;

        Self::insert_profile(&mut tx, account.id, profile)
            .await
            .map_err(Self::map_insert_error)?;

        tx.commit().await.map_err(internal("commit account insert"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{ACCOUNT_SELECT} WHERE a.id = ?");
        let row = sqlx::query(&query)
            .bind(uuid_to_bin(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select account by id"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        // Email takes precedence when an identifier matches both columns
        let by_email = format!("{ACCOUNT_SELECT} WHERE a.email = ?");
        let row = sqlx::query(&by_email)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select account by email"))?;
        if let Some(row) = row {
            return Ok(Some(Self::row_to_account(&row)?));
        }

        self.find_by_username(identifier).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{ACCOUNT_SELECT} WHERE a.username = ?");
        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select account by username"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn update(
        &self,
        account: &Account,
        profile: Option<&Profile>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(internal("begin account update"))?;

        let result = sqlx::query(
            r#"
            UPDATE account SET email = ?, username = ?, password = ? WHERE id = ?
            "#,
        )
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(uuid_to_bin(account.id))
        .execute(&mut *tx)
        .await
        .map_err(Self::map_insert_error)?;
        if result.rows_affected() == 0 {
            return Err(AccountError::AccountNotFound.into());
        }

        sqlx::query(
            r#"
            UPDATE meta
            SET role = ?, status = ?, updated_at = ?, status_changed_at = ?, status_changed_by = ?
            WHERE account_id = ?
            "#,
        )
        .bind(account.meta.role.slug())
        .bind(account.meta.status.slug())
        .bind(account.meta.updated_at)
        .bind(account.meta.status_changed_at)
        .bind(account.meta.status_changed_by.map(uuid_to_bin))
        .bind(uuid_to_bin(account.id))
        .execute(&mut *tx)
        .await
        .map_err(internal("update meta"))?;

        if let Some(profile) = profile {
            let touched = Self::update_profile_row(&mut tx, account.id, profile)
                .await
                .map_err(Self::map_insert_error)?;
            // Zero rows means the profile table for this role has no row
            // for the account, which is the desync case
            if touched == 0 {
                return Err(AccountError::ProfileDesync.into());
            }
        }

        tx.commit().await.map_err(internal("commit account update"))
    }

    async fn find_profile(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let role_row = sqlx::query("SELECT role FROM meta WHERE account_id = ?")
            .bind(uuid_to_bin(account_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select meta.role"))?;
        let Some(role_row) = role_row else {
            return Ok(None);
        };
        let role: String = role_row.try_get("role").map_err(internal("meta.role"))?;
        let role = Role::from_slug(&role).ok_or_else(|| DomainError::Internal {
            message: format!("unknown role slug: {role}"),
        })?;

        use mc_core::domain::entities::account::RoleGroup;
        let profile = match role.group() {
            RoleGroup::User => sqlx::query(
                "SELECT firstname, lastname, birth, phone FROM user_profile WHERE account_id = ?",
            )
            .bind(uuid_to_bin(account_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select user_profile"))?
            .map(|row| {
                Ok::<_, DomainError>(Profile::User(UserProfile {
                    firstname: row
                        .try_get("firstname")
                        .map_err(internal("user_profile.firstname"))?,
                    lastname: row
                        .try_get("lastname")
                        .map_err(internal("user_profile.lastname"))?,
                    birth: row
                        .try_get::<Option<NaiveDate>, _>("birth")
                        .map_err(internal("user_profile.birth"))?,
                    phone: row
                        .try_get("phone")
                        .map_err(internal("user_profile.phone"))?,
                }))
            })
            .transpose()?,
            RoleGroup::Business => sqlx::query(
                "SELECT title, bio, phone, contact_email FROM business_profile WHERE account_id = ?",
            )
            .bind(uuid_to_bin(account_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select business_profile"))?
            .map(|row| {
                Ok::<_, DomainError>(Profile::Business(BusinessProfile {
                    title: row
                        .try_get("title")
                        .map_err(internal("business_profile.title"))?,
                    bio: row.try_get("bio").map_err(internal("business_profile.bio"))?,
                    phone: row
                        .try_get("phone")
                        .map_err(internal("business_profile.phone"))?,
                    contact_email: row
                        .try_get("contact_email")
                        .map_err(internal("business_profile.contact_email"))?,
                }))
            })
            .transpose()?,
            RoleGroup::Admin => sqlx::query(
                "SELECT public_name FROM admin_profile WHERE account_id = ?",
            )
            .bind(uuid_to_bin(account_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select admin_profile"))?
            .map(|row| {
                Ok::<_, DomainError>(Profile::Admin(AdminProfile {
                    public_name: row
                        .try_get("public_name")
                        .map_err(internal("admin_profile.public_name"))?,
                }))
            })
            .transpose()?,
        };

        Ok(profile)
    }

    async fn add_address(&self, address: &Address) -> Result<(), DomainError> {
        let (account_id, store_id) = match address.owner {
            AddressOwner::Account(id) => (Some(uuid_to_bin(id)), None),
            AddressOwner::Store(id) => (None, Some(uuid_to_bin(id))),
        };

        sqlx::query(
            r#"
            INSERT INTO address (id, account_id, store_id, street, apartment, city, zip, country)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid_to_bin(address.id))
        .bind(account_id)
        .bind(store_id)
        .bind(&address.street)
        .bind(&address.apartment)
        .bind(&address.city)
        .bind(&address.zip)
        .bind(&address.country)
        .execute(&self.pool)
        .await
        .map_err(internal("insert address"))?;

        Ok(())
    }

    async fn find_address(&self, address_id: Uuid) -> Result<Option<Address>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, store_id, street, apartment, city, zip, country
            FROM address WHERE id = ?
            "#,
        )
        .bind(uuid_to_bin(address_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("select address"))?;

        row.as_ref().map(Self::row_to_address).transpose()
    }

    async fn delete_address(&self, address_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM address WHERE id = ?")
            .bind(uuid_to_bin(address_id))
            .execute(&self.pool)
            .await
            .map_err(internal("delete address"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_addresses(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, store_id, street, apartment, city, zip, country
            FROM address WHERE account_id = ?
            "#,
        )
        .bind(uuid_to_bin(account_id))
        .fetch_all(&self.pool)
        .await
        .map_err(internal("select addresses"))?;

        rows.iter().map(Self::row_to_address).collect()
    }

    async fn list_banned(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        let query = format!(
            r#"{ACCOUNT_SELECT}
            WHERE m.status = 'banned'
            ORDER BY m.status_changed_at DESC
            LIMIT ? OFFSET ?"#
        );
        let rows = sqlx::query(&query)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(internal("select banned accounts"))?;

        rows.iter().map(Self::row_to_partial).collect()
    }

    async fn list_accounts(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        let query = format!(
            r#"{ACCOUNT_SELECT}
            WHERE m.status <> 'banned'
            ORDER BY m.created_at ASC
            LIMIT ? OFFSET ?"#
        );
        let rows = sqlx::query(&query)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(internal("select accounts"))?;

        rows.iter().map(Self::row_to_partial).collect()
    }

    async fn search(
        &self,
        term: &str,
        page: &Pagination,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        let pattern = Self::like_pattern(term);
        let query = format!(
            r#"
            SELECT a.id, a.email, a.username, m.role, m.status
            FROM account a
            INNER JOIN meta m ON m.account_id = a.id
            LEFT JOIN user_profile up ON up.account_id = a.id
            LEFT JOIN business_profile bp ON bp.account_id = a.id
            LEFT JOIN admin_profile ap ON ap.account_id = a.id
            WHERE a.username LIKE ? OR a.email LIKE ?
               OR up.firstname LIKE ? OR up.lastname LIKE ?
               OR bp.title LIKE ? OR bp.bio LIKE ?
               OR ap.public_name LIKE ?
            ORDER BY a.username ASC
            LIMIT ? OFFSET ?
            "#
        );
        let mut q = sqlx::query(&query);
        for _ in 0..7 {
            q = q.bind(&pattern);
        }
        let rows = q
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(internal("search accounts"))?;

        rows.iter().map(Self::row_to_partial).collect()
    }

    async fn find_partials_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PartialAccount>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!(
            r#"
            SELECT a.id, a.email, a.username, m.role, m.status
            FROM account a
            INNER JOIN meta m ON m.account_id = a.id
            WHERE a.id IN ({placeholders})
            "#
        );
        let mut q = sqlx::query(&query);
        for id in ids {
            q = q.bind(uuid_to_bin(*id));
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(internal("select accounts by ids"))?;

        rows.iter().map(Self::row_to_partial).collect()
    }
}
