pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_users;
mod m20261018_000002_create_profiles;
mod m20261018_000003_create_reviews;
mod m20261018_000004_create_review_liked_users;
mod m20261018_000005_create_comments;
mod m20261018_000006_add_foreign_key_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_users::Migration),
            Box::new(m20261018_000002_create_profiles::Migration),
            Box::new(m20261018_000003_create_reviews::Migration),
            Box::new(m20261018_000004_create_review_liked_users::Migration),
            Box::new(m20261018_000005_create_comments::Migration),
            Box::new(m20261018_000006_add_foreign_key_indexes::Migration),
        ]
    }
}
