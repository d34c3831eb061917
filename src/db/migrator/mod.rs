use sea_orm_migration::prelude::*;

mod m20240101_initial;
mod m20260128_add_search_index;
mod m20260130_add_child_order_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_initial::Migration),
            Box::new(m20260128_add_search_index::Migration),
            Box::new(m20260130_add_child_order_indexes::Migration),
        ]
    }
}
