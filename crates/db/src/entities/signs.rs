//! `SeaORM` Entity for the signs table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One active login: an issuer token plus the device fingerprint it was
/// issued to. The primary key is the login id assigned at token issuance,
/// not an auto-incremented value.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "signs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(unique)]
    pub issuer: String,
    pub ip: String,
    pub user_agent: String,
    pub device_name: String,
    pub online_time: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
