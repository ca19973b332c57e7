use crate::db::service::DbService;
use crate::types::error::AppError;
use entity::role::{Column, Entity as Role, Model as RoleModel};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl DbService {
    pub async fn role_by_name(&self, name: &str) -> Result<Option<RoleModel>, AppError> {
        Ok(Role::find()
            .filter(Column::Name.eq(name))
            .one(&self.database_connection)
            .await?)
    }
}
