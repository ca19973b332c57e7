use crate::db::service::DbService;
use crate::types::{
    directory::{EmployeeSummary, ManagerSummary},
    error::AppError,
    identity::{ADMIN, EMPLOYEE, MANAGER},
};
use entity::user::{Column, Entity as User, Model as UserModel};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::HashMap;

impl DbService {
    /// Managers of an organization with the number of people reporting to each.
    pub async fn list_managers(&self, organization_id: i32) -> Result<Vec<ManagerSummary>, AppError> {
        let Some(manager_role) = self.role_by_name(MANAGER).await? else {
            return Ok(vec![]);
        };

        let managers = User::find()
            .filter(Column::OrganizationId.eq(organization_id))
            .filter(Column::RoleId.eq(manager_role.id))
            .order_by_asc(Column::Id)
            .all(&self.database_connection)
            .await?;

        let counts: HashMap<i32, i64> = User::find()
            .select_only()
            .column(Column::ManagerId)
            .column_as(Expr::col(Column::Id).count(), "employee_count")
            .filter(Column::OrganizationId.eq(organization_id))
            .filter(Column::ManagerId.is_not_null())
            .group_by(Column::ManagerId)
            .into_tuple::<(Option<i32>, i64)>()
            .all(&self.database_connection)
            .await?
            .into_iter()
            .filter_map(|(manager_id, count)| manager_id.map(|id| (id, count)))
            .collect();

        Ok(managers
            .into_iter()
            .map(|m| ManagerSummary {
                employee_count: counts.get(&m.id).copied().unwrap_or(0),
                id: m.id,
                email: m.email,
                first_name: m.first_name,
                last_name: m.last_name,
            })
            .collect())
    }

    /// Employees of an organization with their manager's name.
    ///
    /// Admins see everyone; a manager sees direct reports only.
    pub async fn list_employees(
        &self,
        organization_id: i32,
        caller_role: &str,
        caller_id: Option<i32>,
    ) -> Result<Vec<EmployeeSummary>, AppError> {
        let reports_to = match caller_role {
            ADMIN => None,
            MANAGER => Some(caller_id.ok_or(AppError::Unauthorized)?),
            _ => return Err(AppError::Forbidden),
        };

        let Some(employee_role) = self.role_by_name(EMPLOYEE).await? else {
            return Ok(vec![]);
        };

        let mut query = User::find()
            .filter(Column::OrganizationId.eq(organization_id))
            .filter(Column::RoleId.eq(employee_role.id));
        if let Some(manager_id) = reports_to {
            query = query.filter(Column::ManagerId.eq(manager_id));
        }
        let employees = query
            .order_by_asc(Column::Id)
            .all(&self.database_connection)
            .await?;

        let mut manager_ids: Vec<i32> = employees.iter().filter_map(|e| e.manager_id).collect();
        manager_ids.sort_unstable();
        manager_ids.dedup();

        let manager_names: HashMap<i32, Option<String>> = if manager_ids.is_empty() {
            HashMap::new()
        } else {
            User::find()
                .filter(Column::Id.is_in(manager_ids))
                .all(&self.database_connection)
                .await?
                .iter()
                .map(|m: &UserModel| (m.id, m.display_name()))
                .collect()
        };

        Ok(employees
            .into_iter()
            .map(|e| EmployeeSummary {
                manager: e
                    .manager_id
                    .and_then(|id| manager_names.get(&id).cloned().flatten()),
                id: e.id,
                email: e.email,
                first_name: e.first_name,
                last_name: e.last_name,
            })
            .collect())
    }
}
