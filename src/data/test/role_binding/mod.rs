use crate::{
    data::role_binding::RoleBindingRepository,
    model::{platform::Platform, role_binding::CreateRoleBindingParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod upsert;
