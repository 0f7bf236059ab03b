//! HTTP API handlers for talent-server

pub mod analysis;
pub mod auth;
pub mod buildinfo;
pub mod data;
pub mod health;
pub mod options;
pub mod users;

pub use analysis::{get_group_analysis, get_summary};
pub use auth::{current_session, login, logout, require_session};
pub use buildinfo::get_build_info;
pub use data::{
    add_record, delete_record, delete_record_by_id, list_records, update_record,
    update_record_by_id,
};
pub use health::health_routes;
pub use options::get_dropdown_options;
pub use users::{create_user, delete_user, list_users};
