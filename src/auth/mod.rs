//! Token verification, login/group middleware and the permission registry.

mod jwt;
mod middleware;
mod permission;

pub use jwt::{Claims, JwtService};
pub use middleware::{admin_required, authenticate, group_required, login_required, CurrentUser, GroupGuard};
pub use permission::{PermissionEntry, PermissionKey, PermissionMeta, PermissionRegistry};
