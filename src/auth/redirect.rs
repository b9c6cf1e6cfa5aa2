//! Post-login destination, a pure function of the resolved role.

use crate::auth::identity::Role;

pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const PROVIDER_DASHBOARD: &str = "/provider/dashboard";
pub const FIND_SERVICES: &str = "/find-services";

/// Map a resolved role to its destination route. Absent identities land on
/// the default customer route. The caller performs the actual transfer.
#[must_use]
pub const fn destination(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_DASHBOARD,
        Some(Role::Provider) => PROVIDER_DASHBOARD,
        _ => FIND_SERVICES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_goes_to_admin_dashboard() {
        assert_eq!(destination(Some(Role::Admin)), "/admin/dashboard");
    }

    #[test]
    fn provider_goes_to_provider_dashboard() {
        assert_eq!(destination(Some(Role::Provider)), "/provider/dashboard");
    }

    #[test]
    fn customer_goes_to_find_services() {
        assert_eq!(destination(Some(Role::Customer)), "/find-services");
    }

    #[test]
    fn absent_role_goes_to_find_services() {
        assert_eq!(destination(None), "/find-services");
    }
}
