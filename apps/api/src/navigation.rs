//! Role-based navigation menus.
//!
//! Roles live in the `user_roles` table, never in the token: a stale or
//! tampered JWT cannot grant a different menu. The menus themselves are fixed.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const fn item(label: &'static str, path: &'static str) -> NavItem {
    NavItem { label, path }
}

const STUDENT_MENU: &[NavItem] = &[
    item("Dashboard", "/dashboard"),
    item("Resume", "/resume"),
    item("Coding Practice", "/coding"),
    item("Tests", "/tests"),
    item("Jobs & Placement", "/jobs"),
    item("Attendance", "/attendance"),
    item("Analytics", "/analytics"),
];

const FACULTY_MENU: &[NavItem] = &[
    item("Dashboard", "/dashboard"),
    item("My Sections", "/sections"),
    item("Attendance", "/attendance"),
    item("Tests", "/tests"),
    item("Analytics", "/analytics"),
];

const ADMIN_MENU: &[NavItem] = &[
    item("Dashboard", "/admin"),
    item("Notifications", "/admin/notifications"),
    item("Jobs & Placement", "/jobs"),
    item("Analytics", "/analytics"),
];

const SUPER_ADMIN_MENU: &[NavItem] = &[
    item("Dashboard", "/admin"),
    item("Notifications", "/admin/notifications"),
    item("User Management", "/admin/users"),
    item("Jobs & Placement", "/jobs"),
    item("Analytics", "/analytics"),
];

pub fn menu_for_role(role: &str) -> Option<&'static [NavItem]> {
    match role {
        "student" => Some(STUDENT_MENU),
        "faculty" => Some(FACULTY_MENU),
        "admin" => Some(ADMIN_MENU),
        "super_admin" => Some(SUPER_ADMIN_MENU),
        _ => None,
    }
}

pub async fn fetch_role(pool: &PgPool, user_id: Uuid) -> Result<String, AppError> {
    let role: Option<(String,)> =
        sqlx::query_as("SELECT role::text FROM user_roles WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    role.map(|(r,)| r)
        .ok_or_else(|| AppError::NotFound("No role assigned to this account".to_string()))
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub role: String,
    pub items: &'static [NavItem],
}

/// GET /api/v1/navigation
pub async fn handle_navigation(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<NavigationResponse>, AppError> {
    let role = fetch_role(&state.db, user.user_id).await?;
    let items = menu_for_role(&role)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Unknown role in user_roles: {role}")))?;
    Ok(Json(NavigationResponse { role, items }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_role_has_a_menu() {
        for role in ["student", "faculty", "admin", "super_admin"] {
            assert!(menu_for_role(role).is_some(), "no menu for {role}");
        }
    }

    #[test]
    fn test_unknown_role_has_no_menu() {
        assert!(menu_for_role("alumni").is_none());
        assert!(menu_for_role("").is_none());
    }

    #[test]
    fn test_student_menu_leads_with_dashboard() {
        let menu = menu_for_role("student").unwrap();
        assert_eq!(menu[0], item("Dashboard", "/dashboard"));
        assert!(menu.iter().any(|i| i.path == "/resume"));
        assert!(menu.iter().any(|i| i.path == "/coding"));
    }

    #[test]
    fn test_only_admin_menus_reach_admin_pages() {
        for role in ["student", "faculty"] {
            let menu = menu_for_role(role).unwrap();
            assert!(menu.iter().all(|i| !i.path.starts_with("/admin")));
        }
        for role in ["admin", "super_admin"] {
            let menu = menu_for_role(role).unwrap();
            assert!(menu.iter().any(|i| i.path.starts_with("/admin")));
        }
    }
}
