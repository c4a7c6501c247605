//! Backend route paths, relative to the configured base endpoint.

pub const GET_AUTH_ME: &str = "/auth/me";
pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const POST_AUTH_REFRESH_TOKEN: &str = "/auth/refresh-token";

pub const GET_USERS: &str = "/users/admin/users/find";
pub const PROVINCE: &str = "/province";
pub const SECTION: &str = "/section";
pub const POST_SECTION: &str = "/section/province/";
pub const GET_COURSES: &str = "/cours/admin/";
pub const POST_COURSE: &str = "/cours/admin/courses";
pub const GET_SUBSCRIPTIONS: &str = "/subscription/admin/all";
pub const GET_SUBSCRIPTION_STATS: &str = "/subscription/admin/stats";
pub const GET_NOTIFICATIONS: &str = "/notification/me";

pub fn delete_user(id: &str) -> String {
    format!("/users/users/delete/{id}")
}

pub fn restore_user(id: &str) -> String {
    format!("/users/users/{id}/restore")
}

pub fn toggle_user_active(id: &str) -> String {
    format!("/users/admin/users/{id}/toggle-active")
}

pub fn province(id: &str) -> String {
    format!("{PROVINCE}/{id}")
}

pub fn section(id: &str) -> String {
    format!("{SECTION}/{id}")
}

pub fn publish_course(id: &str) -> String {
    format!("/cours/admin/publish/{id}")
}

pub fn unpublish_course(id: &str) -> String {
    format!("/cours/admin/unpublish/{id}")
}

pub fn delete_course(id: &str) -> String {
    format!("/cours/admin/delete/{id}")
}

pub fn regenerate_course(id: &str) -> String {
    format!("/cours/regenerate/{id}")
}

pub fn activate_subscription(id: &str) -> String {
    format!("/subscription/admin/activate/{id}")
}

pub fn mark_notification_read(id: &str) -> String {
    format!("/notification/me/mark-read/{id}")
}

/// Whether `path` targets the renewal endpoint (query string ignored).
pub fn is_refresh_path(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path.trim_end_matches('/').ends_with(POST_AUTH_REFRESH_TOKEN)
}
