pub mod create_session_request;
pub mod create_session_route;
pub mod delete_session_route;
pub mod list_sessions_route;
