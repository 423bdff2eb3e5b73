pub mod chat_summary_request;
pub mod chat_summary_response;
pub mod chat_summary_route;
