pub mod login_request;
pub mod login_response;
pub mod login_route;
pub mod me_route;
