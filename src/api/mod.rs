//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for previewing and processing
//! payroll with the statutory deductions in force in Kenya.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PreviewRequest, ProcessRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
