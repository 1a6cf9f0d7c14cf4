pub mod client;
pub mod error;
pub mod operation;
pub mod payload;
pub mod transport;

pub use client::{ApiClient, ApiEvent, SUCCESS_MESSAGE};
pub use error::{ApiError, ApiResult};
pub use operation::{Operation, Resource};
pub use payload::CreateEmployee;
pub use transport::{ApiRequest, ReqwestTransport, Transport};
