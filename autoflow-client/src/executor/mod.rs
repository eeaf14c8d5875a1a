pub mod http;
mod operation;
pub mod request;
pub mod response;
mod runner;

pub use http::{
    HttpRequestParts, HttpResponseParts, HttpTransport, ReqwestTransport, TransportError,
    DEFAULT_MAX_RESPONSE_BYTES,
};
pub use operation::{HttpMethod, Operation, QueryValue};
pub use request::REQUEST_ID_HEADER;
pub use response::{classify_failure, interpret_response, AttemptFailure, ResponseBody};
pub use runner::RequestExecutor;
