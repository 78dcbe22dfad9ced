pub mod http;

pub use http::{FetchRequest, HttpClient, RequestBody, RequestOptions, ResponseBody, ResponseType};
