pub mod config;
pub mod http;
pub mod resource;
pub mod transport;
pub mod types;

pub use config::{ApiConfig, API_PREFIX};
pub use http::HttpTransport;
pub use resource::ResourceApi;
pub use transport::{ApiError, ApiResult, ApiTransport};
pub use types::{
    ApiRequest, ApiResponse, HttpMethod, NewStudent, NewTeacher, ResourceKind, StudentUpdate,
    TeacherUpdate, SERVER_FIELDS,
};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::http::*;
    pub use crate::resource::*;
    pub use crate::transport::*;
    pub use crate::types::*;
}
