mod api;
pub use api::create_gate_routes;
mod app_state;
pub use app_state::AppState;
mod credential;
pub use credential::{Credential, ExpectedToken};
mod environment;
pub use environment::load_env_from_project_path;
mod event;
pub use event::{
    CfRecord, Decision, DenyResponse, HeaderEntry, HeaderGroups, ViewerEvent, ViewerEventRecord,
    ViewerRequest,
};
mod gate;
pub use gate::{AuthGate, CHALLENGE_CONTENT_TYPE, CHALLENGE_HEADER_VALUE};
mod logger;
pub use logger::{setup_info_logger, setup_logger};
mod middleware;
pub use middleware::viewer_request_guard;
mod shared;
pub use shared::HttpError;
mod startup;
pub use startup::{start, StartError};
mod yaml;
pub use yaml::{read, ApiConfig, AuthConfig, ReadYamlError, SetupConfig};

pub use tracing::{error as edgegate_error, info as edgegate_info};
