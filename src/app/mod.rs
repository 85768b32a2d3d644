mod controller;
mod lookup;
mod navigation;
mod options;
mod status;
mod submission;
mod validation;

pub use controller::{CreateRunController, Effect};
pub use lookup::{LookupError, PipelineLookup, SchemaRequest};
pub use navigation::{ALL_NAMESPACES, NavigationTarget, listing_target};
pub use options::ControllerOptions;
pub use status::{
    Banner, BannerKind, CREATING_STATUS, LOADING_STATUS, StatusLine, VALIDATION_BANNER,
};
pub use submission::{CreateRunError, RunClient, SubmissionOutcome, SubmitBlocked, send_payload};
pub use validation::{ValidationResult, is_valid_run_name, validate};
