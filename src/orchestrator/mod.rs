pub mod describe;
pub mod plan;
pub mod resolve;

pub use describe::{run_dialects, run_schema};
pub use plan::{model_name_for, plan_import, run_plan, ImportTarget};
pub use resolve::{resolve_request, run_resolve, ImportError, ImportInput, ImportRequest};
