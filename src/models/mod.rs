pub mod criteria;
pub mod process;
pub mod severity;

pub use criteria::{resolve_deprecated, CriteriaModel, RawCriteria};
pub use process::{CheckContext, ProcessSnapshot};
pub use severity::Severity;
