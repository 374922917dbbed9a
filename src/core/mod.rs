mod education;
mod history;
mod lenient;
mod result;
mod risk;

pub use education::{EducationCategory, MitigationContent, MitigationItem};
pub use history::HistoryRecord;
pub use lenient::is_truthy;
pub use result::{Impersonation, Location, NetworkInfo, ScanResult};
pub use risk::RiskLevel;
