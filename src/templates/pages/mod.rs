pub mod home;
pub mod report;

pub use home::{home_page, HomeVm};
pub use report::{report_page, ReportVm};
