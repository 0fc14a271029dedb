pub mod cached_cities;
pub mod card;
pub mod city_form;
pub mod error;
pub mod notice;

pub use cached_cities::cached_cities;
pub use card::card;
pub use city_form::city_form;
pub use error::error_page;
pub use notice::{notice, NoticeKind};
