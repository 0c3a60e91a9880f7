pub(crate) mod app;
pub(crate) mod calendar;
pub(crate) mod releases;

pub use app::App;
