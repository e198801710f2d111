pub mod app;
pub mod lookup;
pub mod ticker;
pub mod ui;
